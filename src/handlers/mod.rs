pub mod conferences;
pub mod research;
pub mod staff;
pub mod events;
pub mod uploads;
pub mod web;

pub use conferences::*;
pub use research::*;
pub use staff::*;
pub use events::*;
pub use uploads::*;
