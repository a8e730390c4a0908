pub mod conference;
pub mod research;
pub mod staff;
pub mod event;

pub use conference::*;
pub use research::*;
pub use staff::*;
pub use event::*;
