pub mod conference;
pub mod organizers;
pub mod pub_date;
pub mod text;

pub use conference::*;
pub use organizers::*;
pub use pub_date::*;
pub use text::*;
