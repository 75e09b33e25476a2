pub mod payload;
pub mod request;

pub use payload::*;
pub use request::*;
