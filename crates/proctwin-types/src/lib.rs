pub mod error;
pub mod event;
pub mod table;

pub use error::{Error, Result};
pub use event::*;
pub use table::*;
