pub mod catalog;
pub mod marketing;
pub mod roster;
pub mod time;

pub use marketing::*;
pub use roster::*;
pub use time::*;
