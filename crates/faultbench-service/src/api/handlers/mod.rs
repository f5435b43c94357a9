//! API request handlers

mod faults;
mod health;
mod load;

pub use faults::*;
pub use health::*;
pub use load::*;
