pub mod health;
pub mod quiz;

pub use health::*;
pub use quiz::*;
