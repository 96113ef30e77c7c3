pub mod config;
pub mod dtos;
pub mod handlers;
pub mod quiz;
pub mod services;
pub mod startup;
pub mod utils;

pub use startup::{AppState, Application};
