pub mod api;
pub mod config;
pub mod error;
pub mod generator;
pub mod page;
pub mod terminal;

pub use error::{Error, Result};
