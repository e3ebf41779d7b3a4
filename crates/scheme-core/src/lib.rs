pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, CategoryConfig};
pub use error::{Result, SchemeError};
pub use types::*;
