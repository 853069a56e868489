pub mod config;
pub mod db;
pub mod errors;
pub mod metrics;
pub mod model;
pub mod rest;
pub mod validate;

pub use config::Config;
pub use errors::{Error, Result};
