pub mod ament;
pub mod config;
pub mod error;
pub mod launch;
pub mod observability;

pub use error::{LaunchError, Result};
