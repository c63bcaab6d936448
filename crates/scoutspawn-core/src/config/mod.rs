//! Configuration layer.
//!
//! Every environment read lives here; the rest of the code accesses typed
//! config instead of calling `std::env::var` directly.
//!
//! - `loader`: `env_or`, `env_optional`, `env_bool`, `.env` loading
//! - `schema`: `AmentConfig`, `ObservabilityConfig`
//! - `env_keys`: key constants and aliases

pub mod env_keys;
pub mod loader;
pub mod schema;

pub use loader::{
    env_bool, env_optional, env_or, load_dotenv, load_dotenv_from_dir, remove_env_var,
    set_env_var,
};
pub use schema::{AmentConfig, ObservabilityConfig};
