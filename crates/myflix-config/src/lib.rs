pub mod config;
pub mod paths;
pub mod session;

pub use config::{ApiConfig, Config, DEFAULT_API_BASE_URL};
pub use paths::{container_base_path, PathManager};
pub use session::SessionStore;
