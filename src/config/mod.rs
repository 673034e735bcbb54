pub mod models;

pub use models::{load_env_file, Cli, Settings, ENV_FILE};
