mod data_dir;
mod loader;

pub use data_dir::DataDir;
pub use loader::{
    load_config, resolve_data_dir, RestConfig, CONFIG_FILE, DATA_DIR_ENV, DEFAULT_DATA_DIR,
};
