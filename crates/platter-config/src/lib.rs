mod backend;
mod paths;

pub use backend::{ConfigBackend, TomlConfigBackend};
pub use paths::{BASE_DIR_ENV, ConfigError, PlatterPaths};

use once_cell::sync::Lazy;

// Rutas por usuario, o bajo PLATTER_BASE_DIR si está definida
pub static PATHS: Lazy<PlatterPaths> = Lazy::new(|| PlatterPaths::new().expect("failed to init PlatterPaths"));

pub static CONFIG_BACKEND: Lazy<TomlConfigBackend> = Lazy::new(|| TomlConfigBackend::new(PATHS.clone()));
