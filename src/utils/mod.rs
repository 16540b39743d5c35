pub mod config_loader;
pub mod constants;
pub mod env;
pub mod logging;
