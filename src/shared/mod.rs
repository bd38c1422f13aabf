pub mod config;
pub mod dirs;
pub mod env_var;
pub mod logging;
pub mod repo_ref;
pub mod table;
