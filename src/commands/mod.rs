pub mod commit;
pub mod common;
pub mod config;
pub mod repo;
pub mod user;
