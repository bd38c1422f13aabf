pub mod cli;
pub mod commands;
pub mod infra;
pub mod shared;
