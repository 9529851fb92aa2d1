pub mod clock;
pub mod command;
pub mod config;
pub mod exit_code;
pub mod logging;
pub mod retry;
