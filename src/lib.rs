pub mod app_state;
pub mod cli;
pub mod core;
pub mod domain;
pub mod errors;
pub mod logging;
