#[path = "mod_config.rs"]
mod config_tests;
