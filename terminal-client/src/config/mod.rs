mod client_config;

pub use client_config::get_config_manager;
