//! Process-wide configuration, loaded once at startup and passed by
//! reference into each component's constructor.

pub mod config;

pub use config::Config;
