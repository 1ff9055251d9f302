pub mod collection;
#[cfg(feature = "cli")]
pub mod commands;
#[cfg(feature = "cli")]
pub mod config;
pub mod env;
#[cfg(feature = "cli")]
pub mod executor;
pub mod history;
pub mod request;
pub mod store;
