pub mod collector;
pub mod components;
pub mod config;
pub mod derivation;
pub mod error;
pub mod handler;
pub mod response;
pub mod submission;
pub mod utils;

#[cfg(feature = "web-interface")]
pub mod shutdown;
#[cfg(feature = "web-interface")]
pub mod startup;
#[cfg(feature = "web-interface")]
pub mod web;
