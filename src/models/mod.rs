//! Diesel row models and conversions into domain entities.

pub mod book;
pub mod category;
#[cfg(feature = "server")]
pub mod config;
pub mod progress;
pub mod purchase;
