//! Domain entities and value objects shared across the crate.

pub mod book;
pub mod category;
pub mod payment;
pub mod progress;
pub mod purchase;
pub mod types;
