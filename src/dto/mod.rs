//! Serializable response shapes for the JSON API.

pub mod books;
pub mod progress;
pub mod purchases;
