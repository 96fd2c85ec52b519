//! Incoming request forms and their validated payloads.

pub mod books;
pub mod progress;
pub mod purchases;
