//! Core library exports for the Bookstall service.
//!
//! This crate exposes the catalog, purchase-ledger and reading-progress
//! layers of a digital book marketplace. The `data` feature builds only the
//! reusable persistence/domain layer; the `server` feature adds the
//! Actix-web JSON API on top of it.

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "data")]
mod error_conversions;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod schema;

#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
