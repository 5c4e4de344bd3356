//! Aquafarm Core - Shared types library.
//!
//! This crate provides common types used across all Aquafarm components:
//! - `cart` - Cart store, snapshot storage, catalog, checkout and order history
//! - `cli` - Command-line front end that dispatches to the cart store
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, order references, prices,
//!   contact details and order statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
