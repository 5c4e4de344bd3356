//! Aquafarm Cart - the storefront's shopping cart.
//!
//! # Architecture
//!
//! - [`cart`] - `Cart` state and the pure `reduce` transition function
//! - [`store`] - `CartStore`, which applies actions and persists snapshots
//! - [`storage`] - `SnapshotStorage` trait with memory and file backends
//! - [`snapshot`] - JSON snapshot encoding
//! - [`catalog`] - Products the farm sells
//! - [`checkout`] - Contact validation and order placement
//! - [`orders`] - Local order history
//! - [`config`] - Environment configuration
//!
//! # Example
//!
//! ```
//! use aquafarm_cart::{Catalog, CartStore, MemoryStorage};
//! use aquafarm_core::ProductId;
//!
//! let catalog = Catalog::builtin().unwrap();
//! let catfish = catalog.get(&ProductId::new("live-catfish")).unwrap();
//!
//! let mut store = CartStore::open(MemoryStorage::new());
//! let total = store.add_item(catfish.line_item(catfish.min_order)).unwrap();
//! assert_eq!(total.naira(), 12_000);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod item;
pub mod orders;
pub mod snapshot;
pub mod storage;
pub mod store;

pub use cart::{Cart, CartAction, reduce};
pub use catalog::{Catalog, CatalogError, Product};
pub use checkout::{CheckoutError, CheckoutForm, CustomerDetails, place_order};
pub use config::{CartConfig, ConfigError};
pub use error::CartError;
pub use item::LineItem;
pub use orders::{Order, OrderHistory, OrderHistoryError};
pub use snapshot::SnapshotError;
pub use storage::{FileStorage, MemoryStorage, SnapshotStorage, StorageError};
pub use store::CartStore;
