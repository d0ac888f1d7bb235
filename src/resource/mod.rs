//! Resource abstraction layer
//!
//! Typed resources and the generic operations the service façades are built
//! from.
//!
//! # Architecture
//!
//! - [`schema`] - The `Resource` trait, field roles and `ResourceRef`
//! - [`request`] - URI/query/body rendering and response translation
//! - [`ops`] - create/get/update/delete/list/find and status polling
//! - [`serde_util`] - Coercions for loosely typed wire fields
//!
//! # Example
//!
//! ```ignore
//! use futures::TryStreamExt;
//! use hwcloud::compute::Server;
//! use hwcloud::resource::{list, ListOptions};
//!
//! async fn active(client: &hwcloud::CloudClient) -> hwcloud::Result<Vec<Server>> {
//!     let options = ListOptions::new().details(true).filter("status", "ACTIVE");
//!     list(client, Server::default(), options).try_collect().await
//! }
//! ```

pub mod ops;
pub mod request;
pub mod schema;
pub mod serde_util;

pub use ops::{create, delete, find, get, list, update, wait_for_status, ListOptions};
pub use schema::{Allow, Field, Resource, ResourceRef, Role};
