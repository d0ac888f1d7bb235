//! Typed client for Huawei Cloud billing (BSS) and compute (ECS) REST APIs
//!
//! Method calls on the service façades are translated into HTTP requests
//! against the vendor API, and responses are translated back into typed
//! resources.
//!
//! # Module Structure
//!
//! - [`cloud`] - Client context, credentials and HTTP transport
//! - [`resource`] - Resource trait and generic operations
//! - [`compute`] - Compute resources and the [`compute::Compute`] façade
//! - [`bss`] - Billing resources and the [`bss::Bss`] façade
//! - [`config`] - Persistent configuration
//! - [`error`] - Error taxonomy
//!
//! # Example
//!
//! ```ignore
//! use futures::TryStreamExt;
//! use hwcloud::{CloudClient, Config};
//!
//! #[tokio::main]
//! async fn main() -> hwcloud::Result<()> {
//!     let client = CloudClient::new(&Config::load())?;
//!     let compute = client.compute();
//!
//!     let mut servers = compute.servers(true, true, &[("status", "ACTIVE")]);
//!     while let Some(server) = servers.try_next().await? {
//!         println!("{:?} {:?}", server.id, server.name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod bss;
pub mod cloud;
pub mod compute;
pub mod config;
pub mod error;
pub mod resource;

pub use cloud::client::{CloudClient, ServiceType};
pub use config::Config;
pub use error::{Error, Result};
pub use resource::{ListOptions, Resource, ResourceRef};
