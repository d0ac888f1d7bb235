//! Cloud API plumbing
//!
//! Everything between a façade call and the wire: the explicit client context,
//! token handling and the HTTP transport.
//!
//! # Module Structure
//!
//! - [`auth`] - Pre-issued IAM token holder
//! - [`client`] - Client context: endpoint resolution, microversions, requests
//! - [`http`] - HTTP transport and vendor error extraction
//!
//! # Example
//!
//! ```ignore
//! use hwcloud::{CloudClient, Config};
//!
//! async fn example() -> hwcloud::Result<()> {
//!     let client = CloudClient::new(&Config::load())?;
//!     let server = client.compute().get_server("0b5f2bd3-...").await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod http;
