//! Compute (ECS / Nova-compatible) service
//!
//! Resource types for `servers`, `flavors`, `os-keypairs` and the other
//! compute collections, plus the [`Compute`] façade reached through
//! [`CloudClient::compute`](crate::CloudClient::compute).

mod availability_zone;
mod extension;
mod flavor;
mod hypervisor;
mod image;
mod instance_action;
mod keypair;
mod limits;
mod metadata;
mod proxy;
mod quota;
mod server;
mod server_group;
mod server_interface;
mod server_ip;
mod service;
mod tag;
mod volume_attachment;

pub use availability_zone::AvailabilityZone;
pub use extension::Extension;
pub use flavor::{ExtraSpecs, Flavor};
pub use hypervisor::Hypervisor;
pub use image::Image;
pub use instance_action::InstanceAction;
pub use keypair::Keypair;
pub use limits::{AbsoluteLimits, Limits};
pub use proxy::{Compute, WaitOptions};
pub use quota::{Quota, QuotaDefault, QuotaSet};
pub use server::{RebootType, RebuildOptions, Server, ServerAction, StopType};
pub use server_group::ServerGroup;
pub use server_interface::ServerInterface;
pub use server_ip::ServerIp;
pub use service::Service;
pub use tag::Tag;
pub use volume_attachment::VolumeAttachment;
