use crate::cloud::client::ServiceType;
use crate::resource::schema::{Allow, Field, Resource};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A port attached to a server, addressed by port id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerInterface {
    pub server_id: Option<String>,
    pub port_id: Option<String>,
    pub net_id: Option<String>,
    pub port_state: Option<String>,
    pub mac_addr: Option<String>,
    pub fixed_ips: Option<Vec<Value>>,
}

impl Resource for ServerInterface {
    const NAME: &'static str = "server interface";
    const SERVICE: ServiceType = ServiceType::Compute;
    const BASE_PATH: &'static str = "/servers/{server_id}/os-interface";
    const ALLOW: Allow = Allow {
        update: false,
        ..Allow::ALL
    };
    const RESOURCE_KEY: Option<&'static str> = Some("interfaceAttachment");
    const RESOURCES_KEY: Option<&'static str> = Some("interfaceAttachments");
    const ID_KEY: &'static str = "port_id";
    const FIELDS: &'static [Field] = &[Field::uri("server_id")];
}
