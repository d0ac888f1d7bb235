//! Servers and server actions

use crate::cloud::client::{CloudClient, ServiceType};
use crate::cloud::http::HttpMethod;
use crate::error::Result;
use crate::resource::ops::call;
use crate::resource::request::encode_segment;
use crate::resource::schema::{Allow, Resource};
use crate::resource::serde_util::opt_int;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// A compute server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "imageRef")]
    pub image_id: Option<String>,
    #[serde(rename = "flavorRef")]
    pub flavor_id: Option<String>,
    pub image: Option<Value>,
    pub flavor: Option<Value>,
    /// Addresses keyed by network label
    pub addresses: Option<Value>,
    pub networks: Option<Value>,
    #[serde(rename = "accessIPv4")]
    pub access_ipv4: Option<String>,
    #[serde(rename = "accessIPv6")]
    pub access_ipv6: Option<String>,
    #[serde(rename = "adminPass")]
    pub admin_password: Option<String>,
    pub availability_zone: Option<String>,
    pub key_name: Option<String>,
    pub metadata: Option<Map<String, Value>>,
    pub security_groups: Option<Vec<Value>>,
    pub user_data: Option<String>,
    pub personality: Option<Vec<Value>>,
    pub block_device_mapping_v2: Option<Vec<Value>>,
    pub config_drive: Option<Value>,
    pub min_count: Option<i64>,
    pub max_count: Option<i64>,
    pub tags: Option<Vec<String>>,
    pub locked: Option<bool>,
    #[serde(deserialize_with = "opt_int::deserialize")]
    pub progress: Option<i64>,
    #[serde(rename = "hostId")]
    pub host_id: Option<String>,
    pub host_status: Option<String>,
    pub tenant_id: Option<String>,
    pub user_id: Option<String>,
    pub created: Option<String>,
    pub updated: Option<String>,
    pub links: Option<Vec<Value>>,
    #[serde(rename = "OS-DCF:diskConfig")]
    pub disk_config: Option<String>,
    #[serde(rename = "OS-EXT-AZ:availability_zone")]
    pub ext_availability_zone: Option<String>,
    #[serde(rename = "OS-EXT-SRV-ATTR:host")]
    pub compute_host: Option<String>,
    #[serde(rename = "OS-EXT-SRV-ATTR:hypervisor_hostname")]
    pub hypervisor_hostname: Option<String>,
    #[serde(rename = "OS-EXT-SRV-ATTR:instance_name")]
    pub instance_name: Option<String>,
    #[serde(rename = "OS-EXT-STS:power_state")]
    pub power_state: Option<i64>,
    #[serde(rename = "OS-EXT-STS:task_state")]
    pub task_state: Option<String>,
    #[serde(rename = "OS-EXT-STS:vm_state")]
    pub vm_state: Option<String>,
    #[serde(rename = "OS-SRV-USG:launched_at")]
    pub launched_at: Option<String>,
    #[serde(rename = "OS-SRV-USG:terminated_at")]
    pub terminated_at: Option<String>,
    #[serde(rename = "os-extended-volumes:volumes_attached")]
    pub attached_volumes: Option<Vec<Value>>,
}

impl Resource for Server {
    const NAME: &'static str = "server";
    const SERVICE: ServiceType = ServiceType::Compute;
    const BASE_PATH: &'static str = "/servers";
    const ALLOW: Allow = Allow::ALL;
    const RESOURCE_KEY: Option<&'static str> = Some("server");
    const RESOURCES_KEY: Option<&'static str> = Some("servers");
    const QUERY_PARAMS: &'static [&'static str] = &[
        "image",
        "flavor",
        "name",
        "status",
        "host",
        "ip",
        "ip6",
        "changes-since",
        "reservation_id",
        "all_tenants",
        "tags",
        "tags-any",
        "not-tags",
        "not-tags-any",
        "sort_key",
        "sort_dir",
    ];
    const DETAIL_SUFFIX: Option<&'static str> = Some("/detail");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RebootType {
    #[default]
    Soft,
    Hard,
}

impl RebootType {
    pub fn as_str(self) -> &'static str {
        match self {
            RebootType::Soft => "SOFT",
            RebootType::Hard => "HARD",
        }
    }
}

/// Stop mode accepted by `os-stop`; uses the same wire values as reboot
pub type StopType = RebootType;

/// Optional attributes of a rebuild
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RebuildOptions {
    #[serde(rename = "imageRef", skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
    #[serde(rename = "accessIPv4", skip_serializing_if = "Option::is_none")]
    pub access_ipv4: Option<String>,
    #[serde(rename = "accessIPv6", skip_serializing_if = "Option::is_none")]
    pub access_ipv6: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personality: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preserve_ephemeral: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_data: Option<String>,
}

/// A request to `POST /servers/{id}/action`
#[derive(Debug, Clone, PartialEq)]
pub enum ServerAction {
    Reboot(RebootType),
    ResetState(String),
    Rebuild {
        name: String,
        admin_password: String,
        options: RebuildOptions,
    },
    Resize(String),
    ConfirmResize,
    RevertResize,
    CreateImage {
        name: String,
        metadata: Option<Map<String, Value>>,
    },
    AddSecurityGroup(String),
    RemoveSecurityGroup(String),
    AddFixedIp(String),
    RemoveFixedIp(String),
    AddFloatingIp {
        address: String,
        fixed_address: Option<String>,
    },
    RemoveFloatingIp(String),
    Pause,
    Unpause,
    Suspend,
    Resume,
    Lock,
    Unlock,
    Rescue {
        admin_password: Option<String>,
        image_id: Option<String>,
    },
    Unrescue,
    Evacuate {
        host: Option<String>,
        admin_password: Option<String>,
        force: Option<bool>,
    },
    Start,
    Stop(StopType),
    Shelve,
    Unshelve,
    ForceDelete,
    ConsoleOutput(Option<u32>),
}

impl ServerAction {
    /// Wire name of the action, the single key of the request body
    pub fn name(&self) -> &'static str {
        match self {
            ServerAction::Reboot(_) => "reboot",
            ServerAction::ResetState(_) => "os-resetState",
            ServerAction::Rebuild { .. } => "rebuild",
            ServerAction::Resize(_) => "resize",
            ServerAction::ConfirmResize => "confirmResize",
            ServerAction::RevertResize => "revertResize",
            ServerAction::CreateImage { .. } => "createImage",
            ServerAction::AddSecurityGroup(_) => "addSecurityGroup",
            ServerAction::RemoveSecurityGroup(_) => "removeSecurityGroup",
            ServerAction::AddFixedIp(_) => "addFixedIp",
            ServerAction::RemoveFixedIp(_) => "removeFixedIp",
            ServerAction::AddFloatingIp { .. } => "addFloatingIp",
            ServerAction::RemoveFloatingIp(_) => "removeFloatingIp",
            ServerAction::Pause => "pause",
            ServerAction::Unpause => "unpause",
            ServerAction::Suspend => "suspend",
            ServerAction::Resume => "resume",
            ServerAction::Lock => "lock",
            ServerAction::Unlock => "unlock",
            ServerAction::Rescue { .. } => "rescue",
            ServerAction::Unrescue => "unrescue",
            ServerAction::Evacuate { .. } => "evacuate",
            ServerAction::Start => "os-start",
            ServerAction::Stop(_) => "os-stop",
            ServerAction::Shelve => "shelve",
            ServerAction::Unshelve => "unshelve",
            ServerAction::ForceDelete => "forceDelete",
            ServerAction::ConsoleOutput(_) => "os-getConsoleOutput",
        }
    }

    fn args(&self) -> Result<Value> {
        let args = match self {
            ServerAction::Reboot(kind) => json!({ "type": kind.as_str() }),
            ServerAction::ResetState(state) => json!({ "state": state }),
            ServerAction::Rebuild {
                name,
                admin_password,
                options,
            } => {
                let mut args = match serde_json::to_value(options)? {
                    Value::Object(map) => map,
                    _ => Map::new(),
                };
                args.insert("name".to_string(), json!(name));
                args.insert("adminPass".to_string(), json!(admin_password));
                Value::Object(args)
            },
            ServerAction::Resize(flavor_id) => json!({ "flavorRef": flavor_id }),
            ServerAction::CreateImage { name, metadata } => {
                let mut args = json!({ "name": name });
                if let Some(metadata) = metadata {
                    args["metadata"] = Value::Object(metadata.clone());
                }
                args
            },
            ServerAction::AddSecurityGroup(name) | ServerAction::RemoveSecurityGroup(name) => {
                json!({ "name": name })
            },
            ServerAction::AddFixedIp(network_id) => json!({ "networkId": network_id }),
            ServerAction::RemoveFixedIp(address) | ServerAction::RemoveFloatingIp(address) => {
                json!({ "address": address })
            },
            ServerAction::AddFloatingIp {
                address,
                fixed_address,
            } => {
                let mut args = json!({ "address": address });
                if let Some(fixed) = fixed_address {
                    args["fixed_address"] = json!(fixed);
                }
                args
            },
            ServerAction::Rescue {
                admin_password,
                image_id,
            } => {
                let mut args = Map::new();
                if let Some(password) = admin_password {
                    args.insert("adminPass".to_string(), json!(password));
                }
                if let Some(image) = image_id {
                    args.insert("rescue_image_ref".to_string(), json!(image));
                }
                Value::Object(args)
            },
            ServerAction::Evacuate {
                host,
                admin_password,
                force,
            } => {
                let mut args = Map::new();
                if let Some(host) = host {
                    args.insert("host".to_string(), json!(host));
                }
                if let Some(password) = admin_password {
                    args.insert("adminPass".to_string(), json!(password));
                }
                if let Some(force) = force {
                    args.insert("force".to_string(), json!(force));
                }
                Value::Object(args)
            },
            ServerAction::Stop(kind) => json!({ "type": kind.as_str() }),
            ServerAction::ConsoleOutput(length) => match length {
                Some(length) => json!({ "length": length }),
                None => json!({}),
            },
            ServerAction::ConfirmResize
            | ServerAction::RevertResize
            | ServerAction::Pause
            | ServerAction::Unpause
            | ServerAction::Suspend
            | ServerAction::Resume
            | ServerAction::Lock
            | ServerAction::Unlock
            | ServerAction::Unrescue
            | ServerAction::Start
            | ServerAction::Shelve
            | ServerAction::Unshelve
            | ServerAction::ForceDelete => Value::Null,
        };
        Ok(args)
    }

    /// Request body: `{"<name>": <args>}`
    pub fn body(&self) -> Result<Value> {
        let mut body = Map::new();
        body.insert(self.name().to_string(), self.args()?);
        Ok(Value::Object(body))
    }
}

/// Perform an action on server `id` and return the response body
pub(crate) async fn perform(client: &CloudClient, id: &str, action: &ServerAction) -> Result<Value> {
    let uri = format!("{}/{}/action", Server::BASE_PATH, encode_segment(id));
    let body = action.body()?;
    tracing::info!("Server {}: {}", id, action.name());
    call::<Server>(client, HttpMethod::Post, &uri, Some(&body)).await
}
