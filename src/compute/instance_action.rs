use crate::cloud::client::ServiceType;
use crate::resource::schema::{Allow, Field, Resource};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One recorded action on a server, addressed by its request id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceAction {
    pub server_id: Option<String>,
    pub request_id: Option<String>,
    pub action: Option<String>,
    pub instance_uuid: Option<String>,
    pub message: Option<String>,
    pub project_id: Option<String>,
    pub user_id: Option<String>,
    pub start_time: Option<String>,
    pub updated_at: Option<String>,
    /// Only present when fetching a single action
    pub events: Option<Vec<Value>>,
}

impl Resource for InstanceAction {
    const NAME: &'static str = "instance action";
    const SERVICE: ServiceType = ServiceType::Compute;
    const BASE_PATH: &'static str = "/servers/{server_id}/os-instance-actions";
    const ALLOW: Allow = Allow::READ_ONLY;
    const RESOURCE_KEY: Option<&'static str> = Some("instanceAction");
    const RESOURCES_KEY: Option<&'static str> = Some("instanceActions");
    const ID_KEY: &'static str = "request_id";
    const NAME_KEY: &'static str = "action";
    const FIELDS: &'static [Field] = &[Field::uri("server_id")];
}
