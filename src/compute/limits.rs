use crate::cloud::client::ServiceType;
use crate::resource::schema::{Allow, Resource};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Absolute limits and current usage of the project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AbsoluteLimits {
    pub max_image_meta: Option<i64>,
    pub max_personality: Option<i64>,
    pub max_personality_size: Option<i64>,
    pub max_security_group_rules: Option<i64>,
    pub max_security_groups: Option<i64>,
    pub max_server_meta: Option<i64>,
    pub max_server_groups: Option<i64>,
    pub max_server_group_members: Option<i64>,
    pub max_total_cores: Option<i64>,
    pub max_total_floating_ips: Option<i64>,
    pub max_total_instances: Option<i64>,
    pub max_total_keypairs: Option<i64>,
    #[serde(rename = "maxTotalRAMSize")]
    pub max_total_ram_size: Option<i64>,
    pub total_cores_used: Option<i64>,
    pub total_floating_ips_used: Option<i64>,
    pub total_instances_used: Option<i64>,
    #[serde(rename = "totalRAMUsed")]
    pub total_ram_used: Option<i64>,
    pub total_security_groups_used: Option<i64>,
    pub total_server_groups_used: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub absolute: Option<AbsoluteLimits>,
    /// Rate limits, grouped by URI
    pub rate: Option<Vec<Value>>,
}

impl Resource for Limits {
    const NAME: &'static str = "limits";
    const SERVICE: ServiceType = ServiceType::Compute;
    const BASE_PATH: &'static str = "/limits";
    const ALLOW: Allow = Allow {
        get: true,
        ..Allow::NONE
    };
    const RESOURCE_KEY: Option<&'static str> = Some("limits");
    const REQUIRES_ID: bool = false;
}
