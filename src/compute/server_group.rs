use crate::cloud::client::ServiceType;
use crate::resource::schema::{Allow, Resource};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A placement group of servers (affinity / anti-affinity)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerGroup {
    pub id: Option<String>,
    pub name: Option<String>,
    pub policies: Option<Vec<String>>,
    #[serde(rename = "members")]
    pub member_ids: Option<Vec<String>>,
    pub metadata: Option<Map<String, Value>>,
    pub project_id: Option<String>,
    pub user_id: Option<String>,
}

impl Resource for ServerGroup {
    const NAME: &'static str = "server group";
    const SERVICE: ServiceType = ServiceType::Compute;
    const BASE_PATH: &'static str = "/os-server-groups";
    const ALLOW: Allow = Allow {
        update: false,
        ..Allow::ALL
    };
    const RESOURCE_KEY: Option<&'static str> = Some("server_group");
    const RESOURCES_KEY: Option<&'static str> = Some("server_groups");
    const QUERY_PARAMS: &'static [&'static str] = &["all_projects"];
}
