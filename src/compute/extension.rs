use crate::cloud::client::ServiceType;
use crate::resource::schema::{Allow, Resource};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An API extension, addressed by its alias
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Extension {
    pub alias: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub namespace: Option<String>,
    pub updated: Option<String>,
    pub links: Option<Vec<Value>>,
}

impl Resource for Extension {
    const NAME: &'static str = "extension";
    const SERVICE: ServiceType = ServiceType::Compute;
    const BASE_PATH: &'static str = "/extensions";
    const ALLOW: Allow = Allow::READ_ONLY;
    const RESOURCE_KEY: Option<&'static str> = Some("extension");
    const RESOURCES_KEY: Option<&'static str> = Some("extensions");
    const ID_KEY: &'static str = "alias";
}
