//! Project quota sets: the effective quota and the defaults

use crate::cloud::client::ServiceType;
use crate::resource::schema::{Allow, Field, Resource};
use serde::{Deserialize, Serialize};

/// Limits shared by [`Quota`] and [`QuotaDefault`]; `-1` means unlimited
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotaSet {
    pub instances: Option<i64>,
    pub cores: Option<i64>,
    pub ram: Option<i64>,
    pub key_pairs: Option<i64>,
    pub metadata_items: Option<i64>,
    pub security_groups: Option<i64>,
    pub security_group_rules: Option<i64>,
    pub server_groups: Option<i64>,
    pub server_group_members: Option<i64>,
    pub floating_ips: Option<i64>,
    pub fixed_ips: Option<i64>,
    pub injected_files: Option<i64>,
    pub injected_file_content_bytes: Option<i64>,
    pub injected_file_path_bytes: Option<i64>,
}

/// Quota of one project, addressed by project id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quota {
    pub id: Option<String>,
    #[serde(flatten)]
    pub limits: QuotaSet,
}

impl Resource for Quota {
    const NAME: &'static str = "quota";
    const SERVICE: ServiceType = ServiceType::Compute;
    const BASE_PATH: &'static str = "/os-quota-sets";
    const ALLOW: Allow = Allow {
        get: true,
        ..Allow::NONE
    };
    const RESOURCE_KEY: Option<&'static str> = Some("quota_set");
}

/// Default quota applied to new projects
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotaDefault {
    pub project_id: Option<String>,
    pub id: Option<String>,
    #[serde(flatten)]
    pub limits: QuotaSet,
}

impl Resource for QuotaDefault {
    const NAME: &'static str = "default quota";
    const SERVICE: ServiceType = ServiceType::Compute;
    const BASE_PATH: &'static str = "/os-quota-sets/{project_id}/defaults";
    const ALLOW: Allow = Allow {
        get: true,
        ..Allow::NONE
    };
    const RESOURCE_KEY: Option<&'static str> = Some("quota_set");
    const FIELDS: &'static [Field] = &[Field::uri("project_id")];
    const REQUIRES_ID: bool = false;
}
