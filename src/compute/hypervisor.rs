use crate::cloud::client::ServiceType;
use crate::resource::schema::{Allow, Resource};
use crate::resource::serde_util::opt_string;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A compute host's hypervisor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hypervisor {
    #[serde(deserialize_with = "opt_string::deserialize")]
    pub id: Option<String>,
    #[serde(rename = "hypervisor_hostname")]
    pub name: Option<String>,
    pub state: Option<String>,
    pub status: Option<String>,
    pub hypervisor_type: Option<String>,
    pub hypervisor_version: Option<i64>,
    pub host_ip: Option<String>,
    pub vcpus: Option<i64>,
    pub vcpus_used: Option<i64>,
    pub memory_mb: Option<i64>,
    pub memory_mb_used: Option<i64>,
    pub free_ram_mb: Option<i64>,
    pub local_gb: Option<i64>,
    pub local_gb_used: Option<i64>,
    pub free_disk_gb: Option<i64>,
    pub disk_available_least: Option<i64>,
    pub running_vms: Option<i64>,
    pub current_workload: Option<i64>,
    pub cpu_info: Option<Value>,
    pub service: Option<Value>,
}

impl Resource for Hypervisor {
    const NAME: &'static str = "hypervisor";
    const SERVICE: ServiceType = ServiceType::Compute;
    const BASE_PATH: &'static str = "/os-hypervisors";
    const ALLOW: Allow = Allow::READ_ONLY;
    const RESOURCE_KEY: Option<&'static str> = Some("hypervisor");
    const RESOURCES_KEY: Option<&'static str> = Some("hypervisors");
    const NAME_KEY: &'static str = "hypervisor_hostname";
    const QUERY_PARAMS: &'static [&'static str] = &["hypervisor_hostname_pattern", "with_servers"];
    const DETAIL_SUFFIX: Option<&'static str> = Some("/detail");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::schema::name_of;
    use crate::resource::schema::tests::assert_template_matches_fields;
    use serde_json::json;

    #[test]
    fn template_matches_fields() {
        assert_template_matches_fields::<Hypervisor>();
    }

    #[test]
    fn integer_id_and_hostname_name() {
        let hypervisor: Hypervisor =
            serde_json::from_value(json!({"id": 7, "hypervisor_hostname": "cn-node-7", "vcpus": 64}))
                .unwrap();
        assert_eq!(hypervisor.id.as_deref(), Some("7"));
        assert_eq!(name_of(&hypervisor).as_deref(), Some("cn-node-7"));
    }
}
