//! Flavors and their extra specs

use crate::cloud::client::ServiceType;
use crate::resource::schema::{Allow, Field, Resource};
use crate::resource::serde_util::opt_int;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Flavor {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "opt_int::deserialize")]
    pub vcpus: Option<i64>,
    /// Memory in MB
    #[serde(deserialize_with = "opt_int::deserialize")]
    pub ram: Option<i64>,
    /// Root disk in GB
    #[serde(deserialize_with = "opt_int::deserialize")]
    pub disk: Option<i64>,
    /// Swap in MB; the service sends `""` for none
    #[serde(deserialize_with = "opt_int::deserialize")]
    pub swap: Option<i64>,
    pub rxtx_factor: Option<f64>,
    #[serde(rename = "OS-FLV-EXT-DATA:ephemeral")]
    pub ephemeral: Option<i64>,
    #[serde(rename = "OS-FLV-DISABLED:disabled")]
    pub disabled: Option<bool>,
    #[serde(rename = "os-flavor-access:is_public")]
    pub is_public: Option<bool>,
    pub os_extra_specs: Option<Map<String, Value>>,
    pub links: Option<Vec<Value>>,
}

impl Resource for Flavor {
    const NAME: &'static str = "flavor";
    const SERVICE: ServiceType = ServiceType::Compute;
    const BASE_PATH: &'static str = "/flavors";
    const ALLOW: Allow = Allow {
        update: false,
        ..Allow::ALL
    };
    const RESOURCE_KEY: Option<&'static str> = Some("flavor");
    const RESOURCES_KEY: Option<&'static str> = Some("flavors");
    const QUERY_PARAMS: &'static [&'static str] = &[
        "sort_key",
        "sort_dir",
        "minDisk",
        "minRam",
        "is_public",
        "availability_zone",
    ];
    const DETAIL_SUFFIX: Option<&'static str> = Some("/detail");
}

/// Extra specs of one flavor, e.g. `cond:operation:status`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtraSpecs {
    pub flavor_id: Option<String>,
    pub extra_specs: Option<Map<String, Value>>,
}

impl Resource for ExtraSpecs {
    const NAME: &'static str = "flavor extra specs";
    const SERVICE: ServiceType = ServiceType::Compute;
    const BASE_PATH: &'static str = "/flavors/{flavor_id}/os-extra_specs";
    const ALLOW: Allow = Allow {
        get: true,
        ..Allow::NONE
    };
    const FIELDS: &'static [Field] = &[Field::uri("flavor_id")];
    const REQUIRES_ID: bool = false;
}
