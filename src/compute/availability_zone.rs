use crate::cloud::client::ServiceType;
use crate::resource::schema::{Allow, Resource};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailabilityZone {
    #[serde(rename = "zoneName")]
    pub name: Option<String>,
    /// `{"available": bool}`
    #[serde(rename = "zoneState")]
    pub state: Option<Value>,
    /// Hosts and their services; only in the detailed listing
    pub hosts: Option<Value>,
}

impl Resource for AvailabilityZone {
    const NAME: &'static str = "availability zone";
    const SERVICE: ServiceType = ServiceType::Compute;
    const BASE_PATH: &'static str = "/os-availability-zone";
    const ALLOW: Allow = Allow {
        list: true,
        ..Allow::NONE
    };
    const RESOURCES_KEY: Option<&'static str> = Some("availabilityZoneInfo");
    const ID_KEY: &'static str = "zoneName";
    const NAME_KEY: &'static str = "zoneName";
    const DETAIL_SUFFIX: Option<&'static str> = Some("/detail");
}

impl AvailabilityZone {
    pub fn is_available(&self) -> bool {
        self.state
            .as_ref()
            .and_then(|s| s.get("available"))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::schema::tests::assert_template_matches_fields;
    use serde_json::json;

    #[test]
    fn template_matches_fields() {
        assert_template_matches_fields::<AvailabilityZone>();
    }

    #[test]
    fn availability_comes_from_zone_state() {
        let zone: AvailabilityZone =
            serde_json::from_value(json!({"zoneName": "cn-north-4a", "zoneState": {"available": true}, "hosts": null}))
                .unwrap();
        assert!(zone.is_available());
        assert!(!AvailabilityZone::default().is_available());
    }
}
