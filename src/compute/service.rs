//! Compute services (`nova-compute`, `nova-scheduler`, ...)

use crate::cloud::client::{CloudClient, ServiceType};
use crate::cloud::http::HttpMethod;
use crate::error::Result;
use crate::resource::ops::call;
use crate::resource::request::translate_response;
use crate::resource::schema::{Allow, Resource};
use crate::resource::serde_util::opt_string;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    #[serde(deserialize_with = "opt_string::deserialize")]
    pub id: Option<String>,
    pub binary: Option<String>,
    pub host: Option<String>,
    pub zone: Option<String>,
    /// `enabled` or `disabled`
    pub status: Option<String>,
    /// `up` or `down`
    pub state: Option<String>,
    pub disabled_reason: Option<String>,
    pub forced_down: Option<bool>,
    pub updated_at: Option<String>,
}

impl Resource for Service {
    const NAME: &'static str = "service";
    const SERVICE: ServiceType = ServiceType::Compute;
    const BASE_PATH: &'static str = "/os-services";
    const ALLOW: Allow = Allow::READ_ONLY;
    const RESOURCE_KEY: Option<&'static str> = Some("service");
    const RESOURCES_KEY: Option<&'static str> = Some("services");
    const NAME_KEY: &'static str = "binary";
    const QUERY_PARAMS: &'static [&'static str] = &["host", "binary"];
}

/// State change of a service on one host
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ServiceChange {
    ForceDown,
    Disable(Option<String>),
    Enable,
}

impl ServiceChange {
    fn path(&self) -> &'static str {
        match self {
            ServiceChange::ForceDown => "force-down",
            ServiceChange::Disable(Some(_)) => "disable-log-reason",
            ServiceChange::Disable(None) => "disable",
            ServiceChange::Enable => "enable",
        }
    }

    fn body(&self, host: &str, binary: &str) -> Value {
        let mut body = json!({ "host": host, "binary": binary });
        match self {
            ServiceChange::ForceDown => body["forced_down"] = json!(true),
            ServiceChange::Disable(Some(reason)) => body["disabled_reason"] = json!(reason),
            ServiceChange::Disable(None) | ServiceChange::Enable => {},
        }
        body
    }
}

/// Apply `change` to `binary` on `host` and return the service as reported
/// back
pub(crate) async fn change(
    client: &CloudClient,
    mut service: Service,
    host: &str,
    binary: &str,
    change: ServiceChange,
) -> Result<Service> {
    let uri = format!("{}/{}", Service::BASE_PATH, change.path());
    let body = change.body(host, binary);
    tracing::info!("Service {} on {}: {}", binary, host, change.path());
    let response = call::<Service>(client, HttpMethod::Put, &uri, Some(&body)).await?;
    translate_response(&mut service, response)?;
    Ok(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::schema::tests::assert_template_matches_fields;

    #[test]
    fn template_matches_fields() {
        assert_template_matches_fields::<Service>();
    }

    #[test]
    fn disable_with_reason_uses_log_reason_path() {
        let change = ServiceChange::Disable(Some("maintenance".to_string()));
        assert_eq!(change.path(), "disable-log-reason");
        assert_eq!(
            change.body("node-1", "nova-compute"),
            json!({"host": "node-1", "binary": "nova-compute", "disabled_reason": "maintenance"})
        );
        assert_eq!(ServiceChange::Disable(None).path(), "disable");
    }

    #[test]
    fn force_down_body() {
        assert_eq!(
            ServiceChange::ForceDown.body("node-1", "nova-compute"),
            json!({"host": "node-1", "binary": "nova-compute", "forced_down": true})
        );
    }
}
