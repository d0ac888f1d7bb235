//! Server addresses
//!
//! `GET /servers/{id}/ips` answers `{"addresses": {"<label>": [{..}]}}`; the
//! per-network form `GET /servers/{id}/ips/{label}` answers
//! `{"<label>": [{..}]}`. Both are flattened into one [`ServerIp`] per
//! address.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerIp {
    pub network_label: Option<String>,
    pub address: Option<String>,
    pub version: Option<i64>,
    #[serde(rename = "OS-EXT-IPS:type")]
    pub ip_type: Option<String>,
    #[serde(rename = "OS-EXT-IPS-MAC:mac_addr")]
    pub mac_addr: Option<String>,
}

pub(crate) fn ips_path(server_id: &str, network_label: Option<&str>) -> String {
    let base = format!(
        "/servers/{}/ips",
        crate::resource::request::encode_segment(server_id)
    );
    match network_label {
        Some(label) => format!("{}/{}", base, crate::resource::request::encode_segment(label)),
        None => base,
    }
}

/// Flatten an ips response into one entry per address
pub(crate) fn flatten(body: Value, network_label: Option<&str>) -> Vec<ServerIp> {
    let networks = match (network_label, body) {
        (None, Value::Object(mut map)) => map.remove("addresses").unwrap_or(Value::Null),
        (_, body) => body,
    };

    let Value::Object(networks) = networks else {
        return Vec::new();
    };

    let mut ips = Vec::new();
    for (label, addresses) in networks {
        let Value::Array(addresses) = addresses else {
            continue;
        };
        for entry in addresses {
            ips.push(ServerIp {
                network_label: Some(label.clone()),
                address: entry.get("addr").and_then(Value::as_str).map(str::to_string),
                version: entry.get("version").and_then(Value::as_i64),
                ip_type: entry
                    .get("OS-EXT-IPS:type")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                mac_addr: entry
                    .get("OS-EXT-IPS-MAC:mac_addr")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            });
        }
    }
    ips
}
