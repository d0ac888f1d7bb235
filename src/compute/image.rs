use crate::cloud::client::ServiceType;
use crate::resource::schema::{Allow, Resource};
use crate::resource::serde_util::opt_int;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An image as seen through the compute API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub id: Option<String>,
    pub name: Option<String>,
    pub status: Option<String>,
    #[serde(deserialize_with = "opt_int::deserialize")]
    pub progress: Option<i64>,
    #[serde(rename = "minDisk", deserialize_with = "opt_int::deserialize")]
    pub min_disk: Option<i64>,
    #[serde(rename = "minRam", deserialize_with = "opt_int::deserialize")]
    pub min_ram: Option<i64>,
    pub metadata: Option<Map<String, Value>>,
    /// Server the image was created from
    pub server: Option<Value>,
    #[serde(rename = "OS-EXT-IMG-SIZE:size")]
    pub size: Option<i64>,
    pub created: Option<String>,
    pub updated: Option<String>,
    pub links: Option<Vec<Value>>,
}

impl Resource for Image {
    const NAME: &'static str = "image";
    const SERVICE: ServiceType = ServiceType::Compute;
    const BASE_PATH: &'static str = "/images";
    const ALLOW: Allow = Allow {
        delete: true,
        ..Allow::READ_ONLY
    };
    const RESOURCE_KEY: Option<&'static str> = Some("image");
    const RESOURCES_KEY: Option<&'static str> = Some("images");
    const QUERY_PARAMS: &'static [&'static str] = &[
        "server",
        "name",
        "status",
        "minDisk",
        "minRam",
        "type",
        "changes-since",
    ];
    const DETAIL_SUFFIX: Option<&'static str> = Some("/detail");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::schema::tests::assert_template_matches_fields;

    #[test]
    fn template_matches_fields() {
        assert_template_matches_fields::<Image>();
    }

    #[test]
    fn create_is_not_supported() {
        assert!(!Image::ALLOW.create);
        assert!(Image::ALLOW.delete);
    }
}
