use crate::cloud::client::ServiceType;
use crate::cloud::http::HttpMethod;
use crate::resource::schema::{Allow, Field, Resource};
use serde::{Deserialize, Serialize};

/// The full tag set of a server; create replaces it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    pub server_id: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl Resource for Tag {
    const NAME: &'static str = "tag";
    const SERVICE: ServiceType = ServiceType::Compute;
    const BASE_PATH: &'static str = "/servers/{server_id}/tags";
    const ALLOW: Allow = Allow {
        create: true,
        get: true,
        delete: true,
        ..Allow::NONE
    };
    const FIELDS: &'static [Field] = &[Field::uri("server_id")];
    const REQUIRES_ID: bool = false;
    const CREATE_METHOD: HttpMethod = HttpMethod::Put;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::request::{render_body, render_uri};
    use crate::resource::schema::tests::assert_template_matches_fields;
    use serde_json::json;

    #[test]
    fn template_matches_fields() {
        assert_template_matches_fields::<Tag>();
    }

    #[test]
    fn replaces_tags_without_id() {
        let tag = Tag {
            server_id: Some("s1".to_string()),
            tags: Some(vec!["env=prod".to_string()]),
        };
        assert_eq!(render_uri(&tag, Tag::REQUIRES_ID).unwrap(), "/servers/s1/tags");
        assert_eq!(render_body(&tag, true).unwrap(), json!({"tags": ["env=prod"]}));
    }
}
