use crate::cloud::client::ServiceType;
use crate::resource::schema::{Allow, Resource};
use serde::{Deserialize, Serialize};

/// An SSH keypair, addressed by its name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Keypair {
    pub name: Option<String>,
    pub public_key: Option<String>,
    /// Only returned when the service generated the key
    pub private_key: Option<String>,
    pub fingerprint: Option<String>,
    #[serde(rename = "type")]
    pub key_type: Option<String>,
    pub user_id: Option<String>,
    pub created_at: Option<String>,
}

impl Resource for Keypair {
    const NAME: &'static str = "keypair";
    const SERVICE: ServiceType = ServiceType::Compute;
    const BASE_PATH: &'static str = "/os-keypairs";
    const ALLOW: Allow = Allow {
        update: false,
        ..Allow::ALL
    };
    const RESOURCE_KEY: Option<&'static str> = Some("keypair");
    const RESOURCES_KEY: Option<&'static str> = Some("keypairs");
    const ID_KEY: &'static str = "name";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::request::{render_body, render_uri, translate_response};
    use crate::resource::schema::tests::assert_template_matches_fields;
    use serde_json::json;

    #[test]
    fn template_matches_fields() {
        assert_template_matches_fields::<Keypair>();
    }

    #[test]
    fn name_is_the_id() {
        let keypair = Keypair {
            name: Some("deploy".to_string()),
            ..Default::default()
        };
        assert_eq!(render_uri(&keypair, true).unwrap(), "/os-keypairs/deploy");
        assert_eq!(
            render_body(&keypair, true).unwrap(),
            json!({"keypair": {"name": "deploy"}})
        );
    }

    #[test]
    fn wrapped_list_items_are_unwrapped() {
        let mut keypair = Keypair::default();
        translate_response(
            &mut keypair,
            json!({"keypair": {"name": "deploy", "fingerprint": "ab:cd", "type": "ssh"}}),
        )
        .unwrap();
        assert_eq!(keypair.name.as_deref(), Some("deploy"));
        assert_eq!(keypair.key_type.as_deref(), Some("ssh"));
    }
}
