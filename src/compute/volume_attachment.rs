use crate::cloud::client::ServiceType;
use crate::resource::schema::{Allow, Field, Resource};
use serde::{Deserialize, Serialize};

/// A volume attached to a server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeAttachment {
    pub server_id: Option<String>,
    /// Attachment id; equal to the volume id
    pub id: Option<String>,
    pub device: Option<String>,
    #[serde(rename = "serverId")]
    pub attached_server_id: Option<String>,
    #[serde(rename = "volumeId")]
    pub volume_id: Option<String>,
}

impl Resource for VolumeAttachment {
    const NAME: &'static str = "volume attachment";
    const SERVICE: ServiceType = ServiceType::Compute;
    const BASE_PATH: &'static str = "/servers/{server_id}/os-volume_attachments";
    const ALLOW: Allow = Allow::ALL;
    const RESOURCE_KEY: Option<&'static str> = Some("volumeAttachment");
    const RESOURCES_KEY: Option<&'static str> = Some("volumeAttachments");
    const FIELDS: &'static [Field] = &[Field::uri("server_id")];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::resource::request::{render_body, render_uri};
    use crate::resource::schema::tests::assert_template_matches_fields;
    use serde_json::json;

    #[test]
    fn template_matches_fields() {
        assert_template_matches_fields::<VolumeAttachment>();
    }

    #[test]
    fn attach_request() {
        let attachment = VolumeAttachment {
            server_id: Some("s1".to_string()),
            volume_id: Some("v1".to_string()),
            device: Some("/dev/sdb".to_string()),
            ..Default::default()
        };
        assert_eq!(
            render_uri(&attachment, false).unwrap(),
            "/servers/s1/os-volume_attachments"
        );
        assert_eq!(
            render_body(&attachment, true).unwrap(),
            json!({"volumeAttachment": {"volumeId": "v1", "device": "/dev/sdb"}})
        );
    }

    #[test]
    fn detach_without_server_is_rejected() {
        let attachment = VolumeAttachment {
            id: Some("v1".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            render_uri(&attachment, true),
            Err(Error::MissingParameter(p)) if p == "server_id"
        ));
    }
}
