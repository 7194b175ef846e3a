//! Payloads exchanged with the plugin backend api

use crate::edit_scope::EditScope;
use serde::{Deserialize, Serialize};

/// Response of the collabora url endpoint: everything the client needs to
/// load the editor iframe for one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaboraUrlResponse {
    /// Editor url with the WOPI source already appended
    pub url: String,
    /// Token the client passes to the editor as a POST parameter when
    /// loading the iframe
    pub access_token: String,
}

/// Request body persisting the edit-scope marker for a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateFilePermissionsRequest {
    /// The file whose marker is written
    pub file_id: String,
    /// The scope to persist
    pub permission: EditScope,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_serializes_the_marker_update() {
        let request = UpdateFilePermissionsRequest {
            file_id: "fileid".to_string(),
            permission: EditScope::OwnerOnly,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"file_id": "fileid", "permission": "owner"})
        );
    }

    #[test]
    fn it_parses_the_collabora_url_response() {
        let raw = r#"{"url": "https://collabora.example.com/?WOPISrc=abc", "access_token": "token"}"#;
        let response: CollaboraUrlResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.access_token, "token");
    }
}
