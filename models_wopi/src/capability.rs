//! WOPI discovery capabilities: which extensions the editor can open and how

use serde::{Deserialize, Serialize};
use strum::Display;

/// A single entry of the discovery map served by the plugin backend.
///
/// The backend marshals these with Go-style field names, hence the upper
/// case wire keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WopiFileInfo {
    /// Url of the editor frontend that handles this extension
    #[serde(rename = "URL")]
    pub url: String,
    /// What the editor can do with this extension
    #[serde(rename = "Action")]
    pub action: WopiAction,
}

/// Action names advertised by WOPI discovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum WopiAction {
    /// The extension can be viewed
    View,
    /// The extension can be edited
    Edit,
    /// The extension can be edited and new files can be created
    #[serde(rename = "editnew")]
    #[strum(serialize = "editnew")]
    EditNew,
    /// The extension can be viewed with commenting enabled
    #[serde(rename = "view_comment")]
    #[strum(serialize = "view_comment")]
    ViewComment,
    /// Any action name this client does not know about
    #[serde(other)]
    Unknown,
}

impl WopiAction {
    /// Whether this action allows modifying the document
    pub fn is_editable(&self) -> bool {
        matches!(self, WopiAction::Edit | WopiAction::EditNew)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cool_asserts::assert_matches;
    use std::collections::HashMap;

    #[test]
    fn it_parses_a_backend_discovery_map() {
        let raw = r#"{
            "docx": {"URL": "https://collabora.example.com/loleaflet/dist/loleaflet.html", "Action": "edit"},
            "pdf": {"URL": "https://collabora.example.com/loleaflet/dist/loleaflet.html", "Action": "view"}
        }"#;

        let map: HashMap<String, WopiFileInfo> = serde_json::from_str(raw).unwrap();

        assert_matches!(map.get("docx"), Some(WopiFileInfo { action: WopiAction::Edit, .. }));
        assert_matches!(map.get("pdf"), Some(WopiFileInfo { action: WopiAction::View, .. }));
        assert_matches!(map.get("png"), None);
    }

    #[test]
    fn it_folds_unknown_actions() {
        let raw = r#"{"URL": "https://example.com", "Action": "present"}"#;
        let info: WopiFileInfo = serde_json::from_str(raw).unwrap();
        assert_eq!(info.action, WopiAction::Unknown);
    }

    #[test]
    fn only_edit_actions_are_editable() {
        assert!(WopiAction::Edit.is_editable());
        assert!(WopiAction::EditNew.is_editable());
        assert!(!WopiAction::View.is_editable());
        assert!(!WopiAction::ViewComment.is_editable());
        assert!(!WopiAction::Unknown.is_editable());
    }
}
