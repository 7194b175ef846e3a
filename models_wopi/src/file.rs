//! File attachment records

use crate::capability::WopiAction;
use serde::{Deserialize, Serialize};

/// Metadata of a file attachment as the host hands it to the preview.
///
/// Immutable once fetched; permission state lives on the owning post, not
/// here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    /// The file id
    pub id: String,
    /// The file name including its extension
    pub name: String,
    /// The lowercased extension without the leading dot
    pub extension: String,
    /// Id of the post the file is attached to
    pub post_id: String,
}

/// One row of the editable-files listing returned by the plugin backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileListing {
    /// The file id
    pub id: String,
    /// The file name including its extension
    pub name: String,
    /// The lowercased extension without the leading dot
    pub extension: String,
    /// What the editor can do with this file
    pub action: WopiAction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_parses_the_editable_files_listing() {
        let raw = r#"[{"id": "fileid", "name": "report.docx", "extension": "docx", "action": "edit"}]"#;
        let listing: Vec<FileListing> = serde_json::from_str(raw).unwrap();
        assert_eq!(listing[0].action, WopiAction::Edit);
        assert_eq!(listing[0].name, "report.docx");
    }
}
