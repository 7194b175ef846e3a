//! Host store post records

use crate::edit_scope::file_permissions_key;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A post as read from the host document store.
///
/// Posts are read only from this plugin's point of view; the only write it
/// ever performs (the edit-scope marker in [Post::props]) goes through the
/// plugin backend, which owns the authoritative copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// The post id
    pub id: String,
    /// Id of the channel the post was sent to
    pub channel_id: String,
    /// Id of the user that authored the post
    pub user_id: String,
    /// Last modification time in epoch millis, bumped by the host on every
    /// server-side change; doubles as the version stamp of this snapshot
    pub update_at: i64,
    /// Arbitrary key-value bag attached to the post by plugins
    #[serde(default)]
    pub props: HashMap<String, serde_json::Value>,
}

impl Post {
    /// The edit-scope marker value for one of this post's file attachments,
    /// if any plugin has written one
    pub fn file_permissions_marker(&self, file_id: &str) -> Option<&serde_json::Value> {
        self.props.get(&file_permissions_key(file_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_reads_the_marker_for_the_right_file() {
        let mut props = HashMap::new();
        props.insert(
            "collabora_file_permissions_fileid".to_string(),
            serde_json::json!("owner"),
        );
        let post = Post {
            id: "postid".to_string(),
            channel_id: "channelid".to_string(),
            user_id: "userid".to_string(),
            update_at: 1,
            props,
        };

        assert_eq!(
            post.file_permissions_marker("fileid"),
            Some(&serde_json::json!("owner"))
        );
        assert_eq!(post.file_permissions_marker("otherfile"), None);
    }

    #[test]
    fn it_defaults_missing_props_when_deserializing() {
        let raw = r#"{"id": "postid", "channel_id": "channelid", "user_id": "userid", "update_at": 1}"#;
        let post: Post = serde_json::from_str(raw).unwrap();
        assert!(post.props.is_empty());
    }
}
