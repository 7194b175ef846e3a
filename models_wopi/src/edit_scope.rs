//! The per-file edit-scope marker stored in a post's property bag

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// Namespace prefix for every property-bag key this plugin writes
pub static PLUGIN_NAMESPACE: &str = "collabora";

/// Marker value stored when editing is restricted to the file owner
pub static OWNER_ONLY_MARKER: &str = "owner";
/// Marker value stored when every channel member may edit
pub static CHANNEL_WIDE_MARKER: &str = "channel";

/// Who is allowed to switch a file preview into edit mode.
///
/// The scope is never stored as such; it is derived from the owning post's
/// property bag, where a per-file marker may restrict editing to the owner.
/// An absent marker resolves to [EditScope::ChannelWide].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, IntoStaticStr,
)]
pub enum EditScope {
    /// Only the user that attached the file may edit
    #[serde(rename = "owner")]
    #[strum(serialize = "owner")]
    OwnerOnly,
    /// Every member of the channel may edit
    #[serde(rename = "channel")]
    #[strum(serialize = "channel")]
    ChannelWide,
}

impl EditScope {
    /// The opposite scope, used when toggling
    pub fn flipped(self) -> Self {
        match self {
            EditScope::OwnerOnly => EditScope::ChannelWide,
            EditScope::ChannelWide => EditScope::OwnerOnly,
        }
    }

    /// Resolve the scope encoded by a property-bag marker value.
    ///
    /// Only the exact owner-restricted marker narrows the scope; a missing
    /// marker, a non-string value or any other string resolves channel-wide.
    pub fn from_marker(value: Option<&serde_json::Value>) -> Self {
        match value.and_then(serde_json::Value::as_str) {
            Some(marker) if marker == OWNER_ONLY_MARKER => EditScope::OwnerOnly,
            _ => EditScope::ChannelWide,
        }
    }

    /// The marker string persisted for this scope
    pub fn as_marker(&self) -> &'static str {
        <&'static str>::from(*self)
    }
}

/// Build the property-bag key holding the edit-scope marker for a file.
///
/// Keys follow the `<namespace>_file_permissions_<file id>` convention; this
/// builder is the single place the convention lives.
pub fn file_permissions_key(file_id: &str) -> String {
    format!("{PLUGIN_NAMESPACE}_file_permissions_{file_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_builds_the_marker_key() {
        assert_eq!(
            file_permissions_key("fileid"),
            "collabora_file_permissions_fileid"
        );
    }

    #[test]
    fn it_resolves_the_owner_marker() {
        let value = serde_json::json!("owner");
        assert_eq!(EditScope::from_marker(Some(&value)), EditScope::OwnerOnly);
    }

    #[test]
    fn it_resolves_everything_else_channel_wide() {
        assert_eq!(EditScope::from_marker(None), EditScope::ChannelWide);

        let channel = serde_json::json!("channel");
        assert_eq!(
            EditScope::from_marker(Some(&channel)),
            EditScope::ChannelWide
        );

        let junk = serde_json::json!("something_else");
        assert_eq!(EditScope::from_marker(Some(&junk)), EditScope::ChannelWide);

        let non_string = serde_json::json!(42);
        assert_eq!(
            EditScope::from_marker(Some(&non_string)),
            EditScope::ChannelWide
        );
    }

    #[test]
    fn it_round_trips_the_marker_string() {
        assert_eq!(EditScope::OwnerOnly.as_marker(), OWNER_ONLY_MARKER);
        assert_eq!(EditScope::ChannelWide.as_marker(), CHANNEL_WIDE_MARKER);
        assert_eq!(
            OWNER_ONLY_MARKER.parse::<EditScope>().unwrap(),
            EditScope::OwnerOnly
        );
    }

    #[test]
    fn it_flips() {
        assert_eq!(EditScope::OwnerOnly.flipped(), EditScope::ChannelWide);
        assert_eq!(EditScope::ChannelWide.flipped(), EditScope::OwnerOnly);
    }
}
