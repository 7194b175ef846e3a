//! State and permission models of the file preview

use models_wopi::{edit_scope::EditScope, post::Post, user::User};
use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

/// The file a preview is looking at, together with the post that owns it.
///
/// Permission state lives on the owning post, so the pair travels together
/// through every derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewTarget {
    /// The previewed file id
    pub file_id: String,
    /// Id of the post the file is attached to
    pub post_id: String,
}

impl From<&models_wopi::file::FileInfo> for PreviewTarget {
    fn from(file: &models_wopi::file::FileInfo) -> Self {
        PreviewTarget {
            file_id: file.id.clone(),
            post_id: file.post_id.clone(),
        }
    }
}

/// Permission state derived for one (post, user, file) combination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedPermissions {
    /// Whether the current user authored the owning post
    pub is_owner: bool,
    /// Who is allowed to edit the file
    pub edit_scope: EditScope,
    /// Whether the current user may switch the preview into edit mode
    pub can_edit: bool,
}

impl DerivedPermissions {
    /// Derive the permission state for one file from a post snapshot.
    ///
    /// A post missing from the store never grants ownership. With the
    /// feature gate off the scope always resolves channel-wide, whatever
    /// marker the property bag holds. The owner may edit regardless of
    /// scope; everyone else only when the scope is channel-wide.
    pub fn derive(post: Option<&Post>, user: &User, file_id: &str, feature_enabled: bool) -> Self {
        let is_owner = post.is_some_and(|post| post.user_id == user.id);
        let edit_scope = if feature_enabled {
            EditScope::from_marker(post.and_then(|post| post.file_permissions_marker(file_id)))
        } else {
            EditScope::ChannelWide
        };
        DerivedPermissions {
            is_owner,
            edit_scope,
            can_edit: is_owner || edit_scope == EditScope::ChannelWide,
        }
    }

    /// The same permissions under a different scope, with `can_edit`
    /// recomputed to match
    pub fn with_scope(self, edit_scope: EditScope) -> Self {
        DerivedPermissions {
            is_owner: self.is_owner,
            edit_scope,
            can_edit: self.is_owner || edit_scope == EditScope::ChannelWide,
        }
    }
}

/// A snapshot of the preview modal as the host renders it.
///
/// Recreated fresh on every open; `visible` reports the underlying open
/// state and deliberately ignores competing surfaces, see
/// [crate::domain::services::PreviewService::is_presented].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewModal {
    /// Whether a preview is open
    pub visible: bool,
    /// The previewed file when open
    pub target_file_id: Option<String>,
    /// Whether the preview is in edit mode rather than view mode
    pub editable: bool,
    /// Whether a scope toggle for the previewed file is awaiting the backend
    pub pending_scope_change: bool,
}

/// Lifecycle of one optimistic edit-scope change.
///
/// `Pending` covers the window between the local flip and the backend
/// answer; a failed persistence ends in `RolledBack` carrying the scope
/// that was restored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ScopeChange {
    /// No change was ever requested for the file
    #[default]
    Idle,
    /// A change is awaiting the backend
    Pending {
        /// The scope before the optimistic flip
        prior: EditScope,
        /// The optimistically applied scope
        next: EditScope,
    },
    /// The backend accepted the last change
    Committed {
        /// The persisted scope
        scope: EditScope,
    },
    /// The backend rejected the last change and the flip was reverted
    RolledBack {
        /// The scope restored by the rollback
        scope: EditScope,
    },
}

impl ScopeChange {
    /// Whether a change is currently awaiting the backend
    pub fn is_pending(&self) -> bool {
        matches!(self, ScopeChange::Pending { .. })
    }
}

/// Errors produced by the preview permission services
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// The configuration fetch failed and the feature gate stays off
    #[error("plugin configuration unavailable: {0}")]
    ConfigUnavailable(#[source] anyhow::Error),
    /// The capability fetch failed and the extension cache stays empty
    #[error("wopi file list unavailable: {0}")]
    CapabilityFetchFailed(#[source] anyhow::Error),
    /// The backend rejected a scope change and local state was rolled back
    #[error("edit permission update rejected for file {file_id}: {source}")]
    PermissionUpdateRejected {
        /// The file whose marker update was rejected
        file_id: String,
        /// The backend failure
        source: anyhow::Error,
    },
    /// An edit toggle was attempted by a user the resolved scope locks out
    #[error("editing file {file_id} is not permitted for the current user")]
    EditNotPermitted {
        /// The file the toggle was aimed at
        file_id: String,
    },
    /// A scope toggle was attempted while the edit-permissions feature is off
    #[error("the edit permissions feature is disabled")]
    FeatureDisabled,
    /// A modal operation was attempted with no preview open
    #[error("no file preview is open")]
    ModalClosed,
}
