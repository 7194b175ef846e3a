//! This module defines all of the ports that the preview domain requires

use models_wopi::{
    capability::WopiFileInfo, channel::Channel, config::FeatureConfig, edit_scope::EditScope,
    post::Post, user::User,
};
use std::collections::HashMap;

/// Read access to the host document store.
///
/// Reads are synchronous snapshot lookups; the host pushes fresh state and
/// every derivation simply sees whatever was most recently stored.
pub trait DocumentStore: Send + Sync + 'static {
    /// get a post by id, `None` when the store holds no copy of it
    fn get_post(&self, post_id: &str) -> Option<Post>;

    /// get the authenticated user the ui is acting for
    fn get_current_user(&self) -> User;

    /// get a channel by id
    fn get_channel(&self, channel_id: &str) -> Option<Channel>;

    /// whether a competing exclusive surface (such as an active meeting)
    /// currently owns the screen
    fn exclusive_surface_active(&self) -> bool;
}

/// trait for fetching the client-visible plugin configuration
pub trait ConfigSource: Send + Sync + 'static {
    /// The error type that can occur
    type Err: Send;

    /// fetch the configuration from the plugin backend
    fn get_feature_config(&self) -> impl Future<Output = Result<FeatureConfig, Self::Err>> + Send;
}

/// trait for fetching the WOPI discovery capability map
pub trait CapabilitySource: Send + Sync + 'static {
    /// The error type that can occur
    type Err: Send;

    /// fetch the extension to capability map from the plugin backend
    fn get_file_list(
        &self,
    ) -> impl Future<Output = Result<HashMap<String, WopiFileInfo>, Self::Err>> + Send;
}

/// trait for persisting the per-file edit-scope marker.
///
/// This is the only mutation the preview ever performs against the outside
/// world.
pub trait PermissionGateway: Send + Sync + 'static {
    /// The error type that can occur
    type Err: Send;

    /// write the marker for the input file
    fn update_file_permission(
        &self,
        file_id: &str,
        scope: EditScope,
    ) -> impl Future<Output = Result<(), Self::Err>> + Send;
}
