//! Implementations of the preview domain's outbound ports backed by the
//! plugin api.

use std::collections::HashMap;

use models_wopi::capability::WopiFileInfo;
use models_wopi::config::FeatureConfig;
use models_wopi::edit_scope::EditScope;
use wopi_preview::domain::ports::{CapabilitySource, ConfigSource, PermissionGateway};

use crate::WopiServiceClient;
use crate::error::ClientError;

impl ConfigSource for WopiServiceClient {
    type Err = ClientError;

    async fn get_feature_config(&self) -> Result<FeatureConfig, ClientError> {
        self.get_config().await
    }
}

impl CapabilitySource for WopiServiceClient {
    type Err = ClientError;

    async fn get_file_list(&self) -> Result<HashMap<String, WopiFileInfo>, ClientError> {
        self.get_wopi_files_list().await
    }
}

impl PermissionGateway for WopiServiceClient {
    type Err = ClientError;

    async fn update_file_permission(
        &self,
        file_id: &str,
        scope: EditScope,
    ) -> Result<(), ClientError> {
        self.update_file_permissions(file_id, scope).await
    }
}
