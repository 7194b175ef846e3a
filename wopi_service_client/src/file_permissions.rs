use crate::error::{ClientError, ResponseExt};
use models_wopi::api::UpdateFilePermissionsRequest;
use models_wopi::edit_scope::EditScope;

use super::WopiServiceClient;

impl WopiServiceClient {
    /// Persists the edit scope of one file.
    #[tracing::instrument(skip(self))]
    pub async fn update_file_permissions(
        &self,
        file_id: &str,
        permission: EditScope,
    ) -> Result<(), ClientError> {
        let body = serde_json::to_value(UpdateFilePermissionsRequest {
            file_id: file_id.to_string(),
            permission,
        })
        .map_err(|e| ClientError::Generic(anyhow::anyhow!(e.to_string())))?;

        self.client
            .post(self.api_url("filePermissions"))
            .json(&body)
            .send()
            .await
            .map_client_error()
            .await?;

        Ok(())
    }
}
