use std::collections::HashMap;

use crate::error::{ClientError, ResponseExt};
use models_wopi::capability::WopiFileInfo;

use super::WopiServiceClient;

impl WopiServiceClient {
    /// The extension to capability map advertised by WOPI discovery.
    /// Extensions the editor cannot handle are simply absent.
    #[tracing::instrument(skip(self))]
    pub async fn get_wopi_files_list(&self) -> Result<HashMap<String, WopiFileInfo>, ClientError> {
        let response = self
            .client
            .get(self.api_url("wopiFileList"))
            .send()
            .await
            .map_client_error()
            .await?;

        let result = response
            .json::<HashMap<String, WopiFileInfo>>()
            .await
            .map_err(|e| {
                ClientError::Generic(anyhow::anyhow!(
                    "unable to parse response from wopiFileList: {}",
                    e.to_string()
                ))
            })?;

        Ok(result)
    }
}
