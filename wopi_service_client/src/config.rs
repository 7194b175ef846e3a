use crate::error::{ClientError, ResponseExt};
use models_wopi::config::FeatureConfig;

use super::WopiServiceClient;

impl WopiServiceClient {
    /// The client-visible plugin configuration.
    #[tracing::instrument(skip(self))]
    pub async fn get_config(&self) -> Result<FeatureConfig, ClientError> {
        let response = self
            .client
            .get(self.api_url("config"))
            .send()
            .await
            .map_client_error()
            .await?;

        let result = response.json::<FeatureConfig>().await.map_err(|e| {
            ClientError::Generic(anyhow::anyhow!(
                "unable to parse response from config: {}",
                e.to_string()
            ))
        })?;

        Ok(result)
    }
}
