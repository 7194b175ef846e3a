use crate::error::{ClientError, ResponseExt};
use models_wopi::api::CollaboraUrlResponse;

use super::WopiServiceClient;

impl WopiServiceClient {
    /// The editor url and access token the client needs to load the editor
    /// iframe for one file.
    #[tracing::instrument(skip(self))]
    pub async fn get_collabora_online_url(
        &self,
        file_id: &str,
    ) -> Result<CollaboraUrlResponse, ClientError> {
        let response = self
            .client
            .get(self.api_url("collaboraURL"))
            .query(&[("file_id", file_id)])
            .send()
            .await
            .map_client_error()
            .await?;

        let result = response.json::<CollaboraUrlResponse>().await.map_err(|e| {
            ClientError::Generic(anyhow::anyhow!(
                "unable to parse response from collaboraURL: {}",
                e.to_string()
            ))
        })?;

        Ok(result)
    }
}
