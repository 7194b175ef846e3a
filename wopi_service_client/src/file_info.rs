use crate::error::{ClientError, ResponseExt};
use models_wopi::file::FileListing;

use super::WopiServiceClient;

impl WopiServiceClient {
    /// Name, extension and wopi action for each of the given file ids.
    #[tracing::instrument(skip(self))]
    pub async fn get_file_infos(
        &self,
        file_ids: &[String],
    ) -> Result<Vec<FileListing>, ClientError> {
        // The backend reads the id array from the body of a GET.
        let response = self
            .client
            .get(self.api_url("fileInfo"))
            .json(&file_ids)
            .send()
            .await
            .map_client_error()
            .await?;

        let result = response.json::<Vec<FileListing>>().await.map_err(|e| {
            ClientError::Generic(anyhow::anyhow!(
                "unable to parse response from fileInfo: {}",
                e.to_string()
            ))
        })?;

        Ok(result)
    }
}
