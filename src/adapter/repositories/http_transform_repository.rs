//! HTTP Transform Repository Implementation
//!
//! TransformRepositoryのHTTP実装（`POST {baseUrl}/generate`）

use async_trait::async_trait;
use log::debug;

use crate::adapter::http::client::{error_chain_to_string, GenerateClient};
use crate::domain::error::RemoteError;
use crate::domain::repositories::transform_repository::{ImageUpload, TransformRepository};

/// HTTP変換リポジトリ
pub struct HttpTransformRepository {
    client: GenerateClient,
}

impl HttpTransformRepository {
    /// 新しいリポジトリを作成
    pub fn new(client: GenerateClient) -> Self {
        Self { client }
    }

    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }
}

#[async_trait]
impl TransformRepository for HttpTransformRepository {
    async fn transform(&self, upload: &ImageUpload) -> Result<Vec<u8>, RemoteError> {
        let response = self
            .client
            .post_image(upload)
            .await
            .map_err(|e| RemoteError::Transport(error_chain_to_string(&e)))?;

        let status = response.status();
        debug!("POST {} -> {}", self.client.endpoint(), status);

        if !status.is_success() {
            return Err(RemoteError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| RemoteError::Transport(error_chain_to_string(&e)))?;

        Ok(body.to_vec())
    }
}
