//! Generate Endpoint Client
//!
//! `/generate` への multipart リクエストの組み立てと送信

use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use std::error::Error;
use std::time::Duration;

use crate::domain::repositories::transform_repository::ImageUpload;

/// Name of the multipart field carrying the image
pub const FILE_FIELD: &str = "file";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Thin wrapper around `reqwest::Client` bound to a single endpoint
pub struct GenerateClient {
    client: Client,
    endpoint: String,
}

impl GenerateClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts the image as the single `file` field of a multipart form
    pub async fn post_image(&self, upload: &ImageUpload) -> reqwest::Result<Response> {
        let form = Form::new().part(FILE_FIELD, build_part(upload));
        self.client.post(&self.endpoint).multipart(form).send().await
    }
}

/// Builds the file part, attaching the declared media type when it parses
pub fn build_part(upload: &ImageUpload) -> Part {
    let part = || Part::bytes(upload.data.clone()).file_name(upload.file_name.clone());

    // mime_str は失敗するとパートを返さないので、本体を作る前に型だけ検査する
    if Part::text("").mime_str(&upload.media_type).is_err() {
        return part();
    }
    part()
        .mime_str(&upload.media_type)
        .unwrap_or_else(|_| part())
}

/// Convert error chain to string including all causes
pub fn error_chain_to_string(e: &dyn Error) -> String {
    let mut messages = vec![e.to_string()];
    let mut source = e.source();
    while let Some(cause) = source {
        messages.push(cause.to_string());
        source = cause.source();
    }
    messages.join(": ")
}
