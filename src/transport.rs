//! Network seam of the controller.
//!
//! [`Transport`] hands back the raw status and body so the controller can
//! decide how to read them; [`HttpTransport`] is the [`reqwest`] version.

use crate::errors::ClientError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Status code and body text of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode a successful body, or turn a non-2xx status into [`ClientError::Status`].
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        if !self.is_success() {
            return Err(ClientError::status(self.status, self.body.clone()));
        }
        Ok(serde_json::from_str(&self.body)?)
    }
}

#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn get(&self, url: &str) -> Result<RawResponse, ClientError>;

    async fn post_json(&self, url: &str, body: &Value) -> Result<RawResponse, ClientError>;
}

impl<T: Transport> Transport for &T {
    async fn get(&self, url: &str) -> Result<RawResponse, ClientError> {
        (**self).get(url).await
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<RawResponse, ClientError> {
        (**self).post_json(url, body).await
    }
}

/// [`Transport`] over a pooled [`reqwest::Client`]. No timeout is set.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn read(response: reqwest::Response) -> Result<RawResponse, ClientError> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, ClientError> {
        let response = self.client.get(url).send().await?;
        Self::read(response).await
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<RawResponse, ClientError> {
        let response = self.client.post(url).json(body).send().await?;
        Self::read(response).await
    }
}
