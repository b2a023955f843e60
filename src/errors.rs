/// Transport-tier failures. Application rejections travel as
/// [`MutationOutcome::Rejected`](crate::models::MutationOutcome) instead.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-2xx status whose body was not a recognizable outcome.
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// A 2xx body that does not have the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }
}
