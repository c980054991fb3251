pub type DlResult<T> = Result<T, DlError>;

#[derive(Debug, thiserror::Error)]
pub enum DlError {
    #[error("[HTTP Request Error] {0}")]
    HttpRequestError(::reqwest::Error),

    #[error("[HTTP Middleware Error] {0}")]
    HttpMiddlewareError(String),

    #[error("[HTTP Status Error] [{request}] {status}")]
    HttpStatusError { status: String, request: String },

    #[error("[Invalid] {message}")]
    Invalid { code: &'static str, message: String },

    #[error("[Parse Config Error] {0}")]
    ParseConfigError(#[from] ::confy::ConfyError),

    #[error("[Parse Enum Error] {0}")]
    ParseEnumError(#[from] ::strum::ParseError),

    #[error("[Parse URL Error] {0}")]
    ParseUrlError(#[from] url::ParseError),

    #[error("[Serde JSON Error] {0}")]
    SerdeJsonError(#[from] ::serde_json::Error),

    #[error("[Timeout] {0}")]
    Timeout(#[from] ::tokio::time::error::Elapsed),
}

impl DlError {
    /// Transport-level failures: the provider could not be reached or refused the request.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::HttpRequestError(_)
                | Self::HttpMiddlewareError(_)
                | Self::HttpStatusError { .. }
                | Self::Timeout(_)
        )
    }
}
