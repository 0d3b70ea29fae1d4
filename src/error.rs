use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error("product '{0}' not found")]
    ProductNotFound(u64),

    #[error("could not load product '{id}': {message}")]
    ProductUnavailable { id: u64, message: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("catalog API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl StorefrontError {
    /// True when the request never produced a usable response (network, DNS,
    /// timeout). Everything else is a data failure.
    pub fn is_transport(&self) -> bool {
        match self {
            StorefrontError::Http(e) => e.status().is_none() && !e.is_decode(),
            StorefrontError::Io(_) => true,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, StorefrontError>;
