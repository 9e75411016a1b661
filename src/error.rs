use thiserror::Error;

#[derive(Error, Debug)]
pub enum DrillError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("authentication error: {0}")]
    Auth(String),

    #[error("session expired, sign in again with: drill config set auth.token <token>")]
    SessionExpired,

    #[error("API error: {0}")]
    Api(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid question id '{0}', expected a form like 'T1 Q3'")]
    InvalidQuestionId(String),

    #[error("topic {0} does not exist in this exam")]
    InvalidTopic(u32),

    #[error("request cancelled")]
    Cancelled,

    #[error("{0}")]
    Other(String),
}

impl DrillError {
    /// True when the backend rejected the bearer token.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, DrillError::SessionExpired)
    }
}

pub type Result<T> = std::result::Result<T, DrillError>;
