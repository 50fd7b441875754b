use thiserror::Error;

/// Problems found while turning a rule's source pattern into a [`crate::Pattern`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("pattern `{0}` matches nothing")]
    Empty(String),

    #[error("unsupported syntax `{token}` in pattern `{pattern}`")]
    Unsupported { pattern: String, token: String },

    #[error("unterminated character class in pattern `{0}`")]
    UnterminatedClass(String),

    #[error("word-boundary anchor in the middle of pattern `{0}`")]
    MisplacedAnchor(String),
}

/// Reasons a definition could not be produced. Callers of
/// [`crate::suggest`] never see these: every variant means "no definition".
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("definition lookup is disabled")]
    Disabled,

    #[error("invalid lookup endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("lookup service answered HTTP {0}")]
    Status(u16),

    #[error("malformed lookup payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("no definition in lookup payload")]
    NoDefinition,
}
