use thiserror::Error;

/// All errors that can occur in mangahub-core.
///
/// Id-addressed store mutations never produce these: an unknown id is a
/// silent no-op there. Errors come from parsing user text, loading config and
/// loading seed data.
#[derive(Debug, Error)]
pub enum MangaHubError {
    #[error("Manga not found: {0}")]
    MangaNotFound(String),

    #[error("Invalid {kind}: {value}")]
    InvalidValue { kind: &'static str, value: String },

    #[error("Seed data error: {0}")]
    SeedError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl MangaHubError {
    pub(crate) fn invalid(kind: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            kind,
            value: value.into(),
        }
    }
}

/// Exit codes used by the `mangahub` binary.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    NotFound = 2,
    InvalidArgs = 3,
}

impl From<&MangaHubError> for ExitCode {
    fn from(err: &MangaHubError) -> Self {
        match err {
            MangaHubError::MangaNotFound(_) => Self::NotFound,
            MangaHubError::InvalidValue { .. } => Self::InvalidArgs,
            _ => Self::GeneralError,
        }
    }
}

pub type Result<T> = std::result::Result<T, MangaHubError>;
