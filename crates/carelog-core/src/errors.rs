/// Core error type for the care log bot.
///
/// Adapter crates map their platform errors into this type so handlers can
/// decide between a fallback acknowledgment and a hard failure.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("invalid selection token: {token:?}")]
    InvalidSelection { token: String },

    #[error("delivery failed: {0}")]
    Delivery(String),
}

impl Error {
    pub fn invalid_selection(token: impl Into<String>) -> Self {
        Self::InvalidSelection {
            token: token.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
