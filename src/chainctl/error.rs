use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChainError {
    #[error("{0}")]
    Validation(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("backend returned {status}: {detail}")]
    Backend { status: u16, detail: String },

    #[error("failed to close response body: {0}")]
    Close(#[source] std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{primary}; {secondary}")]
    Aggregated {
        primary: Box<ChainError>,
        secondary: Box<ChainError>,
    },
}

impl ChainError {
    pub fn validation(message: impl Into<String>) -> Self {
        ChainError::Validation(message.into())
    }

    /// Appends `other` to this error, keeping both messages.
    pub fn append(self, other: ChainError) -> Self {
        ChainError::Aggregated {
            primary: Box::new(self),
            secondary: Box::new(other),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ChainError::Validation(_))
    }

    /// Flattens an aggregated error into its individual causes, in order.
    pub fn causes(&self) -> Vec<&ChainError> {
        match self {
            ChainError::Aggregated { primary, secondary } => {
                let mut causes = primary.causes();
                causes.extend(secondary.causes());
                causes
            }
            other => vec![other],
        }
    }
}

/// Folds the outcome of releasing a resource into the outcome of the operation
/// that used it. A release failure never replaces an earlier failure.
pub fn combine<T>(outcome: Result<T>, released: Result<()>) -> Result<T> {
    match (outcome, released) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(release_err)) => Err(release_err),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(release_err)) => Err(err.append(release_err)),
    }
}

pub type Result<T> = std::result::Result<T, ChainError>;
