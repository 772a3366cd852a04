use thiserror::Error;

/// Everything that can go wrong turning raw trajectory text into a derived journey.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum Error {
    /// A line with too few fields, or a timestamp/coordinate that doesn't parse. `line` is
    /// 1-based.
    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("journey has no samples")]
    EmptyJourney,

    /// The route covers zero distance, so efficiency is undefined.
    #[error("route efficiency is undefined for a journey covering zero distance")]
    DegenerateRoute,

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MalformedRecord { .. } => "malformed_record",
            Self::EmptyJourney => "empty_journey",
            Self::DegenerateRoute => "degenerate_route",
            Self::InvalidConfig(_) => "invalid_config",
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
