use jiff::civil::DateTime;

/// All errors produced by nextrun.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ScheduleError {
    /// The configuration's `enabled` flag is false.
    #[error("configuration must be enabled")]
    ConfigurationDisabled,

    /// A one-time target precedes the configuration's current date.
    #[error("target date {target} is earlier than the current date {current}")]
    ConfigurationInPast { target: DateTime, current: DateTime },

    #[error("unsupported configuration: {message}")]
    UnsupportedConfiguration { message: String },

    #[error("invalid interval: {message}")]
    InvalidInterval { message: String },

    #[error("invalid range: {message}")]
    InvalidRange { message: String },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Calendar arithmetic left the supported date range.
    #[error("date out of range: {message}")]
    DateOutOfRange { message: String },

    /// A configuration document could not be decoded or encoded.
    #[cfg(feature = "serde")]
    #[error("invalid configuration document: {message}")]
    Document { message: String },
}

impl ScheduleError {
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedConfiguration {
            message: message.into(),
        }
    }

    pub fn interval(message: impl Into<String>) -> Self {
        Self::InvalidInterval {
            message: message.into(),
        }
    }

    pub fn range(message: impl Into<String>) -> Self {
        Self::InvalidRange {
            message: message.into(),
        }
    }

    pub fn argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn out_of_range(err: impl std::fmt::Display) -> Self {
        Self::DateOutOfRange {
            message: err.to_string(),
        }
    }

    #[cfg(feature = "serde")]
    pub fn document(err: impl std::fmt::Display) -> Self {
        Self::Document {
            message: err.to_string(),
        }
    }

    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConfigurationDisabled => "configuration_disabled",
            Self::ConfigurationInPast { .. } => "configuration_in_past",
            Self::UnsupportedConfiguration { .. } => "unsupported_configuration",
            Self::InvalidInterval { .. } => "invalid_interval",
            Self::InvalidRange { .. } => "invalid_range",
            Self::InvalidArgument { .. } => "invalid_argument",
            Self::DateOutOfRange { .. } => "date_out_of_range",
            #[cfg(feature = "serde")]
            Self::Document { .. } => "document",
        }
    }
}
