use shared_types::PlaceCategory;
use thiserror::Error;

/// Failure talking to one of the external map services.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("service responded with status {0}")]
    Status(String),
    #[error("malformed response: {0}")]
    Malformed(String),
}

#[cfg(feature = "google")]
impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Transport(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocationFailure {
    #[error("geolocation is not supported")]
    Unsupported,
    #[error("permission to read the location was denied")]
    PermissionDenied,
    #[error("position unavailable")]
    PositionUnavailable,
    #[error("timed out waiting for a position")]
    Timeout,
}

impl LocationFailure {
    /// Maps a W3C `GeolocationPositionError.code`.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => LocationFailure::PermissionDenied,
            3 => LocationFailure::Timeout,
            _ => LocationFailure::PositionUnavailable,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Logged only.
    Silent,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Location,
    Search,
    Details,
    Route,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FinderError {
    #[error("location unavailable: {0}")]
    LocationUnavailable(LocationFailure),
    #[error("{category} search failed: {source}")]
    SearchFailed {
        category: PlaceCategory,
        #[source]
        source: ProviderError,
    },
    #[error("details unavailable for {place_id}: {source}")]
    DetailsUnavailable {
        place_id: String,
        #[source]
        source: ProviderError,
    },
    #[error("route to {place_id} failed: {source}")]
    RouteFailed {
        place_id: String,
        #[source]
        source: ProviderError,
    },
}

impl FinderError {
    pub fn kind(&self) -> FailureKind {
        match self {
            FinderError::LocationUnavailable(_) => FailureKind::Location,
            FinderError::SearchFailed { .. } => FailureKind::Search,
            FinderError::DetailsUnavailable { .. } => FailureKind::Details,
            FinderError::RouteFailed { .. } => FailureKind::Route,
        }
    }

    pub fn severity(&self) -> Severity {
        match self.kind() {
            FailureKind::Location => Severity::Warning,
            FailureKind::Search => Severity::Error,
            FailureKind::Details => Severity::Silent,
            FailureKind::Route => Severity::Warning,
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            FinderError::LocationUnavailable(LocationFailure::Unsupported) => {
                "Geolocation not supported"
            }
            FinderError::LocationUnavailable(_) => {
                "Unable to retrieve your location. Using default location."
            }
            FinderError::SearchFailed { .. } => {
                "Could not fetch nearby hospitals and pharmacies."
            }
            FinderError::DetailsUnavailable { .. } => "Could not load details for this place.",
            FinderError::RouteFailed { .. } => "Driving directions are unavailable for this place.",
        }
    }

    /// What the user gets to see, if anything.
    pub fn notice(&self) -> Option<Notice> {
        match self.severity() {
            Severity::Silent => None,
            severity => Some(Notice {
                severity,
                kind: self.kind(),
                message: self.user_message().to_string(),
            }),
        }
    }

    pub fn log(&self) {
        match self.severity() {
            Severity::Silent => tracing::debug!(error = %self, "recovered silently"),
            Severity::Warning => tracing::warn!(error = %self, "degraded"),
            Severity::Error => tracing::error!(error = %self, "failed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub severity: Severity,
    pub kind: FailureKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
}
