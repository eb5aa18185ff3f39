//! Forwarder error taxonomy.

use axum::http::StatusCode;
use thiserror::Error;

use crate::forwarder::route::Route;

/// Message returned when the search route is called without `query`.
pub const QUERY_REQUIRED: &str = "Query parameter is required";

/// Message returned when the dated EPIC route is called without `date`.
pub const DATE_REQUIRED: &str = "Date parameter is required in the format YYYY-MM-DD";

/// Message returned when a search yields no items.
pub const NO_RESULTS: &str = "No results found for your query.";

/// Why a single upstream call failed.
///
/// Operator-facing only. Request errors are stored with their URL stripped,
/// since the URL carries the credential.
#[derive(Debug, Error)]
pub enum UpstreamFailure {
    /// Connect failure, timeout, non-2xx status or body read error.
    #[error("{0}")]
    Request(reqwest::Error),

    /// 2xx response whose body does not have the expected shape.
    #[error("malformed upstream payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Target URL could not be extended with a path segment.
    #[error("upstream target cannot take path segments")]
    InvalidTarget,
}

impl From<reqwest::Error> for UpstreamFailure {
    fn from(err: reqwest::Error) -> Self {
        UpstreamFailure::Request(err.without_url())
    }
}

/// Outcome of a forwarded request that did not succeed.
///
/// `Display` is the client-facing message; it never includes upstream detail.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// Required query parameter absent or empty. No upstream call was made.
    #[error("{0}")]
    MissingParameter(&'static str),

    /// Search succeeded upstream but returned zero items.
    #[error("{}", NO_RESULTS)]
    NoResults,

    /// The upstream call failed.
    #[error("{}", .route.failure_message())]
    Upstream {
        route: Route,
        #[source]
        source: UpstreamFailure,
    },
}

impl ForwardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ForwardError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            ForwardError::NoResults => StatusCode::NOT_FOUND,
            ForwardError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ForwardError::MissingParameter(QUERY_REQUIRED).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ForwardError::NoResults.status_code(), StatusCode::NOT_FOUND);

        let err = ForwardError::Upstream {
            route: Route::Apod,
            source: UpstreamFailure::InvalidTarget,
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_upstream_display_hides_detail() {
        let source = serde_json::from_str::<u32>("\"secret detail\"").unwrap_err();
        let err = ForwardError::Upstream {
            route: Route::EpicSnapshotsByDate,
            source: UpstreamFailure::Malformed(source),
        };
        assert_eq!(err.to_string(), "Failed to fetch EPIC image by date");
        assert!(!err.to_string().contains("secret"));
    }
}
