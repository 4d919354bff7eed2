//! Page routes and the single legal transition between them.

use serde::{Deserialize, Serialize};

/// The visible view of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// File picker and submit control. Initial state.
    #[default]
    Upload,
    /// Flags of the last successful submit.
    Result,
}

/// Events that can move the page between routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteEvent {
    /// A submit resolved with a parsed response body.
    SubmitSucceeded,
}

impl Route {
    /// Path of this route.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Upload => "/",
            Self::Result => "/result",
        }
    }

    /// Route for a path, if it is one of ours.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/" => Some(Self::Upload),
            "/result" => Some(Self::Result),
            _ => None,
        }
    }

    /// Apply an event. There is no way back to [`Route::Upload`].
    #[must_use]
    pub fn next(self, event: RouteEvent) -> Self {
        match (self, event) {
            (Self::Upload | Self::Result, RouteEvent::SubmitSucceeded) => Self::Result,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upload => write!(f, "upload"),
            Self::Result => write!(f, "result"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_route_is_upload() {
        assert_eq!(Route::default(), Route::Upload);
    }

    #[test]
    fn test_submit_moves_upload_to_result() {
        assert_eq!(Route::Upload.next(RouteEvent::SubmitSucceeded), Route::Result);
    }

    #[test]
    fn test_result_is_terminal() {
        assert_eq!(Route::Result.next(RouteEvent::SubmitSucceeded), Route::Result);
    }

    #[test]
    fn test_paths_round_trip() {
        for route in [Route::Upload, Route::Result] {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("/settings"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Route::Upload.to_string(), "upload");
        assert_eq!(Route::Result.to_string(), "result");
    }

    #[test]
    fn test_serialize_snake_case() {
        assert_eq!(serde_json::to_string(&Route::Result).unwrap(), "\"result\"");
    }
}
