//! Upload page state and the submit workflow.
//!
//! A [`Session`] owns the selected file, the last analysis result and the
//! current route. Submits may overlap: each captures the selection at the
//! moment it is issued, and whichever response resolves last is the result
//! that sticks. Failures are logged and leave the page untouched.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;

use crate::analysis::AnalysisResult;
use crate::error::{Error, Result};
use crate::route::{Route, RouteEvent};
use crate::upload::{SelectedFile, Uploader};

/// Outcome of a single submit.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The response parsed; the page now shows this result.
    Succeeded(AnalysisResult),
    /// The submit failed; the page was left as it was.
    Failed(Error),
}

impl SubmitOutcome {
    /// Whether the submit succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    /// Convert into a `Result`.
    ///
    /// # Errors
    ///
    /// Returns the failure reason of a failed submit.
    pub fn into_result(self) -> Result<AnalysisResult> {
        match self {
            Self::Succeeded(result) => Ok(result),
            Self::Failed(error) => Err(error),
        }
    }
}

/// A navigation that happened because a submit succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
    /// Route navigated to.
    pub route: Route,
    /// Result stored by the submit that caused the navigation.
    pub result: AnalysisResult,
}

/// Point-in-time view of the page state, for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSnapshot {
    /// Current route.
    pub route: Route,
    /// Last successful result, if any.
    pub result: Option<AnalysisResult>,
    /// Name of the selected file, if any.
    pub selected: Option<String>,
}

#[derive(Debug, Default)]
struct PageState {
    selected: Option<Arc<SelectedFile>>,
    result: Option<AnalysisResult>,
    route: Route,
}

/// Handle to the upload page. Cheap to clone; clones share state.
#[derive(Debug)]
pub struct Session<U> {
    uploader: Arc<U>,
    state: Arc<Mutex<PageState>>,
    listeners: Arc<Mutex<Vec<mpsc::UnboundedSender<Navigation>>>>,
}

impl<U> Clone for Session<U> {
    fn clone(&self) -> Self {
        Self {
            uploader: Arc::clone(&self.uploader),
            state: Arc::clone(&self.state),
            listeners: Arc::clone(&self.listeners),
        }
    }
}

impl<U: Uploader + 'static> Session<U> {
    /// Create a page on the upload route with nothing selected.
    #[must_use]
    pub fn new(uploader: U) -> Self {
        Self {
            uploader: Arc::new(uploader),
            state: Arc::new(Mutex::new(PageState::default())),
            listeners: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn state(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Handle a file picker change. `None` (nothing picked) keeps the
    /// previous selection.
    pub fn select_file(&self, selection: Option<SelectedFile>) {
        if let Some(file) = selection {
            tracing::debug!(file = file.name(), bytes = file.len(), "file selected");
            self.state().selected = Some(Arc::new(file));
        }
    }

    /// Submit the current selection.
    ///
    /// The selection is captured when this is called, not when the returned
    /// future is first polled, so changing the selection afterwards does not
    /// affect an in-flight submit.
    pub fn submit(&self) -> impl Future<Output = SubmitOutcome> + Send + 'static {
        let file = self.state().selected.clone();
        let session = self.clone();
        async move { session.complete_submit(file).await }
    }

    async fn complete_submit(&self, file: Option<Arc<SelectedFile>>) -> SubmitOutcome {
        match self.uploader.upload(file.as_deref()).await {
            Ok(body) => {
                let result = AnalysisResult::from_value(body);
                self.navigate(RouteEvent::SubmitSucceeded, &result);
                SubmitOutcome::Succeeded(result)
            }
            Err(error) => {
                tracing::error!(%error, "error uploading file");
                SubmitOutcome::Failed(error)
            }
        }
    }

    fn navigate(&self, event: RouteEvent, result: &AnalysisResult) {
        let mut state = self.state();
        state.result = Some(result.clone());
        state.route = state.route.next(event);
        tracing::info!(path = state.route.path(), "navigated");

        let navigation = Navigation {
            route: state.route,
            result: result.clone(),
        };
        // Sent under the state lock so listeners see navigations in the
        // order results were stored
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|listener| listener.send(navigation.clone()).is_ok());
    }

    /// Current route.
    #[must_use]
    pub fn route(&self) -> Route {
        self.state().route
    }

    /// Last successful result, if any.
    #[must_use]
    pub fn result(&self) -> Option<AnalysisResult> {
        self.state().result.clone()
    }

    /// Name of the selected file, if any.
    #[must_use]
    pub fn selected_file_name(&self) -> Option<String> {
        self.state().selected.as_ref().map(|f| f.name().to_string())
    }

    /// Snapshot of everything needed to render the page.
    #[must_use]
    pub fn snapshot(&self) -> PageSnapshot {
        let state = self.state();
        PageSnapshot {
            route: state.route,
            result: state.result.clone(),
            selected: state.selected.as_ref().map(|f| f.name().to_string()),
        }
    }

    /// Subscribe to navigation events. One event is sent per successful
    /// submit; the queue is unbounded, so a slow listener misses none.
    #[must_use]
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<Navigation> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }
}
