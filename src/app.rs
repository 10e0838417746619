//! Top-level application state.
//!
//! Wires the form's submission to the backend and tracks whether the client
//! is idle, waiting on the backend, showing an error, or showing a result.

use crate::api::{HealthStatus, ProcessingRequest, ProcessingResult, VideoApi};
use crate::error::ApiError;
use crate::form::VideoForm;
use crate::summary::SummaryView;

/// What the client is currently showing.
#[derive(Debug, Clone, Default)]
pub enum AppState {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// A submission is in flight.
    Loading,
    /// The last submission failed with this message.
    Failed(String),
    /// The last submission succeeded.
    Loaded(SummaryView),
}

/// Application container owning the backend client and UI state.
pub struct App<A: VideoApi> {
    api: A,
    form: VideoForm,
    state: AppState,
}

impl<A: VideoApi> App<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            form: VideoForm::new(),
            state: AppState::Idle,
        }
    }

    /// The backend client requests go through.
    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn form(&self) -> &VideoForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut VideoForm {
        &mut self.form
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, AppState::Loading)
    }

    /// Message for the error banner, if the last submission failed.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            AppState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Result view, if the last submission succeeded.
    pub fn result(&self) -> Option<&SummaryView> {
        match &self.state {
            AppState::Loaded(view) => Some(view),
            _ => None,
        }
    }

    pub fn result_mut(&mut self) -> Option<&mut SummaryView> {
        match &mut self.state {
            AppState::Loaded(view) => Some(view),
            _ => None,
        }
    }

    /// Marks a submission as started, clearing any previous error or result.
    pub fn begin_submit(&mut self) {
        self.state = AppState::Loading;
        self.form.set_loading(true);
    }

    /// Records the outcome of a submission.
    pub fn finish_submit(&mut self, outcome: Result<ProcessingResult, ApiError>) {
        self.state = match outcome {
            Ok(result) => AppState::Loaded(SummaryView::new(result)),
            Err(e) => {
                tracing::debug!(error = %e, "submission failed");
                AppState::Failed(e.to_string())
            }
        };
        self.form.set_loading(false);
    }

    /// Sends a validated request to the backend and records the outcome.
    pub async fn handle_submit(&mut self, request: ProcessingRequest) {
        self.begin_submit();
        let outcome = self
            .api
            .process_video(&request.youtube_url, &request.gemini_api_key)
            .await;
        self.finish_submit(outcome);
    }

    /// Validates the form and, when valid, submits it.
    ///
    /// Returns `false` when validation failed or a submission was already in
    /// flight; the form then holds the validation errors.
    pub async fn submit_form(&mut self) -> bool {
        let Some(request) = self.form.submit(|request| request) else {
            return false;
        };
        self.handle_submit(request).await;
        true
    }

    /// Checks backend health.
    pub async fn check_health(&self) -> Result<HealthStatus, ApiError> {
        self.api.check_health().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Chapter;
    use crate::form::Field;
    use async_trait::async_trait;
    use std::sync::Mutex;

    const WATCH_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

    /// Backend double that records calls and replays a fixed outcome.
    struct FakeApi {
        calls: Mutex<Vec<(String, String)>>,
        fail_with: Option<String>,
    }

    impl FakeApi {
        fn ok() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_with: None,
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_with: Some(message.to_string()),
            }
        }
    }

    #[async_trait]
    impl VideoApi for FakeApi {
        async fn process_video(
            &self,
            youtube_url: &str,
            gemini_api_key: &str,
        ) -> Result<ProcessingResult, ApiError> {
            self.calls
                .lock()
                .unwrap()
                .push((youtube_url.to_string(), gemini_api_key.to_string()));

            match &self.fail_with {
                Some(message) => Err(ApiError::Status {
                    status: 400,
                    message: message.clone(),
                }),
                None => Ok(ProcessingResult {
                    video_title: "Test Video".to_string(),
                    duration: "10:30".to_string(),
                    summary: "Summary".to_string(),
                    chapters: vec![Chapter {
                        timestamp: "00:00:00".to_string(),
                        title: "Intro".to_string(),
                        description: "Start".to_string(),
                    }],
                }),
            }
        }

        async fn check_health(&self) -> Result<HealthStatus, ApiError> {
            Ok(HealthStatus {
                status: "healthy".to_string(),
                service: "fake".to_string(),
                version: None,
            })
        }
    }

    #[tokio::test]
    async fn test_successful_submission() {
        let mut app = App::new(FakeApi::ok());
        app.form_mut().set_youtube_url(WATCH_URL);
        app.form_mut().set_gemini_api_key("test-api-key");

        assert!(app.submit_form().await);

        assert!(!app.is_loading());
        assert!(!app.form().is_loading());
        assert_eq!(app.error(), None);
        assert_eq!(app.result().unwrap().result().video_title, "Test Video");
        assert_eq!(
            *app.api.calls.lock().unwrap(),
            vec![(WATCH_URL.to_string(), "test-api-key".to_string())]
        );
    }

    #[tokio::test]
    async fn test_failed_submission_shows_message() {
        let mut app = App::new(FakeApi::failing("Invalid URL"));
        app.form_mut().set_youtube_url(WATCH_URL);
        app.form_mut().set_gemini_api_key("key");

        app.submit_form().await;

        assert_eq!(app.error(), Some("Invalid URL"));
        assert!(app.result().is_none());
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_backend() {
        let mut app = App::new(FakeApi::ok());
        app.form_mut().set_youtube_url("https://invalid-url.com");

        assert!(!app.submit_form().await);

        assert!(app.api.calls.lock().unwrap().is_empty());
        assert!(matches!(app.state(), AppState::Idle));
        assert!(app.form().errors().get(Field::YoutubeUrl).is_some());
        assert!(app.form().errors().get(Field::GeminiApiKey).is_some());
    }

    #[tokio::test]
    async fn test_new_submission_clears_previous_error() {
        let mut app = App::new(FakeApi::ok());
        app.finish_submit(Err(ApiError::Status {
            status: 500,
            message: "boom".to_string(),
        }));
        assert_eq!(app.error(), Some("boom"));

        app.begin_submit();
        assert!(app.is_loading());
        assert!(app.form().is_loading());
        assert_eq!(app.error(), None);
        assert!(app.result().is_none());
    }

    #[tokio::test]
    async fn test_submit_ignored_while_loading() {
        let mut app = App::new(FakeApi::ok());
        app.form_mut().set_youtube_url(WATCH_URL);
        app.form_mut().set_gemini_api_key("key");
        app.begin_submit();

        assert!(!app.submit_form().await);
        assert!(app.api.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_check_health_forwards() {
        let app = App::new(FakeApi::ok());
        assert_eq!(app.check_health().await.unwrap().status, "healthy");
    }
}
