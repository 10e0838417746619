//! Input form for a summarization request.
//!
//! Holds the two text fields and the validation error map. Validation runs
//! on submit and the error map is rebuilt from scratch on every attempt.

use crate::api::ProcessingRequest;
use crate::console::Console;
use crate::utils::mask_secret;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

/// Accepted YouTube URL shapes: watch, short link, and embed.
///
/// Token classes exclude U+FEFF along with `\s`, which is what browsers count
/// as whitespace.
static YOUTUBE_URL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"youtube\.com/watch\?v=[^&\s\x{FEFF}]+").expect("Invalid watch URL pattern"),
        Regex::new(r"youtu\.be/[^?\s\x{FEFF}]+").expect("Invalid short URL pattern"),
        Regex::new(r"youtube\.com/embed/[^?\s\x{FEFF}]+").expect("Invalid embed URL pattern"),
    ]
});

pub const URL_REQUIRED: &str = "YouTube URL is required";
pub const URL_INVALID: &str = "Please enter a valid YouTube URL";
pub const KEY_REQUIRED: &str = "Gemini API key is required";

pub const SUBMIT_LABEL: &str = "Summarize Video";
pub const SUBMIT_LABEL_LOADING: &str = "Processing...";

/// Where users can obtain a Gemini key.
pub const API_KEY_HELP_URL: &str = "https://makersuite.google.com/app/apikey";

/// A form field that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    YoutubeUrl,
    GeminiApiKey,
}

impl Field {
    /// Label shown next to the field.
    pub fn label(self) -> &'static str {
        match self {
            Field::YoutubeUrl => "YouTube URL",
            Field::GeminiApiKey => "Gemini API Key",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Field-to-message map produced by one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    /// Returns the message for a field, if it failed validation.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }
}

/// Whitespace as browsers trim it: Unicode whitespace plus the BOM.
fn is_blank_char(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Whether a field value is empty once browser-style whitespace is trimmed.
pub fn is_blank(value: &str) -> bool {
    value.trim_matches(is_blank_char).is_empty()
}

/// Checks a URL against the accepted YouTube URL shapes.
pub fn is_valid_youtube_url(url: &str) -> bool {
    YOUTUBE_URL_PATTERNS.iter().any(|p| p.is_match(url))
}

/// Validates raw field values.
///
/// On success the values are returned exactly as given, without trimming.
pub fn validate(
    youtube_url: &str,
    gemini_api_key: &str,
) -> Result<ProcessingRequest, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if is_blank(youtube_url) {
        errors.insert(Field::YoutubeUrl, URL_REQUIRED);
    } else if !is_valid_youtube_url(youtube_url) {
        errors.insert(Field::YoutubeUrl, URL_INVALID);
    }

    if is_blank(gemini_api_key) {
        errors.insert(Field::GeminiApiKey, KEY_REQUIRED);
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ProcessingRequest {
        youtube_url: youtube_url.to_string(),
        gemini_api_key: gemini_api_key.to_string(),
    })
}

/// Returns the submit control label for the loading state.
pub fn submit_label(is_loading: bool) -> &'static str {
    if is_loading {
        SUBMIT_LABEL_LOADING
    } else {
        SUBMIT_LABEL
    }
}

/// State of the input form.
#[derive(Debug, Clone, Default)]
pub struct VideoForm {
    youtube_url: String,
    gemini_api_key: String,
    errors: ValidationErrors,
    is_loading: bool,
}

impl VideoForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn youtube_url(&self) -> &str {
        &self.youtube_url
    }

    pub fn gemini_api_key(&self) -> &str {
        &self.gemini_api_key
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Sets the in-flight flag supplied by the container.
    pub fn set_loading(&mut self, is_loading: bool) {
        self.is_loading = is_loading;
    }

    /// Updates the URL field. Ignored while a submission is in flight.
    pub fn set_youtube_url(&mut self, value: impl Into<String>) {
        if !self.is_loading {
            self.youtube_url = value.into();
        }
    }

    /// Updates the API key field. Ignored while a submission is in flight.
    pub fn set_gemini_api_key(&mut self, value: impl Into<String>) {
        if !self.is_loading {
            self.gemini_api_key = value.into();
        }
    }

    /// Validates the fields and, if valid, hands the request to `on_submit`.
    ///
    /// Returns `None` without calling `on_submit` when validation fails or a
    /// submission is already in flight. The error map is replaced on every
    /// validating attempt.
    pub fn submit<F, R>(&mut self, on_submit: F) -> Option<R>
    where
        F: FnOnce(ProcessingRequest) -> R,
    {
        if self.is_loading {
            return None;
        }

        match validate(&self.youtube_url, &self.gemini_api_key) {
            Ok(request) => {
                self.errors = ValidationErrors::new();
                Some(on_submit(request))
            }
            Err(errors) => {
                tracing::debug!(count = errors.len(), "form validation failed");
                self.errors = errors;
                None
            }
        }
    }

    /// Renders the form for the terminal.
    pub fn render(&self, console: &Console) -> String {
        let mut out = String::new();

        out.push_str(&console.heading("YouTube Video Summarizer"));
        out.push_str("\n\n");

        self.render_field(
            &mut out,
            console,
            Field::YoutubeUrl,
            &self.youtube_url,
            "https://www.youtube.com/watch?v=...",
        );
        self.render_field(
            &mut out,
            console,
            Field::GeminiApiKey,
            &mask_secret(&self.gemini_api_key),
            "Enter your Gemini API key",
        );
        out.push_str(&console.muted(&format!(
            "  Get your API key from Google AI Studio: {}",
            API_KEY_HELP_URL
        )));
        out.push_str("\n\n");

        out.push_str(&console.control(submit_label(self.is_loading), false));
        if self.is_loading {
            out.push(' ');
            out.push_str(&console.muted("(disabled)"));
        }
        out.push('\n');

        out
    }

    fn render_field(
        &self,
        out: &mut String,
        console: &Console,
        field: Field,
        shown: &str,
        placeholder: &str,
    ) {
        let value = if shown.is_empty() {
            console.muted(placeholder)
        } else {
            shown.to_string()
        };
        out.push_str(&format!("{}: {}\n", field.label(), value));
        if let Some(message) = self.errors.get(field) {
            out.push_str(&format!("  {}\n", console.field_error(message)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WATCH_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

    fn filled(url: &str, key: &str) -> VideoForm {
        let mut form = VideoForm::new();
        form.set_youtube_url(url);
        form.set_gemini_api_key(key);
        form
    }

    #[test]
    fn test_accepted_url_shapes() {
        assert!(is_valid_youtube_url(WATCH_URL));
        assert!(is_valid_youtube_url("https://youtu.be/dQw4w9WgXcQ"));
        assert!(is_valid_youtube_url("https://www.youtube.com/embed/dQw4w9WgXcQ"));
        assert!(is_valid_youtube_url("youtube.com/watch?v=abc&t=10"));
        assert!(is_valid_youtube_url("https://youtu.be/abc?t=5"));
    }

    #[test]
    fn test_rejected_url_shapes() {
        assert!(!is_valid_youtube_url("https://invalid-url.com"));
        assert!(!is_valid_youtube_url("https://www.youtube.com/watch?v="));
        assert!(!is_valid_youtube_url("https://www.youtube.com/watch?v=&t=1"));
        assert!(!is_valid_youtube_url("https://youtu.be/"));
        assert!(!is_valid_youtube_url("https://youtu.be/?t=5"));
        assert!(!is_valid_youtube_url("https://www.youtube.com/embed/ abc"));
    }

    #[test]
    fn test_empty_url_required() {
        for url in ["", "   ", "\t\n"] {
            let errors = validate(url, "key").unwrap_err();
            assert_eq!(errors.get(Field::YoutubeUrl), Some(URL_REQUIRED));
            assert_eq!(errors.get(Field::GeminiApiKey), None);
        }
    }

    #[test]
    fn test_bom_counts_as_whitespace() {
        let errors = validate("\u{feff}", "\u{feff} ").unwrap_err();
        assert_eq!(errors.get(Field::YoutubeUrl), Some(URL_REQUIRED));
        assert_eq!(errors.get(Field::GeminiApiKey), Some(KEY_REQUIRED));

        assert!(!is_valid_youtube_url("https://youtu.be/\u{feff}"));
        assert!(is_valid_youtube_url("\u{feff}https://youtu.be/abc"));
    }

    #[test]
    fn test_invalid_url_message() {
        let errors = validate("https://invalid-url.com", "test-key").unwrap_err();
        assert_eq!(errors.get(Field::YoutubeUrl), Some(URL_INVALID));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_both_fields_reported() {
        let errors = validate("", " ").unwrap_err();
        assert_eq!(errors.get(Field::YoutubeUrl), Some(URL_REQUIRED));
        assert_eq!(errors.get(Field::GeminiApiKey), Some(KEY_REQUIRED));
    }

    #[test]
    fn test_valid_values_are_not_trimmed() {
        let request = validate(" https://youtu.be/abc ", " key ").unwrap();
        assert_eq!(request.youtube_url, " https://youtu.be/abc ");
        assert_eq!(request.gemini_api_key, " key ");
    }

    #[test]
    fn test_submit_invokes_callback_with_values() {
        let mut form = filled(WATCH_URL, "test-api-key");
        let mut received = None;

        let submitted = form.submit(|request| received = Some(request));

        assert!(submitted.is_some());
        assert_eq!(
            received,
            Some(ProcessingRequest {
                youtube_url: WATCH_URL.to_string(),
                gemini_api_key: "test-api-key".to_string(),
            })
        );
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_missing_key_skips_callback() {
        let mut form = filled(WATCH_URL, "");
        let mut called = false;

        form.submit(|_| called = true);

        assert!(!called);
        assert_eq!(form.errors().get(Field::GeminiApiKey), Some(KEY_REQUIRED));
        assert_eq!(form.errors().get(Field::YoutubeUrl), None);
    }

    #[test]
    fn test_errors_rebuilt_each_attempt() {
        let mut form = filled("", "");
        form.submit(|_| ());
        assert_eq!(form.errors().len(), 2);

        form.set_gemini_api_key("key");
        form.submit(|_| ());
        assert_eq!(form.errors().len(), 1);
        assert_eq!(form.errors().get(Field::GeminiApiKey), None);

        form.set_youtube_url(WATCH_URL);
        assert!(form.submit(|_| ()).is_some());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_loading_disables_form() {
        let mut form = filled(WATCH_URL, "key");
        form.set_loading(true);

        form.set_youtube_url("changed");
        form.set_gemini_api_key("changed");
        assert_eq!(form.youtube_url(), WATCH_URL);
        assert_eq!(form.gemini_api_key(), "key");

        let mut called = false;
        assert!(form.submit(|_| called = true).is_none());
        assert!(!called);

        form.set_loading(false);
        assert!(form.submit(|_| ()).is_some());
    }

    #[test]
    fn test_submit_label() {
        assert_eq!(submit_label(false), "Summarize Video");
        assert_eq!(submit_label(true), "Processing...");
    }

    #[test]
    fn test_render_shows_errors_and_masks_key() {
        let console = Console::with_colors(false);
        let mut form = filled("https://invalid-url.com", "secret");
        form.submit(|_| ());

        let rendered = form.render(&console);
        assert!(rendered.contains("YouTube Video Summarizer"));
        assert!(rendered.contains("YouTube URL: https://invalid-url.com"));
        assert!(rendered.contains(URL_INVALID));
        assert!(rendered.contains("Gemini API Key: ••••••"));
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<Summarize Video>"));
    }

    #[test]
    fn test_render_loading_label() {
        let console = Console::with_colors(false);
        let mut form = VideoForm::new();
        form.set_loading(true);

        let rendered = form.render(&console);
        assert!(rendered.contains("<Processing...>"));
        assert!(rendered.contains("Enter your Gemini API key"));
    }
}
