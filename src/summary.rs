//! Results view for a processed video.
//!
//! Renders the summary and chapter list, formats the plain-text copies, and
//! tracks the transient "copied" confirmations. Confirmations are stored as
//! expiry instants rather than timers, so callers pass the current time in.

use crate::api::{Chapter, ProcessingResult};
use crate::clipboard::Clipboard;
use crate::console::Console;
use std::time::{Duration, Instant};

/// How long a "copied" confirmation stays visible.
pub const COPY_FEEDBACK: Duration = Duration::from_millis(2000);

/// What a copy action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    /// The full formatted summary.
    All,
    /// A single chapter, by zero-based index.
    Chapter(usize),
}

/// Formats the whole result as plain text for the clipboard.
pub fn format_full_output(result: &ProcessingResult) -> String {
    let mut output = format!("Video: {}\n", result.video_title);
    output.push_str(&format!("Duration: {}\n\n", result.duration));
    output.push_str(&format!("Summary:\n{}\n\n", result.summary));
    output.push_str("Chapters:\n");

    for (i, chapter) in result.chapters.iter().enumerate() {
        output.push_str(&format!(
            "\n{}. [{}] {}\n",
            i + 1,
            chapter.timestamp,
            chapter.title
        ));
        output.push_str(&format!("   {}\n", chapter.description));
    }

    output
}

/// Formats one chapter as plain text for the clipboard.
pub fn format_chapter(chapter: &Chapter) -> String {
    format!(
        "[{}] {}\n{}",
        chapter.timestamp, chapter.title, chapter.description
    )
}

/// Read-only view over a processing result.
#[derive(Debug, Clone)]
pub struct SummaryView {
    result: ProcessingResult,
    copied_all_until: Option<Instant>,
    copied_chapter: Option<(usize, Instant)>,
}

impl SummaryView {
    pub fn new(result: ProcessingResult) -> Self {
        Self {
            result,
            copied_all_until: None,
            copied_chapter: None,
        }
    }

    pub fn result(&self) -> &ProcessingResult {
        &self.result
    }

    /// Text that a copy action on `target` would write, if the target exists.
    pub fn copy_text(&self, target: CopyTarget) -> Option<String> {
        match target {
            CopyTarget::All => Some(format_full_output(&self.result)),
            CopyTarget::Chapter(index) => self.result.chapters.get(index).map(format_chapter),
        }
    }

    /// Copies `target` to the clipboard and starts its confirmation.
    ///
    /// Clipboard failures are logged and swallowed. Returns whether the copy
    /// succeeded.
    pub fn copy(
        &mut self,
        target: CopyTarget,
        clipboard: &mut dyn Clipboard,
        now: Instant,
    ) -> bool {
        let Some(text) = self.copy_text(target) else {
            tracing::warn!(?target, "copy target does not exist");
            return false;
        };

        if let Err(e) = clipboard.write_text(&text) {
            tracing::error!(error = %e, "Failed to copy");
            return false;
        }

        let until = now + COPY_FEEDBACK;
        match target {
            CopyTarget::All => self.copied_all_until = Some(until),
            CopyTarget::Chapter(index) => self.copied_chapter = Some((index, until)),
        }
        true
    }

    /// Copies the full formatted summary.
    pub fn copy_all(&mut self, clipboard: &mut dyn Clipboard, now: Instant) -> bool {
        self.copy(CopyTarget::All, clipboard, now)
    }

    /// Copies a single chapter by zero-based index.
    pub fn copy_chapter(
        &mut self,
        index: usize,
        clipboard: &mut dyn Clipboard,
        now: Instant,
    ) -> bool {
        self.copy(CopyTarget::Chapter(index), clipboard, now)
    }

    /// Whether the "copy all" confirmation is showing at `now`.
    pub fn is_copied_all(&self, now: Instant) -> bool {
        self.copied_all_until.is_some_and(|until| now < until)
    }

    /// The chapter whose confirmation is showing at `now`.
    pub fn copied_chapter(&self, now: Instant) -> Option<usize> {
        self.copied_chapter
            .filter(|(_, until)| now < *until)
            .map(|(index, _)| index)
    }

    /// Renders the results for the terminal.
    pub fn render(&self, console: &Console, now: Instant) -> String {
        let mut out = String::new();
        let copied_all = self.is_copied_all(now);
        let copied_chapter = self.copied_chapter(now);

        out.push_str(&format!(
            "{}  {}\n\n",
            console.heading("Results"),
            console.control(if copied_all { "✓ Copied!" } else { "Copy All" }, copied_all)
        ));

        out.push_str(&format!(
            "{} {}\n",
            console.muted("Video:"),
            self.result.video_title
        ));
        out.push_str(&format!(
            "{} {}\n\n",
            console.muted("Duration:"),
            self.result.duration
        ));

        out.push_str(&console.heading("Summary"));
        out.push('\n');
        out.push_str(&self.result.summary);
        out.push_str("\n\n");

        out.push_str(&console.heading("Chapters"));
        out.push('\n');

        for (i, chapter) in self.result.chapters.iter().enumerate() {
            let active = copied_chapter == Some(i);
            out.push_str(&format!(
                "\n{} {}  {}\n",
                console.badge(&chapter.timestamp),
                console.heading(&chapter.title),
                console.control(if active { "✓" } else { "Copy" }, active)
            ));
            out.push_str(&format!("  {}\n", chapter.description));
        }

        out
    }
}
