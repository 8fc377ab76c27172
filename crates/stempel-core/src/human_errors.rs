// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for whoever is signing the document.
//
// Every technical error is mapped to a short message with a clear suggestion.
// Severity drives how the presentation layer shows it.

use crate::error::StempelError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Disk hiccup or similar; trying again may work.
    Transient,
    /// User must do something first (load a document, pick a stamp).
    ActionRequired,
    /// Retrying the same input will not help.
    Permanent,
}

/// A human-readable error with a plain message and an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether repeating the action unchanged can succeed.
    pub retriable: bool,
    pub severity: Severity,
}

impl std::fmt::Display for HumanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.message, self.suggestion)
    }
}

/// Convert a `StempelError` into a `HumanError`.
pub fn humanize_error(err: &StempelError) -> HumanError {
    match err {
        StempelError::InvalidImage(detail) => HumanError {
            message: "That file isn't a picture we can open.".into(),
            suggestion: format!("Use a PNG, JPEG or BMP image. ({detail})"),
            retriable: false,
            severity: Severity::Permanent,
        },

        StempelError::NoDocument => HumanError {
            message: "No document is open.".into(),
            suggestion: "Open the scanned document first, then try again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        StempelError::MissingSource(kind) => HumanError {
            message: format!("No {kind} picture is loaded."),
            suggestion: format!("Load a {kind} image before placing it on the document."),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        StempelError::UnknownOverlay(_) => HumanError {
            message: "That stamp or signature is no longer on the document.".into(),
            suggestion: "It was removed when the document was cleared. Add it again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        StempelError::InvalidSizeInput { input, last_valid } => HumanError {
            message: format!("\"{input}\" isn't a valid size."),
            suggestion: format!("Enter a whole number of millimetres. Keeping {last_valid} mm."),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        StempelError::CacheDirUnavailable => HumanError {
            message: "There's nowhere to keep your saved stamp and settings.".into(),
            suggestion: "Check that your home directory exists and is writable.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        StempelError::Io(e) => humanize_io_error(e),

        StempelError::Serialization(e) => HumanError {
            message: "Your saved settings file is damaged.".into(),
            suggestion: format!("Delete settings.json in the cache folder to reset it. ({e})"),
            retriable: false,
            severity: Severity::Permanent,
        },
    }
}

fn humanize_io_error(e: &std::io::Error) -> HumanError {
    match e.kind() {
        std::io::ErrorKind::NotFound => HumanError {
            message: "The file couldn't be found.".into(),
            suggestion: "Check the file name and folder, then try again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },
        std::io::ErrorKind::PermissionDenied => HumanError {
            message: "We aren't allowed to write there.".into(),
            suggestion: "Choose a different folder or check its permissions.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },
        _ => HumanError {
            message: "Reading or writing a file failed.".into(),
            suggestion: format!("Try again. ({e})"),
            retriable: true,
            severity: Severity::Transient,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OverlayKind;

    #[test]
    fn no_document_is_action_required() {
        let human = humanize_error(&StempelError::NoDocument);
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(!human.retriable);
    }

    #[test]
    fn invalid_image_is_permanent() {
        let human = humanize_error(&StempelError::InvalidImage("bad magic".into()));
        assert_eq!(human.severity, Severity::Permanent);
        assert!(human.suggestion.contains("bad magic"));
    }

    #[test]
    fn missing_source_names_the_kind() {
        let human = humanize_error(&StempelError::MissingSource(OverlayKind::Signature));
        assert!(human.message.contains("signature"));
    }

    #[test]
    fn size_input_mentions_kept_value() {
        let err = StempelError::InvalidSizeInput {
            input: "4x".into(),
            last_valid: 42,
        };
        let human = humanize_error(&err);
        assert!(human.suggestion.contains("42 mm"));
    }

    #[test]
    fn interrupted_io_is_transient() {
        let err = StempelError::Io(std::io::Error::new(std::io::ErrorKind::Interrupted, "eintr"));
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::Transient);
        assert!(human.retriable);
    }
}
