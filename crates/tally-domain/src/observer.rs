//! Observer module - progress and telemetry sink for an extraction
//!
//! The pipeline never logs through global state. Callers pass an
//! [`ExtractionObserver`] and decide what to do with each event.

use crate::record::ExtractedRecord;
use crate::traits::ExtractionUsage;
use std::path::Path;
use std::time::Duration;

/// Something that happened while processing one document
#[derive(Debug, Clone, Copy)]
pub enum ExtractionEvent<'a> {
    /// Input file passed size and content checks
    InputValidated {
        /// File that was checked
        path: &'a Path,
        /// Size on disk
        size_bytes: u64,
    },

    /// Input extension is not one of the expected text extensions
    UnexpectedExtension {
        /// File that was checked
        path: &'a Path,
        /// Extension found, if any
        extension: Option<&'a str>,
    },

    /// Provider request is about to be sent
    RequestStarted {
        /// Model identifier
        model: &'a str,
        /// Length of the system prompt in characters
        system_chars: usize,
        /// Length of the user prompt in characters
        user_chars: usize,
    },

    /// Provider answered
    RequestCompleted {
        /// Model identifier
        model: &'a str,
        /// Wall time of the call
        elapsed: Duration,
        /// Token usage, if reported
        usage: Option<&'a ExtractionUsage>,
        /// Why the model stopped, if reported
        finish_reason: Option<&'a str>,
    },

    /// Provider call failed
    RequestFailed {
        /// Model identifier
        model: &'a str,
        /// Wall time until the failure
        elapsed: Duration,
        /// Underlying message
        message: &'a str,
    },

    /// A complete record was produced
    RecordExtracted {
        /// The final record, filename attached
        record: &'a ExtractedRecord,
        /// Wall time of the whole extraction
        elapsed: Duration,
    },
}

/// Receives events from the extraction pipeline
pub trait ExtractionObserver: Send + Sync {
    /// Handle one event
    fn on_event(&self, event: ExtractionEvent<'_>);
}

/// Observer that discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ExtractionObserver for NoopObserver {
    fn on_event(&self, _event: ExtractionEvent<'_>) {}
}
