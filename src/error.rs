//! Failure taxonomy for trace acquisition.
//!
//! Every engine-internal failure is caught at the adapter boundary and
//! re-raised as one of these variants with the most specific diagnostic
//! text available attached.

use thiserror::Error;

/// Errors surfaced by the engine selector and adapters.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The source file's extension maps to no known engine.
    #[error("unsupported language: .{extension}")]
    UnsupportedLanguage { extension: String },

    /// A native or managed compiler exited with a diagnostic.
    #[error("compilation failed:\n{diagnostics}")]
    CompilationFailed { diagnostics: String },

    /// An external process could not be started or crashed before
    /// producing any usable output.
    #[error("failed to launch {program}: {detail}")]
    ProcessLaunchError { program: String, detail: String },

    /// The Python driver's sentinel markers were absent from stdout.
    #[error("no trace output found: {detail}")]
    NoTraceOutput { detail: String },

    /// The text between the sentinel markers was not a valid payload.
    #[error("malformed trace payload: {detail}")]
    MalformedTracePayload { detail: String },

    /// The engine ran but the parsed transcript contained zero steps.
    #[error("engine produced no trace steps")]
    EmptyTrace,
}
