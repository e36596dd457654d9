//! Engine selection and orchestration.
//!
//! One request picks exactly one engine. The driver artifacts live at fixed
//! paths, so requests must not overlap; `Tracer` serializes them behind an
//! async mutex rather than letting two engines race on the same files.

use std::path::PathBuf;

use tokio::sync::Mutex;
use tracing::info;

use crate::config::Config;
use crate::error::TraceError;
use crate::trace::{Language, Trace};

pub mod managed;
pub mod native;
pub mod python;

/// One visualization request: the target file plus its classified language.
#[derive(Debug, Clone)]
pub struct EngineRequest {
    pub file_path: PathBuf,
    pub language: Language,
}

impl EngineRequest {
    /// Classify a source file; no process is spawned here, an unsupported
    /// extension fails immediately.
    pub fn from_path(file_path: PathBuf) -> Result<Self, TraceError> {
        let language = Language::from_path(&file_path)?;
        Ok(Self { file_path, language })
    }
}

/// Dispatches requests to the matching engine adapter.
pub struct Tracer {
    config: Config,
    // Single-flight gate over the fixed artifact paths.
    gate: Mutex<()>,
}

impl Tracer {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            gate: Mutex::new(()),
        }
    }

    /// Run the engine for one request and return the finished trace.
    ///
    /// A second call while one is in flight waits for the first to finish.
    /// Adapter failures surface as a single `TraceError`; no partial trace
    /// is ever returned.
    pub async fn run(&self, request: &EngineRequest) -> Result<Trace, TraceError> {
        let _guard = self.gate.lock().await;
        info!(file = %request.file_path.display(), language = ?request.language, "starting trace");

        let trace = match request.language {
            Language::Python => python::run(&self.config, &request.file_path).await?,
            Language::C => native::run(&self.config, &request.file_path, false).await?,
            Language::Cpp => native::run(&self.config, &request.file_path, true).await?,
            Language::Java => managed::run(&self.config, &request.file_path).await?,
        };

        info!(steps = trace.len(), "trace complete");
        Ok(trace)
    }
}
