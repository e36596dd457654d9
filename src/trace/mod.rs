//! Canonical trace model shared by all engines.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TraceError;

/// One observed execution step: a 1-based source line plus the variables
/// visible at that point, each stringified by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStep {
    pub line: u32,
    #[serde(default)]
    pub vars: BTreeMap<String, String>,
}

impl TraceStep {
    pub fn new(line: u32) -> Self {
        Self {
            line,
            vars: BTreeMap::new(),
        }
    }
}

/// Ordered sequence of steps from a single engine run. Built once per
/// request, immutable after the adapter returns it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trace {
    pub steps: Vec<TraceStep>,
}

impl Trace {
    pub fn from_steps(steps: Vec<TraceStep>) -> Self {
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Language family of a source file, one engine per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Python,
    C,
    Cpp,
    Java,
}

impl Language {
    /// Classify a source file by extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, TraceError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "py" => Ok(Self::Python),
            "c" => Ok(Self::C),
            "cpp" => Ok(Self::Cpp),
            "java" => Ok(Self::Java),
            _ => Err(TraceError::UnsupportedLanguage { extension: ext }),
        }
    }
}
