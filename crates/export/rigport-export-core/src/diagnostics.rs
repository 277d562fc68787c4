//! Structured warnings collected during a batch export.
//!
//! The batch never aborts on a bad item; every skip is recorded here and
//! also logged, so callers get more than a console message.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::registry::ExportNodeId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
pub enum Warning {
    #[error("no origin joint found in scope '{scope}'")]
    OriginNotFound { scope: String },

    #[error("export node {id:?} does not exist")]
    NodeNotFound { id: ExportNodeId },

    #[error("no valid export filename on export node '{node}'")]
    Misconfigured { node: String },

    #[error("animation layer '{layer}' no longer exists; snapshot record skipped")]
    LayerMissing { layer: String },

    #[error("export to '{path}' failed: {reason}")]
    ExportFailed { path: String, reason: String },

    #[error("host call failed on export node '{node}': {reason}")]
    HostError { node: String, reason: String },
}

/// Outcome of one orchestrated export run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportReport {
    /// Paths handed to the host export call, in order.
    pub exported: Vec<String>,
    pub warnings: Vec<Warning>,
}

impl ExportReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, warning: Warning) {
        log::warn!("{warning}");
        self.warnings.push(warning);
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}
