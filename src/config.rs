//! Engine configuration: the optimization-level hint and pass-pipeline
//! toggles the session orchestrator consults for Flow A.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptimizationLevel {
    O0,
    O1,
    O2,
    O3,
    Os,
    Oz,
}

impl Default for OptimizationLevel {
    fn default() -> Self {
        OptimizationLevel::O2
    }
}

/// Tunables for the live-pipeline flow (§4.5, Flow A). A description
/// string overrides the pipeline the optimization level would otherwise
/// select.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub optimization_level: OptimizationLevel,
    /// Override for the default pipeline derived from `optimization_level`.
    pub pipeline_description: Option<String>,
    pub vectorization: bool,
    pub unrolling: bool,
    /// Re-run structural verification after the pipeline completes.
    pub verify_each_pass: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            optimization_level: OptimizationLevel::default(),
            pipeline_description: None,
            vectorization: true,
            unrolling: true,
            verify_each_pass: false,
        }
    }
}

impl EngineConfig {
    /// The pipeline description to drive: the explicit override if set,
    /// otherwise a default derived from the optimization level containing
    /// at minimum instcombine, simplifycfg, and aggressive DCE.
    pub fn effective_pipeline(&self) -> String {
        if let Some(desc) = &self.pipeline_description {
            return desc.clone();
        }
        let mut stages = vec!["instcombine", "simplifycfg", "adce"];
        if self.vectorization && matches!(self.optimization_level, OptimizationLevel::O2 | OptimizationLevel::O3) {
            stages.push("loop-vectorize");
            stages.push("slp-vectorizer");
        }
        if self.unrolling && !matches!(self.optimization_level, OptimizationLevel::O0 | OptimizationLevel::Oz) {
            stages.push("loop-unroll");
        }
        stages.join(",")
    }
}
