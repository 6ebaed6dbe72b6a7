//! The regulatory interest-rate shock engine: six BCBS-368 /
//! EBA-GL-2022/14 style stress templates applied to a [`alm_core::ForwardCurveSet`],
//! with basis-preserving stress and a post-shock floor envelope.
#![warn(missing_docs)]

pub mod engine;
pub mod error;
pub mod orchestrator;
pub mod scenario;

pub use engine::{build_regulatory_curve_set, build_regulatory_curve_sets};
pub use error::{ScenarioError, ShockError};
pub use orchestrator::{run_scenarios, OrchestratorConfig, OrchestratorResult};
pub use scenario::{RegulatoryScenario, REGULATORY_SCENARIOS};
