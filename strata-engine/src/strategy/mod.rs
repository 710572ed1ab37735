//! Strategy layer: parameters, the rule engine, the registry of built-in
//! strategies, and the consensus vote.

pub mod consensus;
pub mod params;
pub mod registry;
pub mod rule;

pub use consensus::{run_consensus, ConsensusParams, DEFAULT_MEMBERS};
pub use params::{DisciplineParams, OnFailure, StrategyParams};
pub use registry::{RegistryError, StrategyDef, StrategyInfo, StrategyRegistry};
pub use rule::{run_blueprint, AnnotatedSeries, Bias, Blueprint, Rule, CLOSE_SERIES};
