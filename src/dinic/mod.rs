pub mod level;
pub mod search;

use std::time::{Duration, Instant};

use log::debug;

use crate::matching::{Matching, MatchingExtractor};
use crate::network::model::FlowNetwork;

pub use search::PhaseReport;

/// Counters for one engine run.
#[derive(Debug, Clone, Default)]
pub struct EngineStats {
    pub phases: usize,
    pub augmented_paths: usize,
    pub duration: Duration,
}

/// Outcome of a run: the matching, the run counters, and the residual
/// network the matching was read from.
#[derive(Debug)]
pub struct MatchingSummary {
    pub matching: Matching,
    pub stats: EngineStats,
    pub network: FlowNetwork,
}

/// Phase-loop driver. Takes exclusive ownership of the residual network, so
/// nothing else can observe or mutate it while phases run.
pub struct DinicEngine {
    residual: FlowNetwork,
}

impl DinicEngine {
    pub fn new(residual: FlowNetwork) -> Self {
        Self { residual }
    }

    /// Runs phases until the residual graph no longer reaches the sink,
    /// then reads the matching off the final state. The engine assumes a
    /// well-formed network and cannot fail; all validation happens at load
    /// time.
    pub fn execute(mut self) -> MatchingSummary {
        let start = Instant::now();
        let mut stats = EngineStats::default();

        let mut matching_exists = true;
        while matching_exists {
            let report = search::run_phase(&mut self.residual);
            stats.phases += 1;
            stats.augmented_paths += report.augmented_paths;
            debug!(
                "Phase {}: {} augmenting paths, sink reachable {}",
                stats.phases, report.augmented_paths, report.sink_reachable
            );
            matching_exists = report.sink_reachable;
        }

        let matching = MatchingExtractor::extract(&self.residual);
        stats.duration = start.elapsed();
        debug!(
            "Engine finished: {} pairs, {} phases, {} augmenting paths",
            matching.len(),
            stats.phases,
            stats.augmented_paths
        );

        MatchingSummary {
            matching,
            stats,
            network: self.residual,
        }
    }
}
