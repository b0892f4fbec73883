//! Planner configuration.

use augur_core::BoxProps;

/* Defaults for the spawned box match the reference sandbox's spawner. */

/// Configuration for candidate sampling and search execution.
///
/// All numeric tolerances of the search live here rather than as
/// hard-coded constants.
#[derive(Clone, Debug, PartialEq)]
pub struct PlannerConfig {
    /// Seed for the search RNG. Each attempt derives its own stream as
    /// `seed ^ attempt`, so sequential and parallel execution sample
    /// identical candidates. Default: 42.
    pub seed: u64,
    /// Half-range of the uniform horizontal jitter applied around the
    /// chosen anchor, in world units. Default: 40.
    pub jitter: f32,
    /// Vertical gap left between the anchor's top surface and the
    /// spawned box's bottom surface. Default: 10.
    pub clearance: f32,
    /// Static properties assigned to every spawned candidate box.
    /// Default: mass 15, 50x50, friction 0.6, elasticity 0.5.
    pub spawn_box: BoxProps,
    /// Worker threads for the parallel search. `None` = auto-detect
    /// (`available_parallelism / 2`, clamped to `[2, 16]`).
    pub workers: Option<usize>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            jitter: 40.0,
            clearance: 10.0,
            spawn_box: BoxProps {
                mass: 15.0,
                width: 50.0,
                height: 50.0,
                friction: 0.6,
                elasticity: 0.5,
            },
            workers: None,
        }
    }
}

impl PlannerConfig {
    /// Resolve the actual worker count, applying auto-detection if `None`.
    ///
    /// Explicit values are clamped to `[1, 64]`.
    pub fn resolved_workers(&self) -> usize {
        match self.workers {
            Some(n) => n.clamp(1, 64),
            None => {
                let cpus = std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(4);
                (cpus / 2).clamp(2, 16)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_worker_counts_are_clamped() {
        let mut config = PlannerConfig::default();
        config.workers = Some(0);
        assert_eq!(config.resolved_workers(), 1);
        config.workers = Some(1000);
        assert_eq!(config.resolved_workers(), 64);
    }

    #[test]
    fn auto_detection_stays_in_range() {
        let config = PlannerConfig::default();
        let workers = config.resolved_workers();
        assert!((2..=16).contains(&workers));
    }
}
