use crate::evaluator::EvalMode;
use crate::simulator::SimulationError;
use std::num::NonZeroUsize;

/// Trials run per request unless configured otherwise.
pub const DEFAULT_TRIALS: u64 = 50_000;

/// Trials per chunk. Chunk `i` always draws from RNG stream `i`, so a seeded
/// run gives the same counts whatever the worker count or host.
pub const CHUNK_TRIALS: u64 = 1_000;

/// Knobs for a simulation run.
///
/// ```
/// use poker_odds::config::SimulationConfig;
/// use poker_odds::evaluator::EvalMode;
///
/// let cfg = SimulationConfig::default().with_trials(10_000).with_seed(7).with_workers(2);
/// assert_eq!(cfg.trials, 10_000);
/// assert_eq!(cfg.mode, EvalMode::WholeSet);
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Number of trials (the budget percentages are computed against).
    pub trials: u64,
    /// Threads the chunks are spread over. Has no effect on the counts.
    pub workers: usize,
    /// Fixed seed for reproducible runs; `None` seeds every worker from the OS.
    pub seed: Option<u64>,
    pub mode: EvalMode,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            workers: default_workers(),
            seed: None,
            mode: EvalMode::default(),
        }
    }
}

impl SimulationConfig {
    pub fn with_trials(mut self, trials: u64) -> Self {
        self.trials = trials;
        self
    }

    /// Zero is clamped to one worker.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_mode(mut self, mode: EvalMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.trials == 0 {
            return Err(SimulationError::ZeroTrials);
        }
        Ok(())
    }

    /// The budget cut into `CHUNK_TRIALS`-sized pieces, the last one short.
    pub fn chunks(&self) -> Vec<u64> {
        let full = self.trials / CHUNK_TRIALS;
        let rest = self.trials % CHUNK_TRIALS;
        let mut chunks = vec![CHUNK_TRIALS; full as usize];
        if rest > 0 {
            chunks.push(rest);
        }
        chunks
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism().map_or(1, NonZeroUsize::get)
}
