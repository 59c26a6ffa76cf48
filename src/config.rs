use crate::Tokens;
use crate::search::Decisions;
use crate::search::Equity;
use crate::search::Expander;
use crate::search::Odds;
use crate::search::Sizing;
use crate::search::Split;
use crate::cards::Ranker;
use serde::Deserialize;
use serde::Serialize;
use std::sync::Arc;

/// Tunable search parameters.
///
/// Every field falls back to the crate-level constant when absent from a
/// loaded file, so a config only needs the fields it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Monte Carlo trials per showdown estimate.
    pub trials: usize,
    /// Upper bound on uniform draws per sampled expansion.
    pub samples: usize,
    pub split: Split,
    pub decisions: Decisions,
    /// Bet and raise sizes as fractions of the pot.
    pub sizes: Vec<Odds>,
    /// Whether all-in is a candidate whenever the stack allows it.
    pub shove: bool,
    pub max_raises: usize,
    /// Wall-clock budget per decision. Unexpanded nodes fall back to a
    /// neutral estimate once it runs out.
    pub deadline_ms: Option<u64>,
    /// Fixed seed for reproducible searches.
    pub seed: Option<u64>,
    /// Deal sampled opponent holes from one shared pool per trial.
    pub exclusive_opponents: bool,
    /// Credit tied showdowns with an equal share of the pot.
    pub split_pots: bool,
    pub tokens: Tokens,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trials: crate::SHOWDOWN_TRIALS,
            samples: crate::SAMPLES_PER_EXPANSION,
            split: Split::default(),
            decisions: Decisions::default(),
            sizes: Odds::GRID.to_vec(),
            shove: true,
            max_raises: crate::MAX_RAISES_PER_ROUND,
            deadline_ms: None,
            seed: None,
            exclusive_opponents: false,
            split_pots: false,
            tokens: crate::DEFAULT_TOKENS,
        }
    }
}

impl Config {
    /// Reads a JSON config file.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("read config {}: {}", path, e))?;
        let config = serde_json::from_str::<Self>(&text)
            .map_err(|e| anyhow::anyhow!("parse config {}: {}", path, e))?;
        config.validate()?;
        Ok(config)
    }
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.trials > 0, "trials must be positive");
        anyhow::ensure!(self.samples > 0, "samples must be positive");
        anyhow::ensure!(
            self.sizes.iter().all(|o| o.0 > 0 && o.1 > 0),
            "bet sizes must be positive fractions"
        );
        Ok(())
    }
    pub fn sizing(&self) -> Sizing {
        Sizing::new(self.sizes.clone(), self.shove, self.max_raises)
    }
    pub fn expander(&self) -> Expander {
        Expander::new(self.samples, self.split)
    }
    pub fn equity(&self, ranker: Arc<dyn Ranker>) -> Equity {
        Equity::new(ranker, self.trials)
            .exclusive(self.exclusive_opponents)
            .split(self.split_pots)
    }
    pub fn deadline(&self) -> Option<std::time::Duration> {
        self.deadline_ms.map(std::time::Duration::from_millis)
    }
}
