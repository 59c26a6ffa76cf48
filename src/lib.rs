//! Budgeted expectimax search for No-Limit Texas Hold'em decisions.
//!
//! Given an observed table state, the engine estimates the expected value of
//! each candidate action by searching over hypothetical futures and picks the
//! best one.
//!
//! ## Modules
//!
//! - [`cards`]: Card primitives and the bitwise hand evaluator
//! - [`table`]: Persistent, shared-tail chain of table states
//! - [`models`]: Opponent action models and their shared registry
//! - [`search`]: Tree nodes, the sampling expander, the Monte Carlo showdown
//!   estimator, and the top-level [`search::Search`] driver
pub mod cards;
pub mod models;
pub mod search;
pub mod table;

mod config;
mod defect;

pub use config::*;
pub use defect::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Stack sizes, bets and pots in whole chips.
pub type Chips = u32;
/// Expected values and payoffs.
pub type Utility = f64;
/// Action likelihoods and branch weights.
pub type Probability = f64;
/// Units of search effort divided among branches.
pub type Tokens = usize;

// ============================================================================
// SEARCH PARAMETERS
// ============================================================================
/// Upper bound on uniform draws per sampled expansion.
pub const SAMPLES_PER_EXPANSION: usize = 100;
/// Monte Carlo trials per showdown estimate.
pub const SHOWDOWN_TRIALS: usize = 20;
/// Default search effort per decision.
pub const DEFAULT_TOKENS: Tokens = 250;
/// Maximum bets and raises per betting round (bounds tree depth).
pub const MAX_RAISES_PER_ROUND: usize = 4;
/// Tolerance when checking that a distribution sums to one.
pub const PROBABILITY_TOLERANCE: Probability = 1e-6;
/// EVs closer than this are ties, broken by action preference.
pub const EV_TOLERANCE: Utility = 1e-9;

// ============================================================================
// TABLE PARAMETERS
// ============================================================================
/// Big blind used when a snapshot does not specify one.
pub const BIG_BLIND: Chips = 2;
/// Most seats a single chain can track (acted-set is a u64 bitmask).
pub const MAX_SEATS: usize = 64;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "cli")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
