use clap::Parser;
use colored::Colorize;
use searchbot::Config;
use searchbot::cards::Bitwise;
use searchbot::cards::Board;
use searchbot::cards::Hand;
use searchbot::cards::Hole;
use searchbot::cards::Street;
use searchbot::models::Registry;
use searchbot::search::Search;
use searchbot::table::Action;
use searchbot::table::PlayerId;
use searchbot::table::Seat;
use searchbot::table::Snapshot;
use searchbot::table::State;
use std::sync::Arc;

/// Rank the actions available to a hero seat and print the decision.
///
/// The hero is seated first to act after the dealer. When facing a bet,
/// the dealer is the bettor and every other opponent has checked.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Hero hole cards, e.g. "As Kd".
    #[arg(long)]
    hole: String,
    /// Community cards, e.g. "Ks Qd 2c".
    #[arg(long, default_value = "")]
    board: String,
    /// Chips already in the pot from earlier rounds.
    #[arg(long, default_value_t = 100)]
    pot: u32,
    #[arg(long, default_value_t = 1000)]
    stack: u32,
    #[arg(long, default_value_t = 1000)]
    villain_stack: u32,
    /// Size of the bet the hero must answer this round.
    #[arg(long, default_value_t = 0)]
    facing: u32,
    #[arg(long, default_value_t = 1)]
    opponents: u32,
    /// Search effort; overrides the config file.
    #[arg(long)]
    tokens: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,
    /// JSON config file.
    #[arg(long)]
    config: Option<String>,
}

const HERO: PlayerId = PlayerId::from_raw(0);

impl Args {
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = match self.config.as_deref() {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(tokens) = self.tokens {
            config.tokens = tokens;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
    fn state(&self) -> anyhow::Result<State> {
        anyhow::ensure!(self.opponents > 0, "need at least one opponent");
        let hole = Hole::try_from(self.hole.as_str()).map_err(anyhow::Error::msg)?;
        let board = Hand::try_from(self.board.as_str())
            .and_then(Board::try_from)
            .map_err(anyhow::Error::msg)?;
        let street = Street::try_from(board.size()).map_err(anyhow::Error::msg)?;
        let dealer = PlayerId::from_raw(self.opponents);
        let villains = (1..=self.opponents)
            .map(PlayerId::from_raw)
            .map(|id| match id == dealer && self.facing > 0 {
                true => Seat::from((id, self.villain_stack.saturating_sub(self.facing)))
                    .with_stake(self.facing.min(self.villain_stack)),
                false => Seat::from((id, self.villain_stack)),
            });
        let seats = std::iter::once(Seat::from((HERO, self.stack)).with_cards(hole))
            .chain(villains)
            .collect::<Vec<Seat>>();
        let facing = self.facing > 0;
        State::try_from(Snapshot {
            seats,
            board,
            pot: self.pot,
            street,
            dealer,
            n_raises: facing as usize,
            next: Some(HERO),
            bettor: facing.then_some(dealer),
            acted: facing.then_some(dealer).into_iter().collect(),
            ..Snapshot::default()
        })
    }
}

fn paint(action: &Action, best: bool) -> String {
    let label = action.to_string();
    match (best, action) {
        (true, _) => label.green().bold().to_string(),
        (false, Action::Fold) => label.red().to_string(),
        (false, a) if a.is_aggressive() => label.yellow().to_string(),
        (false, _) => label,
    }
}

fn main() -> anyhow::Result<()> {
    searchbot::log();
    let args = Args::parse();
    let config = args.config()?;
    let tokens = config.tokens;
    let state = args.state()?;
    log::info!("{}", state);
    let search = Search::new(HERO, config, Arc::new(Bitwise), Registry::default());
    let ranking = match search.evaluate(&state, tokens) {
        Ok(ranking) => ranking,
        Err(e) => {
            log::error!("search failed: {:#}", e);
            Vec::new()
        }
    };
    let decision = Search::best(&ranking).unwrap_or_else(|| state.passive());
    println!("{:<16} {:>10}", "ACTION", "EV");
    for (action, ev) in ranking.iter() {
        println!("{:<16} {:>10.2}", paint(action, *action == decision), ev);
    }
    println!("{} {}", "decision:".bold(), paint(&decision, true));
    Ok(())
}
