use super::candidate::Candidate;
use super::equity::Equity;
use super::expander::Branch;
use super::expander::Decisions;
use super::expander::Expander;
use super::sizing::Sizing;
use crate::Defect;
use crate::Probability;
use crate::Tokens;
use crate::Utility;
use crate::models::Registry;
use crate::table::Action;
use crate::table::PlayerId;
use crate::table::State;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::time::Instant;

/// Everything a node needs to expand, borrowed from the driver.
pub struct Context<'a> {
    pub bot: PlayerId,
    pub decisions: Decisions,
    pub sizing: &'a Sizing,
    pub expander: &'a Expander,
    pub equity: &'a Equity,
    pub registry: &'a Registry,
    pub deadline: Option<Instant>,
}

impl Context<'_> {
    fn expired(&self) -> bool {
        self.deadline.is_some_and(|t| Instant::now() >= t)
    }
}

/// Why a leaf has no children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// Betting is over and two or more players compare hands.
    Showdown,
    /// Everyone else folded.
    Uncontested,
    /// The searching player folded.
    Folded,
    /// Tokens ran out before the hand did; resolved as a showdown at the
    /// current pot.
    Exhausted,
}

/// A node of the search tree.
///
/// EVs are the chips the searching player ends the hand with: their stack
/// plus whatever they collect from the pot. Decision nodes take the best
/// child, chance nodes the weighted mean. Every node owns a seed, so the
/// subtree below it expands identically however its siblings are scheduled.
pub enum Node {
    Decision(Inner),
    Chance(Inner),
    Terminal(Leaf),
}

pub struct Inner {
    state: State,
    tokens: Tokens,
    seed: u64,
    ev: Option<Utility>,
    expired: bool,
    children: Vec<Child>,
}

pub struct Leaf {
    state: State,
    ending: Ending,
    seed: u64,
    ev: Option<Utility>,
}

/// An edge and the subtree it leads to.
pub struct Child {
    pub action: Action,
    pub weight: Probability,
    pub count: usize,
    pub node: Node,
}

impl Node {
    /// Classifies `state` from the point of view of `bot`.
    pub fn new(state: State, tokens: Tokens, seed: u64, bot: PlayerId) -> Self {
        let ending = if !state.is_active(bot) {
            Some(Ending::Folded)
        } else if state.n_active() <= 1 {
            Some(Ending::Uncontested)
        } else if state.is_hand_over() {
            Some(Ending::Showdown)
        } else if tokens == 0 {
            Some(Ending::Exhausted)
        } else {
            None
        };
        match ending {
            Some(ending) => Self::Terminal(Leaf {
                state,
                ending,
                seed,
                ev: None,
            }),
            None if state.next_to_act() == Some(bot) => Self::Decision(Inner::new(state, tokens, seed)),
            None => Self::Chance(Inner::new(state, tokens, seed)),
        }
    }
    /// The decision node at which the searching player must act. Unlike
    /// [`Node::new`] this never collapses into a leaf on an empty budget.
    pub fn root(state: State, tokens: Tokens, seed: u64) -> Self {
        Self::Decision(Inner::new(state, tokens, seed))
    }

    /// Expands the subtree and returns this node's EV. Calling it again
    /// returns the cached value.
    pub fn expand(&mut self, ctx: &Context) -> anyhow::Result<Utility> {
        match self {
            Self::Decision(inner) => inner.expand(ctx, true),
            Self::Chance(inner) => inner.expand(ctx, false),
            Self::Terminal(leaf) => leaf.expand(ctx),
        }
    }
    /// The cached EV. Reading it before [`Node::expand`] is a defect.
    pub fn ev(&self) -> anyhow::Result<Utility> {
        match self {
            Self::Decision(Inner { ev, .. })
            | Self::Chance(Inner { ev, .. })
            | Self::Terminal(Leaf { ev, .. }) => ev.ok_or_else(|| Defect::Unexpanded.into()),
        }
    }
    pub fn is_expanded(&self) -> bool {
        self.ev().is_ok()
    }
    pub fn state(&self) -> &State {
        match self {
            Self::Decision(inner) | Self::Chance(inner) => &inner.state,
            Self::Terminal(leaf) => &leaf.state,
        }
    }
    pub fn children(&self) -> &[Child] {
        match self {
            Self::Decision(inner) | Self::Chance(inner) => &inner.children,
            Self::Terminal(_) => &[],
        }
    }
    pub fn ending(&self) -> Option<Ending> {
        match self {
            Self::Terminal(leaf) => Some(leaf.ending),
            _ => None,
        }
    }
    /// Nodes in the subtree, this one included.
    pub fn size(&self) -> usize {
        1 + self.children().iter().map(|c| c.node.size()).sum::<usize>()
    }

    fn write(&self, f: &mut std::fmt::Formatter, depth: usize, edge: &str) -> std::fmt::Result {
        let kind = match self {
            Self::Decision(inner) if inner.expired => String::from("decision (expired)"),
            Self::Chance(inner) if inner.expired => String::from("chance (expired)"),
            Self::Decision(_) => String::from("decision"),
            Self::Chance(_) => String::from("chance"),
            Self::Terminal(leaf) => format!("{:?}", leaf.ending).to_lowercase(),
        };
        let ev = match self.ev() {
            Ok(ev) => format!("{:.2}", ev),
            Err(_) => String::from("?"),
        };
        writeln!(
            f,
            "{}{} {} {} pot {} ev {}",
            "  ".repeat(depth),
            edge,
            kind,
            self.state().street(),
            self.state().pot(),
            ev
        )?;
        for child in self.children() {
            let edge = format!("{} w{:.2}", child.action, child.weight);
            child.node.write(f, depth + 1, &edge)?;
        }
        Ok(())
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.write(f, 0, "*")
    }
}

impl Inner {
    fn new(state: State, tokens: Tokens, seed: u64) -> Self {
        Self {
            state,
            tokens,
            seed,
            ev: None,
            expired: false,
            children: Vec::new(),
        }
    }

    fn expand(&mut self, ctx: &Context, maximize: bool) -> anyhow::Result<Utility> {
        if let Some(ev) = self.ev {
            return Ok(ev);
        }
        if ctx.expired() {
            let ev = neutral(ctx.bot, &self.state)?;
            log::debug!("deadline passed, neutral ev {:.2} at depth {}", ev, self.state.depth());
            self.expired = true;
            self.ev = Some(ev);
            return Ok(ev);
        }
        let ref mut rng = SmallRng::seed_from_u64(self.seed);
        let branches = match maximize {
            true => self.decisions(ctx, rng)?,
            false => self.responses(ctx, rng)?,
        };
        self.children = branches
            .into_iter()
            .map(|branch| Child {
                action: branch.action,
                weight: branch.weight,
                count: branch.count,
                node: Node::new(branch.state, branch.tokens, rng.random(), ctx.bot),
            })
            .collect();
        let evs = self.expand_children(ctx)?;
        let ev = match maximize {
            true => evs.iter().copied().fold(Utility::NEG_INFINITY, Utility::max),
            false => self
                .children
                .iter()
                .zip(evs.iter())
                .map(|(child, ev)| child.weight * ev)
                .sum::<Utility>(),
        };
        log::trace!(
            "{} {} children, ev {:.2}",
            if maximize { "decision" } else { "chance" },
            self.children.len(),
            ev
        );
        self.ev = Some(ev);
        Ok(ev)
    }

    /// The searching player's own options.
    fn decisions(&self, ctx: &Context, rng: &mut SmallRng) -> anyhow::Result<Vec<Branch>> {
        let actions = ctx.sizing.candidates(&self.state);
        if actions.is_empty() {
            return Err(Defect::NoActor.into());
        }
        match ctx.decisions {
            Decisions::Sampled => {
                ctx.expander
                    .expand(&self.state, &Candidate::uniform(&actions), self.tokens, rng)
            }
            Decisions::Exhaustive => {
                let n = actions.len();
                actions
                    .into_iter()
                    .map(|action| {
                        Ok(Branch {
                            action,
                            state: self.state.play(&action)?,
                            tokens: self.tokens / n,
                            weight: 1.0 / n as Probability,
                            count: 1,
                        })
                    })
                    .collect()
            }
        }
    }

    /// An opponent's modelled replies.
    fn responses(&self, ctx: &Context, rng: &mut SmallRng) -> anyhow::Result<Vec<Branch>> {
        let opponent = self.state.next_to_act().ok_or(Defect::NoActor)?;
        let actions = ctx.sizing.candidates(&self.state);
        if actions.is_empty() {
            return Err(Defect::NoActor.into());
        }
        let candidates = ctx.registry.distribution(opponent, &self.state, &actions);
        ctx.expander.expand(&self.state, &candidates, self.tokens, rng)
    }

    #[cfg(not(feature = "parallel"))]
    fn expand_children(&mut self, ctx: &Context) -> anyhow::Result<Vec<Utility>> {
        self.children
            .iter_mut()
            .map(|child| child.node.expand(ctx))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn expand_children(&mut self, ctx: &Context) -> anyhow::Result<Vec<Utility>> {
        use rayon::prelude::*;
        self.children
            .par_iter_mut()
            .map(|child| child.node.expand(ctx))
            .collect()
    }
}

impl Leaf {
    fn expand(&mut self, ctx: &Context) -> anyhow::Result<Utility> {
        if let Some(ev) = self.ev {
            return Ok(ev);
        }
        let stack = self.state.seat(ctx.bot)?.stack() as Utility;
        let ev = match self.ending {
            Ending::Folded => stack,
            Ending::Uncontested => stack + self.state.pot() as Utility,
            Ending::Showdown | Ending::Exhausted => {
                let ref mut rng = SmallRng::seed_from_u64(self.seed);
                let samples = ctx.equity.estimate(ctx.bot, &self.state, rng)?;
                stack + samples.mean().unwrap_or(0.0)
            }
        };
        self.ev = Some(ev);
        Ok(ev)
    }
}

/// Placeholder EV once the deadline has passed: an even share of the pot.
fn neutral(bot: PlayerId, state: &State) -> anyhow::Result<Utility> {
    let stack = state.seat(bot)?.stack() as Utility;
    let share = state.pot() as Utility / state.n_active().max(1) as Utility;
    Ok(stack + share)
}
