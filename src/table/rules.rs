use super::action::Action;
use super::event::Event;
use super::seat::Seat;
use super::state::State;
use crate::Chips;
use crate::Defect;
use crate::cards::Hand;

/// Betting rules and action transitions.
impl State {
    /// Seat of the player due to act.
    pub fn actor(&self) -> anyhow::Result<Seat> {
        let id = self.next_to_act().ok_or(Defect::NoActor)?;
        self.seat(id)
    }
    /// Chips the actor needs to match the largest bet.
    pub fn to_call(&self) -> Chips {
        self.next_to_act().map(|p| self.deficit(p)).unwrap_or(0)
    }
    /// The actor can put in more than a call and someone else could answer.
    pub fn may_raise(&self) -> bool {
        match self.actor() {
            Ok(seat) => {
                seat.stack() > self.deficit(seat.id())
                    && self
                        .preview_next(seat.id())
                        .is_some_and(|other| other != seat.id())
            }
            Err(_) => false,
        }
    }
    /// The canonical legal actions, with the smallest legal bet or raise.
    pub fn legal(&self) -> Vec<Action> {
        let Ok(seat) = self.actor() else {
            return Vec::new();
        };
        let stack = seat.stack();
        let deficit = self.deficit(seat.id());
        let mut options = Vec::new();
        match deficit {
            0 => options.push(Action::Check),
            _ => options.push(Action::Fold),
        }
        if deficit > 0 && deficit < stack {
            options.push(Action::Call(deficit));
        }
        if self.may_raise() {
            let min = self.min_raise().max(1);
            if self.largest_bet() == 0 && min < stack {
                options.push(Action::Bet(min));
            }
            if self.largest_bet() > 0 && deficit + min < stack {
                options.push(Action::Raise(min));
            }
        }
        if stack > 0 && (stack <= deficit || self.may_raise()) {
            options.push(Action::Shove(stack));
        }
        options
    }
    pub fn is_allowed(&self, action: &Action) -> bool {
        let Ok(seat) = self.actor() else {
            return false;
        };
        let stack = seat.stack();
        let deficit = self.deficit(seat.id());
        let min = self.min_raise().max(1);
        match *action {
            Action::Fold => deficit > 0,
            Action::Check => deficit == 0,
            Action::Call(n) => deficit > 0 && n == deficit && n < stack,
            Action::Bet(n) => {
                self.largest_bet() == 0 && self.may_raise() && n >= min && n < stack
            }
            Action::Raise(n) => {
                self.largest_bet() > 0 && self.may_raise() && n >= min && deficit + n < stack
            }
            Action::Shove(n) => {
                n == stack && stack > 0 && (stack <= deficit || self.may_raise())
            }
        }
    }
    /// The safe default: check when free, fold otherwise.
    pub fn passive(&self) -> Action {
        match self.to_call() {
            0 => Action::Check,
            _ => Action::Fold,
        }
    }

    /// Applies the actor's choice, then either hands the turn to the next
    /// player or closes the round. Closed rounds advance through empty
    /// hypothetical streets until someone can act or the hand is over.
    pub fn play(&self, action: &Action) -> anyhow::Result<Self> {
        let actor = self.next_to_act().ok_or(Defect::NoActor)?;
        if !self.is_allowed(action) {
            return Err(Defect::Illegal(format!("{} by {} at\n{}", action, actor, self)).into());
        }
        let state = self.try_apply(action.event(actor))?;
        if state.is_round_over() {
            state.close()
        } else {
            match state.preview_next(actor) {
                Some(next) => state.try_apply(Event::NextPlayer(next)),
                None => Err(Defect::NoNextActor(actor).into()),
            }
        }
    }
    fn close(self) -> anyhow::Result<Self> {
        let mut state = self;
        while !state.is_hand_over() && state.is_round_over() {
            let street = state.street().next();
            state = state.try_apply(Event::NewRound(street, Hand::empty()))?;
        }
        Ok(state)
    }
}
