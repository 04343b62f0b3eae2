use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::assignment::{AssignOutcome, AssignmentState, Bucket, DrawOutcome, UndoOutcome};
use super::cards::{CardBoard, CardKey, SampleKey};
use super::view::GameView;
use crate::roster::Roster;

/// One user action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Draw,
    Assign(Bucket),
    Undo,
    Reset,
    RevealCard(CardKey),
    RevealSample(SampleKey),
}

/// A single game: the loaded roster, who went where, which cards are open,
/// and the random source used for draws and samples
#[derive(Debug)]
pub struct GameSession<R = StdRng> {
    roster: Roster,
    state: AssignmentState,
    cards: CardBoard,
    rng: R,
}

impl GameSession<StdRng> {
    /// Seeded sessions replay the same draws; unseeded ones use OS entropy
    pub fn with_seed(roster: Roster, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        GameSession::new(roster, rng)
    }
}

impl<R: Rng> GameSession<R> {
    pub fn new(roster: Roster, rng: R) -> Self {
        info!("new game with {} people", roster.len());
        GameSession {
            state: AssignmentState::new(roster.len()),
            cards: CardBoard::default(),
            roster,
            rng,
        }
    }

    /// Runs one command to completion and returns the updated view
    pub fn apply(&mut self, command: Command) -> GameView {
        debug!("command {:?}", command);
        let notice = match command {
            Command::Draw => match self.state.draw(&mut self.rng) {
                DrawOutcome::Drawn(_) => None,
                DrawOutcome::PoolEmpty => Some("No more people left to draw.".to_string()),
                DrawOutcome::AlreadyPending(index) => Some(format!(
                    "{} is still waiting for a team.",
                    self.name_of(index)
                )),
            },
            Command::Assign(bucket) => match self.state.assign(bucket) {
                AssignOutcome::Assigned { .. } => None,
                AssignOutcome::NothingPending => Some("Draw someone before picking a team.".to_string()),
            },
            Command::Undo => match self.state.undo() {
                UndoOutcome::Restored { abandoned: Some(pending), .. } => Some(format!(
                    "{} went back into the pool.",
                    self.name_of(pending)
                )),
                UndoOutcome::Restored { abandoned: None, .. } => None,
                UndoOutcome::NothingToUndo => Some("Nothing to undo.".to_string()),
            },
            Command::Reset => {
                self.state.reset();
                self.cards.clear();
                None
            }
            Command::RevealCard(card) => {
                self.cards.reveal(card);
                None
            }
            Command::RevealSample(sample) => {
                self.cards
                    .reveal_sample(sample, self.roster.len(), self.state.unassigned(), &mut self.rng);
                match self.cards.sample(sample) {
                    Some(None) => Some(format!(
                        "Not enough people for \"{}\" (needs {}).",
                        sample.title(),
                        sample.size()
                    )),
                    _ => None,
                }
            }
        };
        debug_assert!(self.state.partition_holds());
        GameView::build(&self.roster, &self.state, &self.cards, notice)
    }

    /// Current view without changing anything
    pub fn view(&self) -> GameView {
        GameView::build(&self.roster, &self.state, &self.cards, None)
    }

    fn name_of(&self, index: usize) -> String {
        self.roster
            .get(index)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| format!("#{}", index))
    }

    #[cfg(test)]
    pub fn state(&self) -> &AssignmentState {
        &self.state
    }
}
