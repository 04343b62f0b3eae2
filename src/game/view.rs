use serde::Serialize;

use super::assignment::{AssignmentState, Bucket};
use super::cards::{CardBoard, CardChart, CardKey, SampleKey};
use super::sample::SampleChart;
use crate::roster::{PersonRecord, Roster};

#[derive(Debug, Clone, Serialize)]
pub struct CardView {
    pub key: CardKey,
    pub title: &'static str,
    pub revealed: bool,
    pub chart: Option<CardChart>,
}

/// A revealed sample card with `chart: None` had too few people to sample
#[derive(Debug, Clone, Serialize)]
pub struct SampleCardView {
    pub key: SampleKey,
    pub title: &'static str,
    pub revealed: bool,
    pub chart: Option<SampleChart>,
}

/// Everything a front end needs to draw the game after one command
#[derive(Debug, Clone, Serialize)]
pub struct GameView {
    pub boom: Vec<PersonRecord>,
    pub pam: Vec<PersonRecord>,
    pub current: Option<PersonRecord>,
    pub roster_size: usize,
    pub unassigned_count: usize,
    pub can_undo: bool,
    pub cards: Vec<CardView>,
    pub samples: Vec<SampleCardView>,
    pub notice: Option<String>,
}

impl GameView {
    pub fn build(roster: &Roster, state: &AssignmentState, board: &CardBoard, notice: Option<String>) -> GameView {
        let cards = CardKey::ALL
            .into_iter()
            .map(|key| {
                let revealed = board.is_revealed(key);
                CardView {
                    key,
                    title: key.title(),
                    revealed,
                    chart: revealed.then(|| key.chart(roster)),
                }
            })
            .collect();

        let samples = SampleKey::ALL
            .into_iter()
            .map(|key| {
                let picked = board.sample(key);
                SampleCardView {
                    key,
                    title: key.title(),
                    revealed: picked.is_some(),
                    chart: picked.flatten().and_then(|indices| SampleChart::build(roster, indices)),
                }
            })
            .collect();

        GameView {
            boom: roster.select(state.bucket(Bucket::Boom)),
            pam: roster.select(state.bucket(Bucket::Pam)),
            current: state.current().and_then(|i| roster.get(i).cloned()),
            roster_size: roster.len(),
            unassigned_count: state.unassigned().len(),
            can_undo: state.can_undo(),
            cards,
            samples,
            notice,
        }
    }
}

#[cfg(test)]
impl GameView {
    pub fn card(&self, key: CardKey) -> Option<&CardView> {
        self.cards.iter().find(|c| c.key == key)
    }

    pub fn sample(&self, key: SampleKey) -> Option<&SampleCardView> {
        self.samples.iter().find(|s| s.key == key)
    }
}
