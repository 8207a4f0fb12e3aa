//! The board: an ordered partition of cards across the fixed stages

use super::card::Card;
use super::command::MoveCommand;
use super::ids::CardId;
use super::stage::Stage;
use crate::error::{BoardError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Derived aggregate counts.
///
/// Always recomputed from the card lists via [`Board::totals`], never stored
/// or mutated independently of the lists they summarize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardTotals {
    pub total: usize,
    pub per_stage: BTreeMap<Stage, usize>,
    pub overdue: usize,
}

/// The canonical view model: every stage maps to an ordered card list.
///
/// Central invariant: every card appears in exactly one stage's list, its
/// `stage` field matches the list it is stored under, and positions within a
/// list are strictly increasing. [`Board::validate`] checks the invariant;
/// violations indicate an upstream data bug and are never silently repaired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    lanes: BTreeMap<Stage, Vec<Card>>,
}

impl Board {
    /// Empty board with every stage present
    pub fn new() -> Self {
        Self {
            lanes: Stage::ALL.iter().map(|stage| (*stage, Vec::new())).collect(),
        }
    }

    /// Build a board by distributing cards into their stage lists, sorted by
    /// position. The result is validated.
    pub fn from_cards(cards: Vec<Card>) -> Result<Self> {
        let mut board = Self::new();
        for card in cards {
            board.lanes.entry(card.stage).or_default().push(card);
        }
        for lane in board.lanes.values_mut() {
            lane.sort_by_key(|card| card.position);
        }
        board.validate()?;
        Ok(board)
    }

    /// Cards in one stage, ordered by position
    pub fn lane(&self, stage: Stage) -> &[Card] {
        self.lanes.get(&stage).map(|lane| lane.as_slice()).unwrap_or(&[])
    }

    /// All `(stage, lane)` pairs in board order
    pub fn lanes(&self) -> impl Iterator<Item = (Stage, &[Card])> + '_ {
        Stage::ALL.iter().map(move |stage| (*stage, self.lane(*stage)))
    }

    /// Every card on the board, in board order
    pub fn cards(&self) -> impl Iterator<Item = &Card> + '_ {
        self.lanes().flat_map(|(_, lane)| lane.iter())
    }

    /// Linear scan lookup across stages; boards are small, bounded by a
    /// user's application count.
    pub fn find(&self, id: &CardId) -> Option<&Card> {
        self.cards().find(|card| &card.id == id)
    }

    /// Stage and list index of a card
    pub fn locate(&self, id: &CardId) -> Option<(Stage, usize)> {
        for (stage, lane) in self.lanes() {
            if let Some(index) = lane.iter().position(|card| &card.id == id) {
                return Some((stage, index));
            }
        }
        None
    }

    /// Total number of cards
    pub fn len(&self) -> usize {
        self.lanes.values().map(Vec::len).sum()
    }

    /// Whether the board holds no cards
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Derived totals as a pure function of the card lists
    pub fn totals(&self, now: DateTime<Utc>) -> BoardTotals {
        let mut per_stage = BTreeMap::new();
        let mut total = 0;
        let mut overdue = 0;
        for (stage, lane) in self.lanes() {
            per_stage.insert(stage, lane.len());
            total += lane.len();
            overdue += lane.iter().filter(|card| card.is_overdue(now)).count();
        }
        BoardTotals {
            total,
            per_stage,
            overdue,
        }
    }

    /// Check the central invariant.
    ///
    /// Returns `MalformedBoard` on the first violation: a card listed under
    /// the wrong stage key, a card appearing more than once, or positions
    /// that are not strictly increasing within a lane.
    pub fn validate(&self) -> Result<()> {
        let mut seen: HashSet<&CardId> = HashSet::new();
        for (stage, lane) in &self.lanes {
            let mut last: Option<u32> = None;
            for card in lane {
                if card.stage != *stage {
                    return Err(BoardError::malformed(format!(
                        "card {} is listed under {} but carries stage {}",
                        card.id, stage, card.stage
                    )));
                }
                if !seen.insert(&card.id) {
                    return Err(BoardError::malformed(format!(
                        "card {} appears in more than one list",
                        card.id
                    )));
                }
                if let Some(previous) = last {
                    if card.position <= previous {
                        return Err(BoardError::malformed(format!(
                            "positions in {} are not strictly increasing at card {}",
                            stage, card.id
                        )));
                    }
                }
                last = Some(card.position);
            }
        }
        Ok(())
    }

    /// The board with one accepted move reflected: the card is detached,
    /// inserted before the first card at or past the requested position, and
    /// both affected lanes are renumbered contiguously.
    ///
    /// This is a projection used for the optimistic view overlay and by the
    /// in-memory store; the remote store remains authoritative for real
    /// ordering.
    pub fn with_move(&self, command: &MoveCommand) -> Result<Board> {
        let mut board = self.clone();

        let mut detached = None;
        for lane in board.lanes.values_mut() {
            if let Some(index) = lane.iter().position(|card| card.id == command.card_id) {
                detached = Some(lane.remove(index));
                break;
            }
        }
        let Some(mut card) = detached else {
            return Err(BoardError::card_not_found(&command.card_id));
        };

        let former_stage = card.stage;
        card.stage = command.to_stage;

        let lane = board.lanes.entry(command.to_stage).or_default();
        let index = lane
            .iter()
            .position(|card| card.position >= command.new_position)
            .unwrap_or(lane.len());
        lane.insert(index, card);

        board.renumber(former_stage);
        board.renumber(command.to_stage);
        Ok(board)
    }

    fn renumber(&mut self, stage: Stage) {
        if let Some(lane) = self.lanes.get_mut(&stage) {
            for (index, card) in lane.iter_mut().enumerate() {
                card.position = index as u32;
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
