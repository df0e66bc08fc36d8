//! Session snapshot: a private copy of the cards a session will present.
//!
//! The order of a snapshot is shuffled with an injected RNG so that a fixed seed gives a
//! reproducible session.

use super::{CardId, CardSchedule};
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapshotMode {
    /// Only cards with `due_at <= now`.
    #[default]
    DueOnly,
    /// Every card of the deck ("study all").
    All,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionSnapshot {
    pub cards: Vec<CardSchedule>,
}

impl SessionSnapshot {
    /// Filters, deduplicates by id (first occurrence wins) and shuffles.
    pub fn build<R: Rng + ?Sized>(
        cards: &[CardSchedule],
        mode: SnapshotMode,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Self {
        let mut seen: HashSet<CardId> = HashSet::new();
        let mut selected: Vec<CardSchedule> = cards
            .iter()
            .filter(|card| mode == SnapshotMode::All || card.state.is_due(now))
            .filter(|card| seen.insert(card.id))
            .cloned()
            .collect();

        selected.shuffle(rng);

        tracing::debug!(
            ?mode,
            offered = cards.len(),
            selected = selected.len(),
            "built session snapshot"
        );

        Self { cards: selected }
    }

    /// Keeps the given order. Duplicate ids are still dropped.
    pub fn in_order(cards: Vec<CardSchedule>) -> Self {
        let mut seen: HashSet<CardId> = HashSet::new();
        let cards = cards.into_iter().filter(|card| seen.insert(card.id)).collect();
        Self { cards }
    }

    pub fn ids(&self) -> Vec<CardId> {
        self.cards.iter().map(|card| card.id).collect()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Seeded shuffle source. `None` picks a random seed.
pub fn seeded_rng(seed: Option<u64>) -> Pcg64 {
    let seed = seed.unwrap_or_else(rand::random::<u64>);
    Pcg64::seed_from_u64(seed)
}

/// Card counts shown next to a deck name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSummary {
    pub card_count: usize,
    pub due_count: usize,
    /// Due cards that still have their initial interval.
    pub new_count: usize,
}

impl DeckSummary {
    pub fn from_cards(cards: &[CardSchedule], now: DateTime<Utc>) -> Self {
        let due: Vec<_> = cards.iter().filter(|card| card.state.is_due(now)).collect();
        Self {
            card_count: cards.len(),
            due_count: due.len(),
            new_count: due.iter().filter(|card| card.state.is_new()).count(),
        }
    }
}
