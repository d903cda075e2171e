// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Swipe triage over wishlist items.
//!
//! A [`TriageDeck`] is a queue of candidates built once from a shuffled,
//! photo-bearing subset of the wishlist. Only the head is interactive. A
//! committed card leaves the deck immediately; its status write runs in the
//! background and a failure is only logged. The deck never refills.

use std::collections::VecDeque;
use std::sync::Arc;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use curio_config::model::TriageConfig;
use curio_core::models::{LifecycleStatus, WishlistItem};

use crate::actions::{ItemMutations, SwipeAction};

/// Commit thresholds and stack size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriageSettings {
    /// Horizontal displacement, in pixels, beyond which a release commits.
    pub distance_threshold: f64,
    /// Release speed, in pixels per second, beyond which a release commits.
    pub velocity_threshold: f64,
    /// Cards rendered behind the head.
    pub stack_depth: usize,
}

impl Default for TriageSettings {
    fn default() -> Self {
        Self {
            distance_threshold: 100.0,
            velocity_threshold: 500.0,
            stack_depth: 4,
        }
    }
}

impl From<&TriageConfig> for TriageSettings {
    fn from(config: &TriageConfig) -> Self {
        Self {
            distance_threshold: config.distance_threshold,
            velocity_threshold: config.velocity_threshold,
            stack_depth: config.stack_depth,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Direction {
    /// Reject.
    Left,
    /// Accept.
    Right,
}

impl Direction {
    pub fn action(self) -> SwipeAction {
        match self {
            Direction::Left => SwipeAction::Pass,
            Direction::Right => SwipeAction::Keep,
        }
    }

    pub fn status(self) -> LifecycleStatus {
        self.action().status()
    }
}

/// The end of a drag gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Release {
    pub offset_x: f64,
    pub velocity_x: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "direction", rename_all = "snake_case")]
pub enum GestureDecision {
    Commit(Direction),
    SpringBack,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Enter,
    Escape,
}

impl TriageSettings {
    /// Commits when either threshold is exceeded.
    pub fn decide(&self, release: Release) -> GestureDecision {
        let far = release.offset_x.abs() > self.distance_threshold;
        let fast = release.velocity_x.abs() > self.velocity_threshold;
        if !(far || fast) {
            return GestureDecision::SpringBack;
        }
        let sign = if release.offset_x != 0.0 {
            release.offset_x
        } else {
            release.velocity_x
        };
        if sign < 0.0 {
            GestureDecision::Commit(Direction::Left)
        } else {
            GestureDecision::Commit(Direction::Right)
        }
    }
}

/// A card that has left the deck.
#[derive(Debug)]
pub struct TriageCommit {
    pub item: WishlistItem,
    pub direction: Direction,
    pub status: LifecycleStatus,
    /// The background status write. Dropping it detaches the task.
    pub write: JoinHandle<bool>,
}

/// One rendered card in the stack.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardLayer {
    pub item: WishlistItem,
    pub depth: usize,
    pub interactive: bool,
    pub y_offset: f64,
    pub scale: f64,
    pub brightness: f64,
    /// Degrees.
    pub tilt: f64,
}

impl CardLayer {
    fn at(item: WishlistItem, depth: usize) -> Self {
        let d = depth as f64;
        Self {
            item,
            depth,
            interactive: depth == 0,
            y_offset: 8.0 * d,
            scale: 1.0 - 0.04 * d,
            brightness: 1.0 - 0.1 * d,
            tilt: tilt(depth),
        }
    }
}

/// Alternating, depth-dependent tilt. The head is straight.
fn tilt(depth: usize) -> f64 {
    if depth == 0 {
        return 0.0;
    }
    let base = if depth % 2 == 0 { 3.0 } else { -3.0 };
    let spread = if depth % 3 == 0 { 1.0 } else { -1.0 };
    base + depth as f64 * spread
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "cards", rename_all = "snake_case")]
pub enum DeckView {
    Empty,
    Cards(Vec<CardLayer>),
}

pub struct TriageDeck {
    queue: VecDeque<WishlistItem>,
    settings: TriageSettings,
    mutations: Arc<dyn ItemMutations>,
}

impl TriageDeck {
    /// Builds a shuffled deck from the items that have a photo.
    pub fn new<R: Rng + ?Sized>(
        items: Vec<WishlistItem>,
        settings: &TriageSettings,
        mutations: Arc<dyn ItemMutations>,
        rng: &mut R,
    ) -> Self {
        let mut candidates: Vec<WishlistItem> =
            items.into_iter().filter(WishlistItem::has_photo).collect();
        candidates.shuffle(rng);
        debug!(candidates = candidates.len(), "triage deck shuffled");
        Self {
            queue: candidates.into(),
            settings: *settings,
            mutations,
        }
    }

    /// Like [`TriageDeck::new`] but keeps the given order.
    pub fn with_order(
        items: Vec<WishlistItem>,
        settings: &TriageSettings,
        mutations: Arc<dyn ItemMutations>,
    ) -> Self {
        Self {
            queue: items.into_iter().filter(WishlistItem::has_photo).collect(),
            settings: *settings,
            mutations,
        }
    }

    pub fn settings(&self) -> &TriageSettings {
        &self.settings
    }

    pub fn head(&self) -> Option<&WishlistItem> {
        self.queue.front()
    }

    /// Classifies a release. Spring-back changes nothing.
    pub fn release(&self, release: Release) -> GestureDecision {
        if self.queue.is_empty() {
            return GestureDecision::SpringBack;
        }
        self.settings.decide(release)
    }

    /// Left and right arrows commit without a threshold.
    pub fn key(&self, key: Key) -> Option<Direction> {
        match key {
            Key::ArrowLeft => Some(Direction::Left),
            Key::ArrowRight => Some(Direction::Right),
            _ => None,
        }
    }

    /// Removes the head and starts its status write in the background.
    pub fn commit(&mut self, direction: Direction) -> Option<TriageCommit> {
        let item = self.queue.pop_front()?;
        let action = direction.action();
        let status = action.status();
        info!(
            item_id = %item.id,
            %direction,
            remaining = self.queue.len(),
            "triage commit"
        );

        let mutations = self.mutations.clone();
        let id = item.id.clone();
        let write = tokio::spawn(async move {
            let ok = mutations.tag(&id, action).await;
            if !ok {
                warn!(item_id = %id, %action, "triage status write failed");
            }
            ok
        });

        Some(TriageCommit {
            item,
            direction,
            status,
            write,
        })
    }

    /// The head plus up to `stack_depth` cards behind it.
    pub fn stack(&self) -> DeckView {
        if self.queue.is_empty() {
            return DeckView::Empty;
        }
        let layers = self
            .queue
            .iter()
            .take(self.settings.stack_depth + 1)
            .enumerate()
            .map(|(depth, item)| CardLayer::at(item.clone(), depth))
            .collect();
        DeckView::Cards(layers)
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.queue.iter().any(|item| item.id == id)
    }
}

/// A committed card as reported to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommittedCard {
    pub item_id: String,
    pub direction: Direction,
    pub status: LifecycleStatus,
}

/// Result of one gesture or key press in a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriageStep {
    pub committed: Option<CommittedCard>,
    pub deck: DeckView,
    pub remaining: usize,
}

/// A deck held across requests, with running totals.
pub struct TriageSession {
    deck: TriageDeck,
    kept: usize,
    passed: usize,
}

impl TriageSession {
    pub fn new(deck: TriageDeck) -> Self {
        Self {
            deck,
            kept: 0,
            passed: 0,
        }
    }

    pub fn deck(&self) -> &TriageDeck {
        &self.deck
    }

    pub fn kept(&self) -> usize {
        self.kept
    }

    pub fn passed(&self) -> usize {
        self.passed
    }

    pub fn view(&self) -> TriageStep {
        self.step(None)
    }

    pub fn release(&mut self, release: Release) -> TriageStep {
        match self.deck.release(release) {
            GestureDecision::Commit(direction) => self.swipe(direction),
            GestureDecision::SpringBack => self.step(None),
        }
    }

    pub fn key(&mut self, key: Key) -> TriageStep {
        match self.deck.key(key) {
            Some(direction) => self.swipe(direction),
            None => self.step(None),
        }
    }

    /// Commits the head in `direction` with no threshold (pass/keep buttons).
    pub fn swipe(&mut self, direction: Direction) -> TriageStep {
        let committed = self.deck.commit(direction).map(|commit| {
            match commit.direction {
                Direction::Left => self.passed += 1,
                Direction::Right => self.kept += 1,
            }
            CommittedCard {
                item_id: commit.item.id,
                direction: commit.direction,
                status: commit.status,
            }
        });
        self.step(committed)
    }

    fn step(&self, committed: Option<CommittedCard>) -> TriageStep {
        TriageStep {
            committed,
            deck: self.deck.stack(),
            remaining: self.deck.remaining(),
        }
    }
}
