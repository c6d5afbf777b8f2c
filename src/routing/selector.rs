//! Random route key selection.
//!
//! Both selectors use `fastrand` (wyrand). It is fast and statistically
//! uniform but NOT cryptographically secure; decisions must not be used
//! where an adversary benefits from predicting them.

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::config::RouteList;

/// The route key returned to a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDecision {
    pub decision: String,
}

/// Error type for route selection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    /// Nothing to choose from.
    #[error("no route list found")]
    Empty,
}

/// Strategy picking one route key from a list.
pub trait RouteSelector: Send + Sync + std::fmt::Debug {
    /// Returns one key of `routes`, or [`SelectionError::Empty`].
    fn pick(&self, routes: &RouteList) -> Result<RouteDecision, SelectionError>;
}

/// Uniform selection backed by the thread-local generator.
///
/// Each thread's generator is seeded from process entropy on first use and
/// never reseeded.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformRandom;

impl RouteSelector for UniformRandom {
    fn pick(&self, routes: &RouteList) -> Result<RouteDecision, SelectionError> {
        if routes.is_empty() {
            return Err(SelectionError::Empty);
        }
        decision_at(routes, fastrand::usize(..routes.len()))
    }
}

/// Uniform selection from a fixed seed, for reproducible sequences.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<fastrand::Rng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(fastrand::Rng::with_seed(seed)),
        }
    }
}

impl RouteSelector for SeededRandom {
    fn pick(&self, routes: &RouteList) -> Result<RouteDecision, SelectionError> {
        if routes.is_empty() {
            return Err(SelectionError::Empty);
        }
        let index = self
            .rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .usize(..routes.len());
        decision_at(routes, index)
    }
}

/// Pick one key of `routes` with the default [`UniformRandom`] selector.
pub fn pick_random(routes: &RouteList) -> Result<RouteDecision, SelectionError> {
    UniformRandom.pick(routes)
}

fn decision_at(routes: &RouteList, index: usize) -> Result<RouteDecision, SelectionError> {
    routes
        .get(index)
        .map(|key| RouteDecision {
            decision: key.to_string(),
        })
        .ok_or(SelectionError::Empty)
}
