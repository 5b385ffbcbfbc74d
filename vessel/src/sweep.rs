use std::collections::{btree_map, HashSet};
use std::hash::Hash;
use std::iter::{FusedIterator, Peekable};

use log::trace;

use crate::edge::{Breakpoint, TankTable};

/// The changes to the active set at a single breakpoint.
#[derive(Debug)]
pub struct Transition<'a, T> {
  pub breakpoint: Breakpoint,
  /// Tanks whose bottom lies at `breakpoint`.
  pub activate: Option<&'a HashSet<T>>,
  /// Tanks whose top lies at `breakpoint`.
  pub deactivate: Option<&'a HashSet<T>>,
}

/// Merges a bottom and a top table into one ascending sequence of transitions.
///
/// Keys present in both tables are merged into a single transition.
#[derive(Debug)]
pub struct Transitions<'a, T> {
  bottoms: Peekable<btree_map::Iter<'a, Breakpoint, HashSet<T>>>,
  tops: Peekable<btree_map::Iter<'a, Breakpoint, HashSet<T>>>,
}

impl<'a, T> Transitions<'a, T> {
  pub fn new(bottoms: &'a TankTable<T>, tops: &'a TankTable<T>) -> Self {
    Self { bottoms: bottoms.iter().peekable(), tops: tops.iter().peekable() }
  }
}

impl<'a, T> Iterator for Transitions<'a, T> {
  type Item = Transition<'a, T>;

  fn next(&mut self) -> Option<Self::Item> {
    let bottom = self.bottoms.peek().map(|(height, _)| **height);
    let top = self.tops.peek().map(|(height, _)| **height);

    let breakpoint = match (bottom, top) {
      (None, None) => return None,
      (Some(b), None) => b,
      (None, Some(t)) => t,
      (Some(b), Some(t)) => b.min(t),
    };

    let deactivate = self.tops.next_if(|(height, _)| **height == breakpoint).map(|(_, tanks)| tanks);
    let activate = self.bottoms.next_if(|(height, _)| **height == breakpoint).map(|(_, tanks)| tanks);

    Some(Transition { breakpoint, activate, deactivate })
  }
}

impl<T> FusedIterator for Transitions<'_, T> {}

/// Applies `transition` to the running active set and returns the set active at its breakpoint.
///
/// Tanks ending at the breakpoint are removed before tanks starting there are added. A tank
/// that both starts and ends at the breakpoint is part of the returned set only, it does not
/// stay in `running`.
pub fn step<T>(running: &mut HashSet<T>, transition: &Transition<'_, T>) -> HashSet<T>
where
  T: Clone + Eq + Hash,
{
  if let Some(deactivate) = transition.deactivate {
    running.retain(|tank| !deactivate.contains(tank));
  }

  if let Some(activate) = transition.activate {
    running.extend(activate.iter().cloned());
  }

  let snapshot = running.clone();

  if let (Some(activate), Some(deactivate)) = (transition.activate, transition.deactivate) {
    for tank in activate.intersection(deactivate) {
      running.remove(tank);
    }
  }

  snapshot
}

/// Computes the set of tanks active at every breakpoint of `bottoms` and `tops`.
pub fn active_tanks<T>(bottoms: &TankTable<T>, tops: &TankTable<T>) -> TankTable<T>
where
  T: Clone + Eq + Hash,
{
  let mut running = HashSet::new();

  Transitions::new(bottoms, tops)
    .map(|transition| {
      trace!(
        "breakpoint {}: {} activated, {} deactivated",
        transition.breakpoint,
        transition.activate.map_or(0, HashSet::len),
        transition.deactivate.map_or(0, HashSet::len),
      );

      let snapshot = step(&mut running, &transition);
      (transition.breakpoint, snapshot)
    })
    .collect()
}
