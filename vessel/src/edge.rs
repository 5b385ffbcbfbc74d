use std::collections::{BTreeMap, HashSet};
use std::hash::Hash;

use ordered_float::NotNan;

use crate::error::Result;
use crate::tank::Tank;

/// A height at which the set of active tanks can change.
pub type Breakpoint = NotNan<f64>;

/// Tanks grouped by breakpoint, in ascending order.
pub type TankTable<T> = BTreeMap<Breakpoint, HashSet<T>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
  Bottom,
  Top,
}

impl Edge {
  pub fn of<T: Tank>(self, tank: &T) -> Result<Breakpoint> {
    let height = match self {
      Edge::Bottom => tank.bottom(),
      Edge::Top => tank.top(),
    };

    Ok(NotNan::new(height)?)
  }
}

/// Groups `tanks` by the exact height of their `edge`.
pub fn tanks_by_edge<'a, T, I>(tanks: I, edge: Edge) -> Result<TankTable<T>>
where
  T: Tank + Clone + Eq + Hash + 'a,
  I: IntoIterator<Item = &'a T>,
{
  let mut table = TankTable::new();

  for tank in tanks {
    table.entry(edge.of(tank)?).or_insert_with(HashSet::new).insert(tank.clone());
  }

  Ok(table)
}
