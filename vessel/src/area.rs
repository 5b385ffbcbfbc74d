use std::collections::BTreeMap;

use crate::edge::{Breakpoint, TankTable};
use crate::tank::Tank;

/// Total base area of the active tanks, valid from each breakpoint up to the next one.
pub type AreaProfile = BTreeMap<Breakpoint, f64>;

pub fn active_base_area<T: Tank>(active_tanks: &TankTable<T>) -> AreaProfile {
  active_tanks
    .iter()
    .map(|(height, tanks)| (*height, tanks.iter().map(Tank::base_area).sum()))
    .collect()
}
