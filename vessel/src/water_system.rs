use std::cell::OnceCell;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use log::debug;
use ordered_float::NotNan;

use crate::area::{active_base_area, AreaProfile};
use crate::bijection::VolumeBijection;
use crate::cuboid_tank::CuboidTank;
use crate::edge::{tanks_by_edge, Edge, TankTable};
use crate::error::{Error, Result};
use crate::level::Level;
use crate::sweep::active_tanks;
use crate::tank::Tank;

/// Structures derived from the tank set, each built on first use.
#[derive(Debug)]
struct Derived<T> {
  tanks_by_bottom: OnceCell<TankTable<T>>,
  tanks_by_top: OnceCell<TankTable<T>>,
  active_tanks: OnceCell<TankTable<T>>,
  active_base_area: OnceCell<AreaProfile>,
  volume_bijection: OnceCell<VolumeBijection>,
}

impl<T> Default for Derived<T> {
  fn default() -> Self {
    Self {
      tanks_by_bottom: OnceCell::new(),
      tanks_by_top: OnceCell::new(),
      active_tanks: OnceCell::new(),
      active_base_area: OnceCell::new(),
      volume_bijection: OnceCell::new(),
    }
  }
}

fn get_or_try_init<V>(cell: &OnceCell<V>, init: impl FnOnce() -> Result<V>) -> Result<&V> {
  if let Some(value) = cell.get() {
    return Ok(value)
  }

  let value = init()?;
  Ok(cell.get_or_init(|| value))
}

/// A set of tanks sharing one water level.
///
/// Queries build and cache the structures they need. The caches live in `OnceCell`s,
/// so a `WaterSystem` can be shared between threads only behind a lock.
#[derive(Debug)]
pub struct WaterSystem<T = CuboidTank> {
  tanks: HashSet<T>,
  derived: Derived<T>,
}

impl<T> Default for WaterSystem<T> {
  fn default() -> Self {
    Self { tanks: HashSet::new(), derived: Derived::default() }
  }
}

impl<T> WaterSystem<T>
where
  T: Tank + Clone + Eq + Hash,
{
  pub fn new(tanks: impl IntoIterator<Item = T>) -> Self {
    let mut system = Self::default();
    system.set_tank_system(tanks);
    system
  }

  /// Replaces the tank set and discards everything derived from the previous one.
  pub fn set_tank_system(&mut self, tanks: impl IntoIterator<Item = T>) {
    self.tanks = tanks.into_iter().collect();
    self.derived = Derived::default();

    debug!("Water system now consists of {} tanks.", self.tanks.len());
  }

  pub fn tanks(&self) -> HashSet<T> {
    self.tanks.clone()
  }

  pub fn tanks_by_bottom(&self) -> Result<TankTable<T>> {
    self.fetch_tanks_by_bottom().cloned()
  }

  pub fn tanks_by_top(&self) -> Result<TankTable<T>> {
    self.fetch_tanks_by_top().cloned()
  }

  pub fn active_tanks(&self) -> Result<TankTable<T>> {
    self.fetch_active_tanks().cloned()
  }

  pub fn active_base_area(&self) -> Result<AreaProfile> {
    self.fetch_active_base_area().cloned()
  }

  /// Lowest bottom and highest top of all tanks.
  pub fn height_range(&self) -> Result<(f64, f64)> {
    let min = self.fetch_tanks_by_bottom()?.keys().next().ok_or(Error::EmptySystem)?;
    let max = self.fetch_tanks_by_top()?.keys().next_back().ok_or(Error::EmptySystem)?;

    Ok((min.into_inner(), max.into_inner()))
  }

  /// Volume of water held when every tank is full.
  pub fn capacity(&self) -> Result<f64> {
    self.height_range()?;
    Ok(self.fetch_volume_bijection()?.capacity())
  }

  /// Filled height of every tank when the water stands at `height`.
  pub fn height_to_tank_level(&self, height: f64) -> Result<HashMap<T, f64>> {
    self.validate_height(height)?;
    Ok(self.filled_heights(height))
  }

  pub fn tank_levels(&self, height: f64) -> Result<HashMap<T, Level>> {
    self.validate_height(height)?;
    Ok(self.tanks.iter().map(|tank| (tank.clone(), tank.level(height))).collect())
  }

  pub fn height_to_volume(&self, height: f64) -> Result<f64> {
    self.validate_height(height)?;
    self.fetch_volume_bijection()?.volume(height)
  }

  pub fn volume_to_height(&self, volume: f64) -> Result<f64> {
    self.fetch_volume_bijection()?.height(volume)
  }

  pub fn volume_to_tank_level(&self, volume: f64) -> Result<HashMap<T, f64>> {
    let height = self.volume_to_height(volume)?;
    Ok(self.filled_heights(height))
  }

  fn filled_heights(&self, height: f64) -> HashMap<T, f64> {
    self.tanks.iter().map(|tank| (tank.clone(), tank.filled_height(height))).collect()
  }

  fn validate_height(&self, height: f64) -> Result<()> {
    let key = NotNan::new(height)?;
    let (min, max) = self.height_range()?;

    if *key < min || *key > max {
      return Err(Error::HeightOutOfRange { height, min, max })
    }

    Ok(())
  }

  fn fetch_tanks_by_bottom(&self) -> Result<&TankTable<T>> {
    get_or_try_init(&self.derived.tanks_by_bottom, || {
      debug!("Indexing tanks by bottom.");
      tanks_by_edge(&self.tanks, Edge::Bottom)
    })
  }

  fn fetch_tanks_by_top(&self) -> Result<&TankTable<T>> {
    get_or_try_init(&self.derived.tanks_by_top, || {
      debug!("Indexing tanks by top.");
      tanks_by_edge(&self.tanks, Edge::Top)
    })
  }

  fn fetch_active_tanks(&self) -> Result<&TankTable<T>> {
    get_or_try_init(&self.derived.active_tanks, || {
      let bottoms = self.fetch_tanks_by_bottom()?;
      let tops = self.fetch_tanks_by_top()?;

      debug!("Sweeping {} bottom and {} top breakpoints.", bottoms.len(), tops.len());
      Ok(active_tanks(bottoms, tops))
    })
  }

  fn fetch_active_base_area(&self) -> Result<&AreaProfile> {
    get_or_try_init(&self.derived.active_base_area, || {
      let active = self.fetch_active_tanks()?;

      debug!("Summing base areas at {} breakpoints.", active.len());
      Ok(active_base_area(active))
    })
  }

  fn fetch_volume_bijection(&self) -> Result<&VolumeBijection> {
    get_or_try_init(&self.derived.volume_bijection, || {
      let area = self.fetch_active_base_area()?;

      debug!("Integrating volumes over {} breakpoints.", area.len());
      VolumeBijection::new(area.clone())
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn tank(bottom: f64, top: f64, area: f64) -> CuboidTank {
    CuboidTank::new([0.0, 0.0, bottom], [area, 1.0, top]).unwrap()
  }

  #[test]
  fn empty_system() {
    let system: WaterSystem = WaterSystem::default();

    assert!(system.tanks_by_bottom().unwrap().is_empty());
    assert!(system.active_tanks().unwrap().is_empty());
    assert!(system.active_base_area().unwrap().is_empty());

    assert_eq!(system.height_range(), Err(Error::EmptySystem));
    assert_eq!(system.capacity(), Err(Error::EmptySystem));
    assert_eq!(system.height_to_tank_level(0.0), Err(Error::EmptySystem));
    assert_eq!(system.height_to_volume(0.0), Err(Error::EmptySystem));
    assert_eq!(system.volume_to_tank_level(0.0), Err(Error::EmptySystem));
  }

  #[test]
  fn duplicate_tanks_collapse() {
    let system = WaterSystem::new(vec![tank(0.0, 1.0, 2.0), tank(0.0, 1.0, 2.0)]);
    assert_eq!(system.tanks().len(), 1);
    assert_eq!(system.capacity(), Ok(2.0));
  }

  #[test]
  fn caches_are_built_lazily() {
    let system = WaterSystem::new(vec![tank(0.0, 2.0, 3.0)]);
    assert!(system.derived.volume_bijection.get().is_none());
    assert!(system.derived.active_tanks.get().is_none());

    assert_eq!(system.height_to_volume(1.0), Ok(3.0));
    assert!(system.derived.tanks_by_bottom.get().is_some());
    assert!(system.derived.tanks_by_top.get().is_some());
    assert!(system.derived.active_tanks.get().is_some());
    assert!(system.derived.active_base_area.get().is_some());
    assert!(system.derived.volume_bijection.get().is_some());
  }

  #[test]
  fn replacing_tanks_invalidates_caches() {
    let mut system = WaterSystem::new(vec![tank(0.0, 2.0, 3.0)]);
    assert_eq!(system.height_to_volume(2.0), Ok(6.0));

    system.set_tank_system(vec![tank(0.0, 4.0, 1.0)]);
    assert!(system.derived.volume_bijection.get().is_none());
    assert!(system.derived.tanks_by_bottom.get().is_none());

    assert_eq!(system.height_range(), Ok((0.0, 4.0)));
    assert_eq!(system.height_to_volume(2.0), Ok(2.0));
    assert_eq!(system.capacity(), Ok(4.0));
  }

  #[test]
  fn failed_queries_leave_caches_untouched() {
    let system = WaterSystem::new(vec![tank(0.0, 2.0, 3.0)]);
    assert!(system.height_to_volume(f64::NAN).is_err());
    assert!(system.derived.tanks_by_bottom.get().is_none());
  }

  #[test]
  fn returned_tables_are_copies() {
    let a = tank(0.0, 2.0, 1.0);
    let b = tank(1.0, 3.0, 1.0);
    let system = WaterSystem::new(vec![a, b]);

    let mut active = system.active_tanks().unwrap();
    for tanks in active.values_mut() {
      tanks.clear();
    }
    active.clear();
    assert_eq!(system.active_tanks().unwrap().len(), 4);
    assert_eq!(system.active_tanks().unwrap().values().map(HashSet::len).sum::<usize>(), 4);

    let mut bottoms = system.tanks_by_bottom().unwrap();
    bottoms.values_mut().for_each(HashSet::clear);
    assert!(system.tanks_by_bottom().unwrap().values().all(|tanks| tanks.len() == 1));

    let mut area = system.active_base_area().unwrap();
    area.values_mut().for_each(|a| *a = -1.0);
    assert!(system.active_base_area().unwrap().values().all(|&a| a >= 0.0));

    let mut tanks = system.tanks();
    tanks.clear();
    assert_eq!(system.tanks().len(), 2);
  }

  #[test]
  fn tank_levels() {
    let a = tank(0.0, 2.0, 1.0);
    let b = tank(1.0, 3.0, 1.0);
    let system = WaterSystem::new(vec![a, b]);

    let levels = system.tank_levels(1.5).unwrap();
    assert_eq!(levels[&a].percentage(), 0.75);
    assert_eq!(levels[&b].percentage(), 0.25);

    assert_eq!(system.tank_levels(3.5).unwrap_err(), Error::HeightOutOfRange { height: 3.5, min: 0.0, max: 3.0 });
  }

  #[test]
  fn volume_to_height() {
    let system = WaterSystem::new(vec![tank(0.0, 2.0, 1.0), tank(1.0, 3.0, 1.0)]);
    assert_eq!(system.volume_to_height(1.0), Ok(1.0));
    assert_eq!(system.volume_to_height(2.0), Ok(1.5));
    assert_eq!(system.volume_to_height(-1.0), Err(Error::NegativeVolume(-1.0)));
    assert_eq!(system.volume_to_height(5.0), Err(Error::VolumeOutOfRange { volume: 5.0, max: 4.0 }));
  }
}
