use std::collections::BTreeMap;

use ordered_float::NotNan;

use crate::area::AreaProfile;
use crate::edge::Breakpoint;
use crate::error::{Error, Result};

/// Piecewise linear mapping between water height and the volume below it.
///
/// Volumes are integrated with the rectangle rule: the area recorded at a breakpoint holds
/// until the next breakpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeBijection {
  area: AreaProfile,
  height_to_volume: BTreeMap<Breakpoint, NotNan<f64>>,
  volume_to_height: BTreeMap<NotNan<f64>, Breakpoint>,
}

impl VolumeBijection {
  pub fn new(area: AreaProfile) -> Result<Self> {
    let mut height_to_volume = BTreeMap::new();
    let mut volume_to_height = BTreeMap::new();

    let mut running_volume = 0.0;
    let mut last_height = 0.0;
    let mut last_area = 0.0;

    for (&height, &base_area) in &area {
      running_volume += (height.into_inner() - last_height) * last_area;

      let volume = NotNan::new(running_volume)?;
      height_to_volume.insert(height, volume);
      // A zero-area interval shares its volume with the breakpoint above; keep the lower one.
      volume_to_height.entry(volume).or_insert(height);

      last_height = height.into_inner();
      last_area = base_area;
    }

    Ok(Self { area, height_to_volume, volume_to_height })
  }

  pub fn area(&self) -> &AreaProfile {
    &self.area
  }

  pub fn height_to_volume(&self) -> &BTreeMap<Breakpoint, NotNan<f64>> {
    &self.height_to_volume
  }

  pub fn volume_to_height(&self) -> &BTreeMap<NotNan<f64>, Breakpoint> {
    &self.volume_to_height
  }

  /// Volume stored at the highest breakpoint.
  pub fn capacity(&self) -> f64 {
    self.volume_to_height.keys().next_back().map_or(0.0, |volume| volume.into_inner())
  }

  /// Volume below `height`.
  pub fn volume(&self, height: f64) -> Result<f64> {
    let key = NotNan::new(height)?;

    let (min, max) = self.range().ok_or(Error::EmptySystem)?;
    if key < min || key > max {
      return Err(Error::HeightOutOfRange { height, min: min.into_inner(), max: max.into_inner() })
    }

    let (&last_break, &volume) = self.height_to_volume.range(..=key).next_back().ok_or(Error::EmptySystem)?;

    Ok(volume.into_inner() + self.area_at(last_break) * (height - last_break.into_inner()))
  }

  /// Water height at which the system holds `volume`.
  pub fn height(&self, volume: f64) -> Result<f64> {
    let key = NotNan::new(volume)?;

    if volume < 0.0 {
      return Err(Error::NegativeVolume(volume))
    }

    let max = self.volume_to_height.keys().next_back().ok_or(Error::EmptySystem)?;
    if key > *max {
      return Err(Error::VolumeOutOfRange { volume, max: max.into_inner() })
    }

    let (&last_volume, &first_break) = match self.volume_to_height.range(..=key).next_back() {
      Some(entry) => entry,
      None => return Err(Error::EmptySystem),
    };

    if key == last_volume {
      return Ok(first_break.into_inner())
    }

    // Interpolate from the top of the run of breakpoints sharing `last_volume`.
    let last_break = self
      .height_to_volume
      .range(first_break..)
      .take_while(|(_, v)| **v == last_volume)
      .map(|(h, _)| *h)
      .last()
      .unwrap_or(first_break);

    let area = self.area_at(last_break);
    if area <= 0.0 {
      return Err(Error::UnreachableVolume { volume, height: last_break.into_inner() })
    }

    Ok(last_break.into_inner() + (volume - last_volume.into_inner()) / area)
  }

  fn range(&self) -> Option<(Breakpoint, Breakpoint)> {
    let min = self.height_to_volume.keys().next()?;
    let max = self.height_to_volume.keys().next_back()?;
    Some((*min, *max))
  }

  fn area_at(&self, breakpoint: Breakpoint) -> f64 {
    self.area.get(&breakpoint).copied().unwrap_or(0.0)
  }
}
