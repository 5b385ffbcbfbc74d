use std::env;
use std::fs;

use anyhow::{bail, Context};
use lazy_static::lazy_static;
use log::info;
use serde::Deserialize;
use vessel::{CuboidTank, WaterSystem};

mod report;
use self::report::report;

const TANKS_VAR: &str = "WATER_SYSTEM_TANKS";

#[derive(Debug, Clone, Deserialize)]
struct TankSpec {
  bottom_left: [f64; 3],
  top_right: [f64; 3],
}

impl TankSpec {
  fn to_tank(&self) -> vessel::Result<CuboidTank> {
    CuboidTank::new(self.bottom_left, self.top_right)
  }
}

lazy_static! {
  static ref DEFAULT_TANKS: Vec<TankSpec> = vec![
    TankSpec { bottom_left: [0.0, 0.0, 5.0], top_right: [5.0, 1.0, 13.0] },
    TankSpec { bottom_left: [0.0, 0.0, 11.0], top_right: [5.0, 1.0, 18.0] },
    TankSpec { bottom_left: [0.0, 0.0, 15.0], top_right: [4.0, 1.0, 21.0] },
    TankSpec { bottom_left: [0.0, 0.0, 19.0], top_right: [8.0, 1.0, 23.0] },
  ];
}

fn load_tanks() -> anyhow::Result<Vec<CuboidTank>> {
  let specs: Vec<TankSpec> = match env::var(TANKS_VAR) {
    Ok(path) => {
      info!("Loading tanks from '{}'.", path);
      let json = fs::read_to_string(&path).with_context(|| format!("failed to read '{}'", path))?;
      serde_json::from_str(&json).with_context(|| format!("failed to parse '{}'", path))?
    },
    Err(_) => {
      info!("{} is not set, using the default tanks.", TANKS_VAR);
      DEFAULT_TANKS.clone()
    },
  };

  Ok(specs.iter().map(TankSpec::to_tank).collect::<vessel::Result<_>>()?)
}

fn parse(value: Option<String>) -> anyhow::Result<f64> {
  let value = value.context("missing value")?;
  value.parse().with_context(|| format!("'{}' is not a number", value))
}

fn main() -> anyhow::Result<()> {
  env_logger::init();

  let system = WaterSystem::new(load_tanks()?);

  let mut args = env::args().skip(1);
  let height = match args.next().as_deref() {
    Some("height") => parse(args.next())?,
    Some("volume") => system.volume_to_height(parse(args.next())?)?,
    _ => bail!("usage: water-system (height|volume) <value>"),
  };

  info!("Filling water system up to {}.", height);

  let levels = system.tank_levels(height)?;
  let volume = system.height_to_volume(height)?;

  println!("{:#}", report(height, volume, system.capacity()?, &levels));

  Ok(())
}
