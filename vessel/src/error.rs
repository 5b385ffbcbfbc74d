use ordered_float::FloatIsNan;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
  #[error("invalid tank: {0}")]
  InvalidTank(String),
  #[error("the water system contains no tanks")]
  EmptySystem,
  #[error("water height {height} is outside of [{min}, {max}]")]
  HeightOutOfRange { height: f64, min: f64, max: f64 },
  #[error("water volume {0} is negative")]
  NegativeVolume(f64),
  #[error("water volume {volume} exceeds the capacity of {max}")]
  VolumeOutOfRange { volume: f64, max: f64 },
  #[error("water volume {volume} cannot be reached above height {height}")]
  UnreachableVolume { volume: f64, height: f64 },
  #[error("value is not a number")]
  NotANumber,
}

impl From<FloatIsNan> for Error {
  fn from(_: FloatIsNan) -> Self {
    Error::NotANumber
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
