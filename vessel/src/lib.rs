//! Tanks stacked along a shared vertical axis, and the relation between the water height
//! in such a system and the volume it holds.

mod area;
mod bijection;
mod cuboid_tank;
mod edge;
mod error;
mod level;
mod sweep;
mod tank;
mod water_system;

pub use area::{active_base_area, AreaProfile};
pub use bijection::VolumeBijection;
pub use cuboid_tank::CuboidTank;
pub use edge::{tanks_by_edge, Breakpoint, Edge, TankTable};
pub use error::{Error, Result};
pub use level::Level;
pub use sweep::{active_tanks, step, Transition, Transitions};
pub use tank::Tank;
pub use water_system::WaterSystem;
