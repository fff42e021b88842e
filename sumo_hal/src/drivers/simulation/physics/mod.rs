//! Physics simulation module.
//!
//! Planar rigid-body model of the ring: a differential-drive robot with
//! lagging motors, a passive opponent that can be shoved, and the two
//! sensor models the controller reads.

mod drive;
mod ring;

pub use drive::{DifferentialDrive, Pose, wrap_angle};
pub use ring::{BoutOutcome, Opponent, RingSimulator};
