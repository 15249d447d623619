//! Concrete sensors for voxim.
//!
//! One type per physical quantity: [`Velocity`], [`AreaRatio`],
//! [`Touch`], and [`Angle`]. All are stateless values implementing the
//! [`Sensor`](voxim_sensor::Sensor) contract from `voxim-sensor`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod angle;
mod area_ratio;
mod touch;
mod velocity;

pub use angle::Angle;
pub use area_ratio::AreaRatio;
pub use touch::Touch;
pub use velocity::{Axis, Velocity};
