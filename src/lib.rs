// satprop - SGP4/SDP4 analytic satellite orbit propagation

//! Analytic orbit propagation for Earth satellites from TLE-style mean
//! elements, in the combined SGP4/SDP4 formulation.
//!
//! A [`Satellite`] is built once from [`OrbitalElements`] and a gravity
//! preset; every derived coefficient is computed at construction, after
//! which [`Satellite::propagate`] evaluates the state at any minute
//! offset from epoch, in any order, forward or backward. Orbits with
//! periods of 225 minutes or more automatically pick up the deep-space
//! lunar/solar and resonance corrections.
//!
//! Propagation errors are soft: each [`Prediction`] carries an
//! [`ErrorCode`], and an invalid state is reported as NaN vectors
//! rather than a panic or a lost batch. Records are self-contained and
//! cloneable, so fleets can be propagated from multiple threads without
//! shared state.
//!
//! ```
//! use satprop::{Epoch, GravityVariant, OperationMode, OrbitalElements, Satellite};
//! use std::f64::consts::PI;
//!
//! let elements = OrbitalElements {
//!     epoch: Epoch::new(2451722.5, 0.78495062),
//!     eccentricity: 0.1859667,
//!     inclination: 34.2682_f64.to_radians(),
//!     arg_perigee: 331.7664_f64.to_radians(),
//!     raan: 348.7242_f64.to_radians(),
//!     mean_anomaly: 19.3264_f64.to_radians(),
//!     mean_motion: 10.82419157 * 2.0 * PI / 1440.0,
//!     bstar: 2.8098e-5,
//!     ..Default::default()
//! };
//! let mut sat = Satellite::new(elements, GravityVariant::Wgs72, OperationMode::Improved);
//! let prediction = sat.propagate(360.0); // six hours past epoch
//! assert!(prediction.error.is_ok());
//! ```

mod batch;
mod deep_space;
mod elements;
mod error;
mod gravity;
mod propagator;

pub use batch::propagate_grid;
pub use deep_space::{DeepSpaceTerms, Resonance};
pub use elements::{
    from_alpha5, gstime, to_alpha5, Epoch, OperationMode, OrbitalElements, MINUTES_PER_DAY,
};
pub use error::{ErrorCode, ShapeError};
pub use gravity::{GravityModel, GravityVariant};
pub use propagator::{DragSeries, MeanElements, Prediction, PropagationMethod, Satellite};
