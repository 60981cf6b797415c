//! Parametric generator for the 2‑D half‑silhouette (**profile**) of an
//! axially symmetric solid, ready to be swept around its axis by an external
//! revolve builder.
//!
//! A fixed 25‑point template is rescaled, re‑anchored and rotated through a
//! deterministic pipeline ([`profile::generator`]) driven by seven numeric
//! parameters: length, circumference, shaft curve, shaft angle, head angle
//! and the two regional expansion rates.
//!
//! ```
//! use solid_profile::{ParameterSet, ProfileGenerator};
//!
//! let profile = ProfileGenerator::default().generate(&ParameterSet::default());
//! assert_eq!(profile.points().len(), 25);
//! ```
//!
//! # Features
//! #### Optional
//! - **parallel**: use rayon for [`ProfileGenerator::generate_many`]

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod annotations;
pub mod config;
pub mod errors;
pub mod float_types;
pub mod io;
pub mod parameters;
pub mod profile;
pub mod revolve;
pub mod rotation;
pub mod template;

pub use config::ShapeConfig;
pub use parameters::{ParameterKind, ParameterSet, Preset};
pub use profile::{Profile, ProfileGenerator, Stage};
