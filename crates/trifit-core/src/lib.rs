//! TRIFIT Core - Fundamental types and primitives
//!
//! This crate defines the types shared by every stage of the fitting session:
//! - Landmarks and validated skeletons from the pose model
//! - Athlete profiles and analysis results
//! - Session clocks
//! - Device seams (landmark source, camera)
//! - The error taxonomy

pub mod analysis;
pub mod devices;
pub mod error;
pub mod framing;
pub mod landmark;
pub mod profile;
pub mod time;

pub use analysis::*;
pub use devices::*;
pub use error::*;
pub use framing::*;
pub use landmark::*;
pub use profile::*;
pub use time::*;
