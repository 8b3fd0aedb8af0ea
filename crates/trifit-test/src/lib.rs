//! TRIFIT Test - fixtures for exercising sessions without a camera
//!
//! - Synthetic skeletons (well framed, cut off, raised hands)
//! - Scripted landmark source replaying a frame sequence
//! - Fake camera recording start/stop/grab calls
//! - Scripted analyzer returning canned results

pub mod analyzer;
pub mod devices;
pub mod skeleton;

pub use analyzer::*;
pub use devices::*;
pub use skeleton::*;
