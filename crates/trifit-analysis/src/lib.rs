//! TRIFIT Analysis - what the captured still says about the athlete
//!
//! The vision service is a black box behind [`AnalysisCollaborator`]. It can
//! be slow, rate limited or missing entirely, and none of that may stall the
//! capture flow: [`ResilientAnalyzer`] falls back to the local
//! [`OfflineEstimator`] and only logs the failure.

pub mod collaborator;
pub mod offline;
pub mod remote;
pub mod resilient;

pub use collaborator::*;
pub use offline::*;
pub use remote::*;
pub use resilient::*;
