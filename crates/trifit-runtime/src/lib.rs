//! TRIFIT Runtime - session orchestration and the frame loop
//!
//! A session walks the athlete through:
//! 1. Welcome
//! 2. Interview (questions answered by raised hand or tap)
//! 3. Profile form
//! 4. Camera (framing guidance, stability-gated countdown, capture)
//! 5. Analyzing (the one suspension point)
//! 6. Result
//!
//! [`Session`] holds all state and is driven synchronously, one frame or
//! one user action at a time. [`SessionDriver`] runs it on a cancelable
//! per-frame tick.

pub mod camera;
pub mod capture;
pub mod config;
pub mod driver;
pub mod interview;
pub mod observability;
pub mod prompts;
pub mod session;

pub use camera::*;
pub use capture::*;
pub use config::*;
pub use driver::*;
pub use interview::*;
pub use observability::*;
pub use session::*;
