//! TRIFIT Voice - spoken guidance
//!
//! Speech is fire-and-forget. Guidance that repeats every frame (framing
//! problems) is rate limited so the athlete hears it at most once every few
//! seconds; prompts tied to an explicit step (questions, countdown) are
//! forced through.

pub mod feedback;
pub mod sink;

pub use feedback::*;
pub use sink::*;
