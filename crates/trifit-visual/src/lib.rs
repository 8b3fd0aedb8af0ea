//! TRIFIT Visual - turning noisy landmark frames into trustworthy signals
//!
//! Each classifier consumes one skeleton per frame:
//!
//! - [`StabilityTracker`]: is the athlete framed well enough to photograph?
//!   A bounded hysteresis counter keeps a single noisy frame from toggling
//!   the answer.
//! - [`GestureRecognizer`]: which hand is raised in this frame? Stateless.
//! - [`GestureDebouncer`]: turns a sustained raised hand into exactly one
//!   yes/no answer, then locks until the hand comes down.

pub mod debounce;
pub mod gesture;
pub mod stability;

pub use debounce::*;
pub use gesture::*;
pub use stability::*;
