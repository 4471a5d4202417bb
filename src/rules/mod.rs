//! Move rules and the player actions built on them.
//!
//! - `validator`: pure legality checks (runs, targets, press classification)
//! - `drag`: the pick-up / drop gesture
//! - `actions`: recover, deal again, retry

pub mod validator;
mod actions;
mod drag;

pub use drag::{DragSession, DropOutcome, PickUpOutcome};
pub use validator::{classify_press, compute_run, is_valid_target, run_start, PressAction};
