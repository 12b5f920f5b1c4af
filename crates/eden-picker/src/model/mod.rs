//! State model for the picker.
//!
//! This module contains the state machine and data structures that
//! drive the picker. All types are runtime-independent and synchronous
//! for testability; the async orchestration lives in `picker`.

mod state;

pub use state::{OpenState, PickerPhase};
