//! Keyboard input for the picker.

use serde::{Deserialize, Serialize};

/// Keys the picker reacts to. Everything else is the embedding
/// frontend's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    Up,
    Down,
    Enter,
    Escape,
}
