//! Control message protocol for the voltio synthesizer.
//!
//! The control plane receives short binary frames, each a kind byte followed
//! by a payload: three bytes (status, key, velocity) for note events, a
//! little-endian `i16` for every parameter change. [`dispatch`] decodes one
//! frame and applies it to a [`voltio_synth::Synth`], scaling the raw
//! controller value into the unit the underlying register expects.

mod dispatch;
mod message;

pub use dispatch::{DispatchError, dispatch};
pub use message::{ControlKind, NoteMessage, status};
