//! Patch management for the voltio synthesizer.
//!
//! Patches are TOML files holding every continuous parameter of the
//! instrument in physical units. [`Patch::default`] reproduces the power-on
//! state of the hardware; [`Patch::apply`] pushes a patch through a
//! [`voltio_synth::Synth`] onto the register bus.

mod error;
mod patch;

pub use error::PatchError;
pub use patch::{EnvelopePatch, FilterPatch, LfoPatch, OscillatorPatch, Patch};
