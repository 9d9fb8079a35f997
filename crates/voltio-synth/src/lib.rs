//! Voltio Synth - polyphonic channel management for the voltio control plane
//!
//! This crate decides which of the hardware's 64 signal channels sounds
//! which note, and issues the per-channel register writes (oscillator
//! frequency, envelope and LFO gates) that go with a note starting or
//! stopping.
//!
//! # Core Components
//!
//! ## Channel Pool
//!
//! - [`ChannelPool`] - The note-to-channel assignment table and the
//!   allocation/release scan
//! - [`NUM_CHANNELS`] - Size of the hardware channel pool
//!
//! Occupancy has two deliberately separate sources of truth: the hardware's
//! free-channel bitmap (authoritative for *allocation*, re-read on every
//! attempt) and the software assignment table (authoritative only for
//! finding which channel to *release* for a note). See [`ChannelPool`].
//!
//! ## Synth Facade
//!
//! - [`Synth`] - Owns the register bus and the seven peripheral instances;
//!   exposes `note_on`/`note_off` plus every continuous parameter
//! - [`ModuleMap`] - Base addresses of the peripheral instances
//! - [`EnvTarget`] / [`LfoSelect`] - Which envelope / LFO a parameter targets
//!
//! ```rust
//! use voltio_core::MemBus;
//! use voltio_synth::{ModuleMap, Synth};
//!
//! let mut synth = Synth::new(MemBus::new(), ModuleMap::default());
//! synth.set_filter_cutoff(20_000.0);
//! synth.note_on(60);
//! ```
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! voltio-synth = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

mod pool;
mod synth;

pub use pool::{ChannelPool, NUM_CHANNELS};
pub use synth::{EnvTarget, LfoSelect, ModuleMap, Synth, note_to_hz};
