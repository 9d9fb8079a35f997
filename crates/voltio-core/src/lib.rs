//! Voltio Core - register-level primitives for the voltio control plane
//!
//! This crate provides the foundational building blocks for driving the
//! signal-generation peripherals of the voltio hardware synthesizer: the
//! register bus abstraction, the per-peripheral register maps, the
//! fixed-point parameter codec, and thin driver types for each peripheral.
//!
//! The synthesis itself happens in dedicated hardware. Everything in this
//! crate only decides *what* 32-bit command words to send and *where*.
//!
//! # Core Abstractions
//!
//! ## Register Bus
//!
//! - [`RegisterBus`] - Two-method trait over memory-mapped register access
//! - [`MemBus`] - In-memory bus with a write journal, for tests and replay
//!   (requires the `std` feature)
//!
//! ## Parameter Codec
//!
//! Pure, deterministic conversions from engineering units (Hz, seconds,
//! normalized 0-1 levels) into the fixed-point command words the peripherals
//! expect. See [`codec`].
//!
//! ## Peripheral Drivers
//!
//! One driver per peripheral, each a thin wrapper around a base address:
//!
//! - [`OscillatorBank`] - Multi-channel oscillator bank
//! - [`EnvelopeGen`] - ADSR envelope generator (also reports channel occupancy)
//! - [`LadderFilter`] - Moog-style ladder filter
//! - [`Lfo`] - Low-frequency oscillator
//!
//! Drivers borrow the bus per call rather than owning it, so a single bus
//! instance can serve all seven peripheral instances:
//!
//! ```rust
//! use voltio_core::{MemBus, OscillatorBank, RegisterBus};
//!
//! let mut bus = MemBus::new();
//! let osc = OscillatorBank::new(0x43C0_0000);
//! osc.set_frequency(&mut bus, 0, 440.0);
//! ```
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible for bare-metal targets. Disable the
//! default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! voltio-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

mod bus;
pub mod codec;
mod envelope;
mod filter;
mod lfo;
mod oscillator;
pub mod regmap;

pub use bus::RegisterBus;
#[cfg(feature = "std")]
pub use bus::{MemBus, RegisterWrite};
pub use envelope::{EnvelopeGen, FreeBitmap};
pub use filter::LadderFilter;
pub use lfo::Lfo;
pub use oscillator::OscillatorBank;
