//! A Simon-style memory game for the Pico: the device flashes a growing sequence of
//! cells on a WS2812 LED matrix and the player repeats it with a joystick cursor and a
//! confirm button.
//!
//! The game core ([`game`], [`input`], [`playback`], [`level`], [`sequence`]) is written
//! against the collaborator traits in [`hardware`], so it runs unchanged on the device
//! (see `demos/memory_matrix.rs`) and on the host (see [`host_board`]).
//!
//! # Glossary
//!
//! - **Round:** one generate, play, collect, judge cycle.
//! - **Sequence:** the target pattern of positions for the current round.
//! - **Trace:** the player's recorded attempt at reproducing the sequence.
//! - **Dead zone:** joystick range around center within which input is ignored.
//! - **Debounce:** an enforced wait for a clean press/release transition.
#![cfg_attr(not(any(test, feature = "host")), no_std)]
#![allow(async_fn_in_trait, reason = "single-threaded embedded")]

// Compile-time checks: exactly one board must be selected (unless testing with host feature)
#[cfg(all(not(any(feature = "pico1", feature = "pico2")), not(feature = "host")))]
compile_error!("Must enable exactly one board feature: 'pico1' or 'pico2'");

#[cfg(all(feature = "pico1", feature = "pico2"))]
compile_error!("Cannot enable both 'pico1' and 'pico2' features simultaneously");

#[cfg(all(feature = "host", any(feature = "pico1", feature = "pico2")))]
compile_error!("The 'host' feature cannot be combined with a board feature; use --no-default-features");

#[cfg(all(not(feature = "arm"), not(feature = "host")))]
compile_error!("Must enable the 'arm' architecture feature for a board build");

pub mod color;
pub mod config;
mod error;
pub mod game;
pub mod hardware;
pub mod input;
pub mod layout;
pub mod level;
pub mod matrix;
pub mod playback;
pub mod sequence;
pub mod status_screen;

#[cfg(any(test, feature = "host"))]
pub mod host_board;

// These modules require embassy_rp and are excluded when testing on host
#[cfg(not(feature = "host"))]
pub mod board;
#[cfg(not(feature = "host"))]
pub mod button;
#[cfg(not(feature = "host"))]
pub mod buzzer;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};
