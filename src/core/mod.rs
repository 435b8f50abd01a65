//! Core engine – layout geometry, navigation, timing and animation state.
//!
//! Nothing in this module depends on any TUI or rendering crate.  Positions
//! are in virtual pixels; the UI layer maps them onto terminal cells.

pub mod autoplay;
pub mod contact;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod gooey;
pub mod intro;
pub mod item;
pub mod morph;
pub mod reveal;
pub mod spring;

