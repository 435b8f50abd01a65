//! Application orchestration: state, sections, events and input handling.

pub mod asset_runtime;
pub mod event;
pub mod handler;
pub mod section;
pub mod settings;
pub mod state;
