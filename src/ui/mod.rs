//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the *core* data structures and turns them into cells on
//! the terminal.  Image decoding happens in `app::asset_runtime`, not here.

pub mod about;
pub mod card_stack;
pub mod chrome;
pub mod contact_form;
pub mod gallery;
pub mod hero;
pub mod layout;
pub mod lightbox;
pub mod loader;
pub mod paint;
pub mod popup;
pub mod stage;
pub mod theme;
pub mod tools_stage;
