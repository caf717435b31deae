//! Terminal input module.
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key and mouse events into [`crate::types::GameAction`]s,
//! pointer events, and text edits for the name entry field.

pub mod map;

pub use numerate_types as types;

pub use map::{
    handle_key_event, handle_mouse_event, handle_text_key, is_interrupt, should_quit, PointerEvent,
    TextEdit,
};
