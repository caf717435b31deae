//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget/layout libraries and instead renders into a simple
//! framebuffer that is diffed and flushed to the terminal.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Keep views pure: snapshot in, framebuffer out
//! - Precise control over tile aspect ratio (3 columns per tile)

pub mod fb;
pub mod game_view;
pub mod menu_view;
pub mod renderer;

pub use numerate_core as core;
pub use numerate_scores as scores;
pub use numerate_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, GridLayout, Viewport};
pub use menu_view::{MenuPage, MenuView, NameEntryPage};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
