//! Terminal front end: argument parsing, menus and rendering over a [`Session`].
//!
//! [`Session`]: crate::Session
mod args;
mod render;
mod terminal;

pub use args::*;
pub use render::*;
pub use terminal::*;
