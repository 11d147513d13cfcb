//! Game state and the ways it moves forward: one flip at a time, or a paced
//! auto-play run behind the [`Session`] boundary.
mod autoplay;
mod engine;
mod session;
mod state;

pub use autoplay::*;
pub use engine::*;
pub use session::*;
pub use state::*;
