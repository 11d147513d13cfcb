//! Round resolution: a uniform draw decides the flip, even money settles it.
mod flip;
mod outcome;
mod source;

pub use flip::*;
pub use outcome::*;
pub use source::*;
