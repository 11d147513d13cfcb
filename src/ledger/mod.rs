//! Flip-by-flip history.
mod ledger;
mod round;

pub use ledger::*;
pub use round::*;
