// Photo module - the print entity and its pure state transitions
pub mod transitions;
mod types;

pub use transitions::{PhotoEvent, advance_progress};
pub use types::*;
