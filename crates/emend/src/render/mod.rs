//! Rebuild the current document from the original text and review statuses.
//!
//! Rendering always replays every suggestion against the untouched original,
//! so toggling a status never depends on what an earlier render produced.

mod renderer;

pub use renderer::{PatchRenderer, Segment};
