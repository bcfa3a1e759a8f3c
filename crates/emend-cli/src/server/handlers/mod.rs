//! API request handlers.

mod review;
mod suggestions;

pub use review::*;
pub use suggestions::*;
