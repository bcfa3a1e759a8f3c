//! JSON review API served over a review session.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;
