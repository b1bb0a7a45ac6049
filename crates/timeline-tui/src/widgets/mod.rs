//! Shared widgets.

mod footer_hints;

pub use footer_hints::{FooterHints, KeyHint};
