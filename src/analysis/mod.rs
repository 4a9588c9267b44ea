// Response Analysis Module
//
// The two pure-text components of the pipeline:
//
// - dynamics: infers which query parameters change on every request
// - differ: redacts that noise and finds a marker word between two bodies
//
// Both operate on response body text only; no I/O happens here.
//
// Architecture:
//   dynamics.rs (leaf, per-URL inference)
//       ↓ (dynamic set consumed by)
//   differ.rs (redaction + word-set diff)
//       ↑
//   checker.rs (index-aligned batch diffing)

pub mod differ;
pub mod dynamics;

// Re-export commonly used items for convenience
pub use differ::*;
pub use dynamics::*;
