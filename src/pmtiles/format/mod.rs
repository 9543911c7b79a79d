//! Directory wire format.
//!
//! - [`varint`]: unsigned LEB128 reader and encoder
//! - [`entries`]: the five-column directory layout built on top of it
//!
//! ```text
//! ┌──────────────────┐
//! │ n                │
//! ├──────────────────┤
//! │ tile id deltas   │ ← n varints
//! │ run lengths      │ ← n varints
//! │ payload lengths  │ ← n varints
//! │ offsets (+1)     │ ← n varints, 0 = contiguous
//! └──────────────────┘
//! ```

pub mod entries;
pub mod varint;
