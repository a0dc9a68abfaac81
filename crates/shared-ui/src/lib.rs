//! Campus Catalyst UI kit.
//!
//! Each component lives in `components/<name>/` next to its stylesheet,
//! which it links itself so pages only import the Rust item.

pub mod components;

pub use components::*;
