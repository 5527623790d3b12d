//! Prelude module for the picker crate.
//!
//! Re-exports the derive_more macros used for newtypes and display impls.

#[allow(unused_imports)]
pub use derive_more::{Display, From, Into};
