//! Implementation of the `#[derive(Queryable)]` macro.
//!
//! Generates accessor implementations and field-name constants from struct
//! annotations.

mod attrs;
mod derive;

pub use derive::queryable_derive_impl;
