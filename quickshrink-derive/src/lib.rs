//! Derive macros for the Quickshrink shrinking library
//!
//! This crate provides procedural macros for automatically implementing traits
//! in the Quickshrink library.

use proc_macro::TokenStream;

mod derive;

/// Derive macro for automatically implementing the Shrinkable trait
///
/// The generated implementation shrinks one field at a time, in declaration
/// order: every candidate of the first field, with the others held at their
/// current values, then every candidate of the second field, and so on. Every
/// field type must implement `Shrinkable` and `Clone`.
///
/// # Basic Usage
///
/// ```rust
/// use quickshrink::{Shrinkable, shrink};
///
/// #[derive(Debug, Clone, PartialEq, Shrinkable)]
/// struct Order {
///     quantity: u32,
///     note: String,
/// }
///
/// let minimal = shrink(
///     |o: &Order| o.quantity < 10,
///     Order { quantity: 700, note: "rush".to_string() },
/// );
/// assert_eq!(minimal, Order { quantity: 10, note: String::new() });
/// ```
///
/// # Enums
///
/// Enum values shrink within their variant; a value never moves to another
/// variant. Unit variants have no candidates.
///
/// ```rust
/// use quickshrink::Shrinkable;
///
/// #[derive(Debug, Clone, PartialEq, Shrinkable)]
/// enum Command {
///     Stop,
///     Move(i32, i32),
///     Say { text: String },
/// }
/// ```
///
/// # Generic Types
///
/// Type parameters get `Shrinkable + Clone` bounds:
///
/// ```rust
/// use quickshrink::Shrinkable;
///
/// #[derive(Debug, Clone, PartialEq, Shrinkable)]
/// struct Pair<T> {
///     first: T,
///     second: T,
/// }
/// ```
#[proc_macro_derive(Shrinkable)]
pub fn derive_shrinkable(input: TokenStream) -> TokenStream {
    derive::derive_shrinkable_impl(input)
}
