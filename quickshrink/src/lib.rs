//! # Quickshrink - Counterexample Shrinking for Property Tests
//!
//! Quickshrink takes a value that makes a property fail and searches for a
//! simpler value that still makes it fail. Each kind of value proposes simpler
//! candidates in priority order; the driver keeps the first one that still
//! fails and repeats until no candidate does.
//!
//! ## Quick Start
//!
//! ```rust
//! use quickshrink::shrink;
//!
//! // The property "no string starts with foo" fails on "foobar".
//! let minimal = shrink(|s: &String| !s.starts_with("foo"), "foobar".to_string());
//! assert_eq!(minimal, "foo");
//! ```
//!
//! Arguments of different types are shrunk together through [`Value`]:
//!
//! ```rust
//! use quickshrink::{Value, shrink_arguments};
//!
//! let minimal = shrink_arguments(
//!     |args| {
//!         let n = args[0].downcast_ref::<u64>().copied().unwrap_or_default();
//!         let s = args[1].downcast_ref::<String>().cloned().unwrap_or_default();
//!         n < 3 || s.is_empty()
//!     },
//!     vec![Value::new(1000u64), Value::new("hello".to_string())],
//! );
//! assert_eq!(minimal, vec![Value::new(3u64), Value::new("a".to_string())]);
//! ```

// Lets the derive macro's `::quickshrink` paths resolve inside this crate.
extern crate self as quickshrink;

pub mod arguments;
pub mod config;
pub mod emitter;
pub mod error;
pub mod shrink;
pub mod strategies;
pub mod value;

// Re-export the main public API
pub use arguments::shrink_arguments;
pub use config::ShrinkConfig;
pub use emitter::Emitter;
pub use error::{Cancelled, ConfigError};
pub use shrink::{ShrinkEngine, ShrinkResult, Shrinkable, collect_candidates, shrink, step};
pub use strategies::NON_ASCII_PLACEHOLDER;
pub use value::Value;

// Re-export derive macro from separate crate when derive feature is enabled
#[cfg(feature = "derive")]
pub use quickshrink_derive::Shrinkable;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_config_defaults() {
        let config = ShrinkConfig::default();
        assert_eq!(config.max_rounds, 1000);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            format!("{}", ConfigError::InvalidMaxRounds(0)),
            "invalid max rounds: 0 (must be > 0)"
        );
        assert_eq!(
            format!("{}", Cancelled),
            "candidate stream cancelled by the consumer"
        );
    }

    #[test]
    fn test_public_api_integration() {
        assert_eq!(shrink(|i: &i32| *i < 14, 293), 14);
        assert_eq!(shrink(|i: &i32| *i > -5, -99), -5);
        assert_eq!(shrink(|s: &String| s.len() < 3, "foobar".to_string()), "aaa");
        assert!(shrink(|b: &bool| !*b, true));
        assert_eq!(
            shrink(|s: &String| s.is_ascii(), "Ħİ¡".to_string()),
            NON_ASCII_PLACEHOLDER.to_string()
        );
    }

    #[test]
    fn test_engine_through_public_api() {
        let engine = ShrinkEngine::with_config(ShrinkConfig::with_max_rounds(2));
        let result = engine.shrink(293i64, |i| *i < 14);

        assert_eq!(result.original, 293);
        assert_eq!(result.minimal, 74);
        assert_eq!(result.shrink_steps, 2);
        assert!(!result.completed);
    }

    #[cfg(feature = "derive")]
    #[test]
    fn test_derive_reexport() {
        #[derive(Debug, Clone, PartialEq, Shrinkable)]
        struct Pair {
            left: u8,
            right: bool,
        }

        let minimal = shrink(
            |p: &Pair| p.left < 5 || !p.right,
            Pair {
                left: 200,
                right: true,
            },
        );
        assert_eq!(
            minimal,
            Pair {
                left: 5,
                right: true
            }
        );
    }
}
