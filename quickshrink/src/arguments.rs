//! Shrinking the arguments of a failing multi-argument call.

use std::time::Instant;

use crate::shrink::{ShrinkEngine, ShrinkResult};
use crate::value::Value;

impl ShrinkEngine {
    /// Shrink each argument of a failing call in turn, left to right.
    ///
    /// Position `i` is shrunk on its own while every other position holds its
    /// current value, so later positions see the already shrunk earlier ones.
    /// `predicate` sees the whole argument list and returns `true` when the
    /// property holds. Round limits apply to each position separately.
    pub fn shrink_arguments<F>(&self, arguments: Vec<Value>, mut predicate: F) -> ShrinkResult<Vec<Value>>
    where
        F: FnMut(&[Value]) -> bool,
    {
        let start_time = Instant::now();
        let mut current = arguments.clone();
        let mut shrink_steps = 0;
        let mut candidates_tried = 0;
        let mut completed = true;

        for position in 0..current.len() {
            let initial = current[position].clone();
            let result = self.shrink(initial, |candidate: &Value| {
                current[position] = candidate.clone();
                predicate(current.as_slice())
            });

            tracing::debug!(
                position,
                shrink_steps = result.shrink_steps,
                minimal = ?result.minimal,
                "argument shrunk"
            );

            current[position] = result.minimal;
            shrink_steps += result.shrink_steps;
            candidates_tried += result.candidates_tried;
            completed &= result.completed;
        }

        ShrinkResult::new(
            arguments,
            current,
            shrink_steps,
            candidates_tried,
            start_time.elapsed(),
            completed,
        )
    }
}

/// Shrink the arguments of a failing call to a fixed point, one position at a
/// time.
///
/// ```rust
/// use quickshrink::{Value, shrink_arguments};
///
/// let minimal = shrink_arguments(
///     |args| {
///         let a = args[0].downcast_ref::<i32>().copied().unwrap_or_default();
///         let b = args[1].downcast_ref::<i32>().copied().unwrap_or_default();
///         a + b < 100
///     },
///     vec![Value::new(700i32), Value::new(900i32)],
/// );
/// assert_eq!(minimal, vec![Value::new(0i32), Value::new(100i32)]);
/// ```
pub fn shrink_arguments<F>(predicate: F, arguments: Vec<Value>) -> Vec<Value>
where
    F: FnMut(&[Value]) -> bool,
{
    ShrinkEngine::unbounded()
        .shrink_arguments(arguments, predicate)
        .minimal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShrinkConfig;

    fn int(value: &Value) -> i64 {
        value.downcast_ref::<i64>().copied().unwrap_or_default()
    }

    #[test]
    fn test_positions_shrink_left_to_right() {
        // fails when a >= 10 or b >= 10; `a` goes first and drops to 0 because
        // `b` alone keeps the call failing
        let minimal = shrink_arguments(
            |args| int(&args[0]) < 10 && int(&args[1]) < 10,
            vec![Value::new(50i64), Value::new(50i64)],
        );

        assert_eq!(minimal, vec![Value::new(0i64), Value::new(10i64)]);
    }

    #[test]
    fn test_later_positions_see_earlier_results() {
        // fails while a + b > 20
        let minimal = shrink_arguments(
            |args| int(&args[0]) + int(&args[1]) <= 20,
            vec![Value::new(30i64), Value::new(40i64)],
        );

        assert_eq!(minimal, vec![Value::new(0i64), Value::new(21i64)]);
    }

    #[test]
    fn test_mixed_kinds() {
        let minimal = shrink_arguments(
            |args| {
                let flag = args[0].downcast_ref::<bool>().copied().unwrap_or(false);
                let text = args[1].downcast_ref::<String>().cloned().unwrap_or_default();
                let ratio = args[2].downcast_ref::<f64>().copied().unwrap_or(0.0);
                !(text.contains('z') && ratio > 1.0) || flag && text.len() > 100
            },
            vec![
                Value::new(true),
                Value::new("lazy zebra".to_string()),
                Value::new(3.25f64),
            ],
        );

        assert_eq!(
            minimal,
            vec![
                Value::new(false),
                Value::new("z".to_string()),
                Value::new(3.25f64),
            ]
        );
    }

    #[test]
    fn test_no_arguments() {
        let result = ShrinkEngine::new().shrink_arguments(Vec::new(), |_| false);

        assert!(result.minimal.is_empty());
        assert_eq!(result.shrink_steps, 0);
        assert!(result.completed);
    }

    #[test]
    fn test_result_aggregates_positions() {
        let engine = ShrinkEngine::with_config(ShrinkConfig::with_max_rounds(1));
        let arguments = vec![Value::new(8u8), Value::new(true)];
        let result = engine.shrink_arguments(arguments.clone(), |_| false);

        assert_eq!(result.original, arguments);
        assert_eq!(result.minimal, vec![Value::new(0u8), Value::new(false)]);
        assert_eq!(result.shrink_steps, 2);
        // each position stopped at the round limit
        assert!(!result.completed);
    }
}
