//! Shrinking functionality for minimizing failing test cases.
//!
//! A search is a sequence of rounds. Each round starts a generator on a
//! producer thread for the current value and evaluates the candidates it hands
//! over, in order, on the calling thread. The first candidate that still fails
//! the property ends the round and becomes the new current value. The search
//! stops at a fixed point: a round in which no candidate fails.

use std::cell::RefCell;
use std::fmt::Debug;
use std::panic;
use std::time::{Duration, Instant};

use crossbeam::channel::bounded;

use crate::config::ShrinkConfig;
use crate::emitter::{Emitter, Handoff};
use crate::error::Cancelled;

/// Trait for types that can propose simpler values of themselves.
///
/// Implementations offer candidates through `out` in priority order, most
/// promising first, and must never offer `self` again. Every
/// [`Emitter::emit`] can report [`Cancelled`]; at that point the
/// implementation must return without offering anything more, which `?` does.
///
/// ```rust
/// use quickshrink::{Cancelled, Emitter, Shrinkable, shrink};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Depth(u32);
///
/// impl Shrinkable for Depth {
///     fn shrink(&self, out: &Emitter<'_, Self>) -> Result<(), Cancelled> {
///         if self.0 > 0 {
///             out.emit(Depth(self.0 - 1))?;
///         }
///         Ok(())
///     }
/// }
///
/// let minimal = shrink(|d: &Depth| d.0 < 3, Depth(10));
/// assert_eq!(minimal, Depth(3));
/// ```
pub trait Shrinkable: Sized {
    /// Offer simpler values of this one to `out`.
    fn shrink(&self, out: &Emitter<'_, Self>) -> Result<(), Cancelled>;
}

/// Collect a value's whole candidate sequence, in emission order.
pub fn collect_candidates<T: Shrinkable>(value: &T) -> Vec<T> {
    let candidates = RefCell::new(Vec::new());
    let out = Emitter::new(|candidate| {
        candidates.borrow_mut().push(candidate);
        Ok(())
    });
    // This sink never cancels.
    let _ = value.shrink(&out);
    drop(out);
    candidates.into_inner()
}

/// Result of a shrinking operation
#[derive(Debug, Clone)]
pub struct ShrinkResult<T> {
    /// Original value that failed
    pub original: T,
    /// Minimal value that still fails
    pub minimal: T,
    /// Number of rounds that found a smaller failing value
    pub shrink_steps: usize,
    /// Number of candidates the predicate was evaluated on
    pub candidates_tried: usize,
    /// Time spent shrinking
    pub shrink_duration: Duration,
    /// Whether a fixed point was reached before a limit stopped the search
    pub completed: bool,
}

impl<T> ShrinkResult<T> {
    /// Create a new shrink result
    pub fn new(
        original: T,
        minimal: T,
        shrink_steps: usize,
        candidates_tried: usize,
        shrink_duration: Duration,
        completed: bool,
    ) -> Self {
        Self {
            original,
            minimal,
            shrink_steps,
            candidates_tried,
            shrink_duration,
            completed,
        }
    }
}

/// Outcome of a single round.
struct Round<T> {
    found: Option<T>,
    tried: usize,
}

/// Run one round: produce candidates for `current` on a scoped thread and
/// return the first one for which `predicate` is false.
fn run_round<T, F>(predicate: &mut F, current: &T) -> Round<T>
where
    T: Shrinkable + Send + Sync,
    F: FnMut(&T) -> bool,
{
    let (out_tx, out_rx) = bounded::<T>(0);
    // Room for one stop so the consumer never blocks on a finished producer.
    let (stop_tx, stop_rx) = bounded::<()>(1);

    let round = crossbeam::thread::scope(|scope| {
        let producer = scope.spawn(move |_| {
            let handoff = Handoff::new(out_tx, stop_rx);
            // Cancelled just means the consumer has what it needs.
            let _ = current.shrink(&handoff.emitter());
        });

        let mut tried = 0;
        let mut found = None;
        // Taking the receiver by value drops it on exit, unwinding included,
        // which releases a producer blocked on the handoff.
        for candidate in out_rx {
            tried += 1;
            if !predicate(&candidate) {
                found = Some(candidate);
                break;
            }
        }
        if found.is_some() {
            let _ = stop_tx.try_send(());
        }

        if let Err(payload) = producer.join() {
            panic::resume_unwind(payload);
        }
        Round { found, tried }
    });

    match round {
        Ok(round) => round,
        Err(payload) => panic::resume_unwind(payload),
    }
}

/// Run one shrink round and return the first candidate that still falsifies
/// `predicate`, or `None` when every candidate satisfies it.
///
/// `predicate` returns `true` when the property holds. It is only ever called
/// on the calling thread, once per candidate, in the generator's order.
pub fn step<T, F>(mut predicate: F, current: &T) -> Option<T>
where
    T: Shrinkable + Send + Sync,
    F: FnMut(&T) -> bool,
{
    run_round(&mut predicate, current).found
}

/// Shrink `initial` to a fixed point of `predicate`.
///
/// The result falsifies `predicate` whenever `initial` does. Kinds with no
/// candidates come back unchanged.
///
/// ```rust
/// let minimal = quickshrink::shrink(|i: &i64| *i < 14, 293);
/// assert_eq!(minimal, 14);
/// ```
pub fn shrink<T, F>(predicate: F, initial: T) -> T
where
    T: Shrinkable + Clone + PartialEq + Debug + Send + Sync,
    F: FnMut(&T) -> bool,
{
    ShrinkEngine::unbounded().shrink(initial, predicate).minimal
}

/// Shrinking engine that coordinates the shrinking process
#[derive(Debug, Clone, Default)]
pub struct ShrinkEngine {
    config: ShrinkConfig,
}

impl ShrinkEngine {
    /// Create a new shrinking engine with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new shrinking engine with custom configuration
    pub fn with_config(config: ShrinkConfig) -> Self {
        Self { config }
    }

    /// An engine that only stops at a fixed point.
    pub fn unbounded() -> Self {
        Self::with_config(ShrinkConfig {
            max_rounds: usize::MAX,
            timeout: Duration::MAX,
        })
    }

    /// The configuration this engine runs with
    pub fn config(&self) -> &ShrinkConfig {
        &self.config
    }

    /// Shrink a value that fails `predicate`
    ///
    /// Rounds repeat until one finds no failing candidate, or returns a value
    /// equal to the current one, or a configured limit is reached.
    pub fn shrink<T, F>(&self, value: T, mut predicate: F) -> ShrinkResult<T>
    where
        T: Shrinkable + Clone + PartialEq + Debug + Send + Sync,
        F: FnMut(&T) -> bool,
    {
        let start_time = Instant::now();
        let mut current = value.clone();
        let mut shrink_steps = 0;
        let mut candidates_tried = 0;

        let completed = loop {
            if shrink_steps >= self.config.max_rounds {
                tracing::debug!(shrink_steps, "shrinking stopped at max rounds");
                break false;
            }
            if start_time.elapsed() >= self.config.timeout {
                tracing::debug!(shrink_steps, "shrinking timed out");
                break false;
            }

            let round = run_round(&mut predicate, &current);
            candidates_tried += round.tried;

            match round.found {
                Some(next) if next != current => {
                    current = next;
                    shrink_steps += 1;
                    tracing::trace!(
                        round = shrink_steps,
                        tried = round.tried,
                        value = ?current,
                        "found smaller failing value"
                    );
                }
                _ => break true,
            }
        };

        tracing::debug!(
            shrink_steps,
            candidates_tried,
            completed,
            minimal = ?current,
            "shrinking finished"
        );

        ShrinkResult::new(
            value,
            current,
            shrink_steps,
            candidates_tried,
            start_time.elapsed(),
            completed,
        )
    }
}
