//! The cancellable output side of a candidate generator.
//!
//! A generator never sees channels directly. It receives an [`Emitter`] and
//! offers candidates through it one at a time; each offer either hands the
//! candidate to the consumer or reports [`Cancelled`], after which the
//! generator must return. Inside the engine the root emitter is backed by a
//! [`Handoff`], a rendezvous channel raced against a stop channel.

use crossbeam::channel::{Receiver, Sender};
use crossbeam::select;

use crate::error::Cancelled;

/// Sink for candidate values of type `T`.
///
/// Emitters compose: [`Emitter::map`] turns an emitter of whole values into an
/// emitter of parts, which is how composite [`Shrinkable`](crate::Shrinkable)
/// implementations shrink one field at a time.
pub struct Emitter<'a, T> {
    sink: Box<dyn Fn(T) -> Result<(), Cancelled> + 'a>,
}

impl<'a, T> Emitter<'a, T> {
    /// Create an emitter from a sink function.
    ///
    /// The sink returns `Err(Cancelled)` once no further candidates are wanted.
    pub fn new<F>(sink: F) -> Self
    where
        F: Fn(T) -> Result<(), Cancelled> + 'a,
    {
        Self {
            sink: Box::new(sink),
        }
    }

    /// Offer one candidate.
    ///
    /// Returns `Err(Cancelled)` when the consumer has stopped; the caller must
    /// not offer anything else after that.
    pub fn emit(&self, candidate: T) -> Result<(), Cancelled> {
        (self.sink)(candidate)
    }

    /// Offer candidates in order until they run out or the consumer stops.
    pub fn emit_all<I>(&self, candidates: I) -> Result<(), Cancelled>
    where
        I: IntoIterator<Item = T>,
    {
        for candidate in candidates {
            self.emit(candidate)?;
        }
        Ok(())
    }

    /// Adapt this emitter to accept `U` values, converting each with `wrap`.
    ///
    /// ```rust
    /// use quickshrink::{Emitter, Cancelled};
    /// use std::cell::RefCell;
    ///
    /// let seen = RefCell::new(Vec::new());
    /// let pairs = Emitter::new(|pair: (i32, bool)| {
    ///     seen.borrow_mut().push(pair);
    ///     Ok::<(), Cancelled>(())
    /// });
    /// let firsts = pairs.map(|first: i32| (first, true));
    /// firsts.emit_all([0, 5]).unwrap();
    ///
    /// assert_eq!(*seen.borrow(), vec![(0, true), (5, true)]);
    /// ```
    pub fn map<'b, U, F>(&'b self, wrap: F) -> Emitter<'b, U>
    where
        F: Fn(U) -> T + 'b,
    {
        Emitter::new(move |candidate| self.emit(wrap(candidate)))
    }
}

/// Producer end of one shrink round: a rendezvous channel for candidates and
/// a stop channel from the consumer.
pub(crate) struct Handoff<T> {
    out: Sender<T>,
    stop: Receiver<()>,
}

impl<T> Handoff<T> {
    pub(crate) fn new(out: Sender<T>, stop: Receiver<()>) -> Self {
        Self { out, stop }
    }

    /// Hand one candidate to the consumer, or observe cancellation.
    ///
    /// The send is raced against the stop channel so a producer never blocks
    /// on a consumer that has already returned. A disconnected consumer counts
    /// as a stop.
    pub(crate) fn offer(&self, candidate: T) -> Result<(), Cancelled> {
        if self.stop.try_recv().is_ok() {
            return Err(Cancelled);
        }
        select! {
            send(self.out, candidate) -> sent => sent.map_err(|_| Cancelled),
            recv(self.stop) -> _ => Err(Cancelled),
        }
    }

    /// Root emitter for a generator running on this handoff.
    pub(crate) fn emitter(&self) -> Emitter<'_, T> {
        Emitter::new(move |candidate| self.offer(candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam::channel::bounded;
    use std::cell::RefCell;

    fn collecting<'a, T>(seen: &'a RefCell<Vec<T>>, limit: usize) -> Emitter<'a, T> {
        Emitter::new(move |candidate| {
            let mut seen = seen.borrow_mut();
            if seen.len() >= limit {
                return Err(Cancelled);
            }
            seen.push(candidate);
            Ok(())
        })
    }

    #[test]
    fn test_emit_all_stops_at_cancellation() {
        let seen = RefCell::new(Vec::new());
        let emitter = collecting(&seen, 2);

        assert_eq!(emitter.emit_all([1, 2, 3, 4]), Err(Cancelled));
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_emit_all_exhausts_sequence() {
        let seen = RefCell::new(Vec::new());
        let emitter = collecting(&seen, usize::MAX);

        assert_eq!(emitter.emit_all(vec!["a", "b"]), Ok(()));
        assert_eq!(*seen.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn test_map_wraps_candidates() {
        let seen = RefCell::new(Vec::new());
        let emitter = collecting(&seen, usize::MAX);
        let lengths = emitter.map(|len: usize| "x".repeat(len));

        lengths.emit_all([0, 2]).unwrap();
        assert_eq!(*seen.borrow(), vec![String::new(), "xx".to_string()]);
    }

    #[test]
    fn test_handoff_delivers_until_stopped() {
        let (out_tx, out_rx) = bounded::<u32>(0);
        let (stop_tx, stop_rx) = bounded::<()>(1);

        let delivered = crossbeam::thread::scope(|s| {
            let producer = s.spawn(move |_| {
                let handoff = Handoff::new(out_tx, stop_rx);
                let emitter = handoff.emitter();
                emitter.emit_all(0..)
            });

            let first = out_rx.recv().unwrap();
            let second = out_rx.recv().unwrap();
            stop_tx.send(()).unwrap();

            let outcome = producer.join().unwrap();
            (first, second, outcome)
        })
        .unwrap();

        assert_eq!(delivered, (0, 1, Err(Cancelled)));
    }

    #[test]
    fn test_handoff_cancels_when_consumer_is_gone() {
        let (out_tx, out_rx) = bounded::<u32>(0);
        let (_stop_tx, stop_rx) = bounded::<()>(1);
        drop(out_rx);

        let handoff = Handoff::new(out_tx, stop_rx);
        assert_eq!(handoff.offer(7), Err(Cancelled));
    }

    #[test]
    fn test_handoff_observes_pending_stop_first() {
        let (out_tx, _out_rx) = bounded::<u32>(1);
        let (stop_tx, stop_rx) = bounded::<()>(1);
        stop_tx.send(()).unwrap();

        // The buffered channel has room, but the pending stop wins.
        let handoff = Handoff::new(out_tx, stop_rx);
        assert_eq!(handoff.offer(7), Err(Cancelled));
    }
}
