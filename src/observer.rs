//! The three-channel push contract consumers implement, plus the closure
//! adapters the subscribe methods build on and the wrapper that ties a
//! subscription's release to its terminal events.

use crate::prelude::*;
use std::convert::Infallible;

/// The consumer of data in the reactive pattern.
///
/// Values arrive through `next`; a stream ends with at most one of
/// `error` or `complete`, which consume the observer since nothing can be
/// delivered afterwards.
pub trait Observer<Item, Err> {
  /// Receive the next value.
  ///
  /// Consuming a value can fail. Returning `Err` tells the loop driving
  /// the schedule to stop the stream and surface the error to its own
  /// caller; the error is not redelivered to this observer.
  fn next(&mut self, value: Item) -> Result<(), Err>;

  /// Receive the error that ends the stream.
  fn error(self, err: Err);

  /// Receive the notification that the stream ended normally.
  fn complete(self);

  /// Whether this observer stopped accepting values.
  ///
  /// Sources poll this to stop emitting early, e.g. when the consumer
  /// side of a subscription was cancelled re-entrantly.
  fn is_finished(&self) -> bool;
}

/// Blanket adapter that turns a closure into an observer.
///
/// This enables the ergonomic subscription syntax
/// `observable.subscribe(|v| println!("{}", v))`. The closure becomes the
/// `next` handler and can never fail, so the stream's error type is
/// [`Infallible`]; `complete` is ignored.
#[derive(Clone)]
pub struct FnMutObserver<F>(pub F);

impl<F, Item> Observer<Item, Infallible> for FnMutObserver<F>
where
  F: FnMut(Item),
{
  #[inline]
  fn next(&mut self, value: Item) -> Result<(), Infallible> {
    (self.0)(value);
    Ok(())
  }

  #[inline]
  fn error(self, _err: Infallible) {}

  #[inline]
  fn complete(self) {
    // Default: ignore completion
  }

  #[inline]
  fn is_finished(&self) -> bool { false }
}

/// Observer built from three closures, one per channel.
///
/// The `next` closure is fallible; its `Err` is the stream's error type.
pub struct AllObserver<N, E, C> {
  next: N,
  error: E,
  complete: C,
}

impl<N, E, C> AllObserver<N, E, C> {
  pub fn new(next: N, error: E, complete: C) -> Self {
    Self {
      next,
      error,
      complete,
    }
  }
}

impl<Item, Err, N, E, C> Observer<Item, Err> for AllObserver<N, E, C>
where
  N: FnMut(Item) -> Result<(), Err>,
  E: FnOnce(Err),
  C: FnOnce(),
{
  #[inline]
  fn next(&mut self, value: Item) -> Result<(), Err> { (self.next)(value) }

  #[inline]
  fn error(self, err: Err) { (self.error)(err) }

  #[inline]
  fn complete(self) { (self.complete)() }

  #[inline]
  fn is_finished(&self) -> bool { false }
}

/// Ties the release of a subscription to its terminal events.
///
/// Wraps a downstream observer together with the two handles a live
/// subscription holds: `cancel`, the upstream token bound at subscribe
/// time, and `work`, the handle on the scheduled emission task. Whatever
/// ends the stream (completion, an error, or the downstream consumer
/// failing inside `next`), both handles are released exactly once; the
/// handles themselves make a second release a no-op.
pub struct TeardownObserver<O, U, W> {
  observer: O,
  cancel: U,
  work: W,
}

impl<O, U, W> TeardownObserver<O, U, W> {
  pub fn new(observer: O, cancel: U, work: W) -> Self {
    Self {
      observer,
      cancel,
      work,
    }
  }
}

impl<Item, Err, O, U, W> Observer<Item, Err> for TeardownObserver<O, U, W>
where
  O: Observer<Item, Err>,
  U: SubscriptionLike,
  W: SubscriptionLike,
{
  fn next(&mut self, value: Item) -> Result<(), Err> {
    let result = self.observer.next(value);
    if result.is_err() {
      self.cancel.unsubscribe();
      self.work.unsubscribe();
    }
    result
  }

  fn error(self, err: Err) {
    let Self {
      observer,
      cancel,
      work,
    } = self;
    // Guards release even if the downstream handler panics.
    let _cancel = SubscriptionGuard::new(cancel);
    let _work = SubscriptionGuard::new(work);
    observer.error(err);
  }

  fn complete(self) {
    let Self {
      observer,
      cancel,
      work,
    } = self;
    let _cancel = SubscriptionGuard::new(cancel);
    let _work = SubscriptionGuard::new(work);
    observer.complete();
  }

  fn is_finished(&self) -> bool {
    self.cancel.is_closed()
      || self.work.is_closed()
      || self.observer.is_finished()
  }
}
