use crate::prelude::*;

mod repeat;
pub use repeat::{repeat, repeat_n, RepeatObservable, RepeatState, RepeatTask};

/// A push-based producer of values over time.
///
/// Subscribing hands an [`Observer`] to the source and returns the
/// subscription that cancels the emissions still pending. The generic
/// observer parameter keeps the whole chain static: no boxing happens on
/// the subscribe path.
pub trait Observable<Item, Err, O: Observer<Item, Err>> {
  /// The subscription type returned by `actual_subscribe`.
  type Unsub: SubscriptionLike;

  fn actual_subscribe(self, observer: O) -> Self::Unsub;
}

/// Subscribe conveniences shared by every observable.
pub trait ObservableExt<Item, Err>: Sized {
  /// Subscribe with a closure invoked for every emitted value.
  ///
  /// The closure cannot fail, so this form is only available for streams
  /// whose error type is [`Infallible`](std::convert::Infallible).
  fn subscribe<N>(
    self,
    next: N,
  ) -> <Self as Observable<Item, Err, FnMutObserver<N>>>::Unsub
  where
    N: FnMut(Item),
    FnMutObserver<N>: Observer<Item, Err>,
    Self: Observable<Item, Err, FnMutObserver<N>>,
  {
    self.actual_subscribe(FnMutObserver(next))
  }

  /// Subscribe with one closure per channel.
  ///
  /// `next` is fallible: returning `Err` stops the stream, releases the
  /// subscription and surfaces the error to whoever drives the scheduler.
  fn subscribe_all<N, E, C>(
    self,
    next: N,
    error: E,
    complete: C,
  ) -> <Self as Observable<Item, Err, AllObserver<N, E, C>>>::Unsub
  where
    N: FnMut(Item) -> Result<(), Err>,
    E: FnOnce(Err),
    C: FnOnce(),
    Self: Observable<Item, Err, AllObserver<N, E, C>>,
  {
    self.actual_subscribe(AllObserver::new(next, error, complete))
  }
}
