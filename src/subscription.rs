use crate::prelude::*;
use smallvec::SmallVec;
use std::any::Any;

/// A handle on resources that a stream holds while it is running.
///
/// Unsubscribing releases the resources and prevents any work that has not
/// started yet from running. Releasing is idempotent: every call after the
/// first is a no-op.
pub trait SubscriptionLike {
  /// Deregister the stream before it has delivered all of its events.
  fn unsubscribe(&mut self);

  fn is_closed(&self) -> bool;
}

pub trait TearDownSize: SubscriptionLike {
  fn teardown_size(&self) -> usize;
}

/// A subscription with nothing left to cancel.
///
/// Synchronous sources that run to completion before returning hand this
/// back to the subscriber; unsubscribing it has no observable effect.
#[derive(Debug, Default)]
pub struct SingleSubscription {
  closed: bool,
}

impl SubscriptionLike for SingleSubscription {
  #[inline]
  fn unsubscribe(&mut self) { self.closed = true; }

  #[inline]
  fn is_closed(&self) -> bool { self.closed }
}

struct Inner<T> {
  closed: bool,
  teardown: SmallVec<[T; 1]>,
}

impl<T: SubscriptionLike> SubscriptionLike for Inner<T> {
  #[inline(always)]
  fn is_closed(&self) -> bool { self.closed }

  fn unsubscribe(&mut self) {
    if !self.closed {
      self.closed = true;
      for v in &mut self.teardown {
        v.unsubscribe();
      }
    }
  }
}

impl<T: SubscriptionLike> Inner<T> {
  fn add(&mut self, mut v: T) {
    if self.closed {
      v.unsubscribe();
    } else {
      self.teardown.retain(|v| !v.is_closed());
      self.teardown.push(v);
    }
  }
}

impl<T> Default for Inner<T> {
  fn default() -> Self {
    Inner {
      closed: false,
      teardown: SmallVec::new(),
    }
  }
}

/// A composite subscription for single-thread use.
///
/// Subscriptions added to it are torn down together when it is
/// unsubscribed; adding to an already closed composite tears the newcomer
/// down on the spot.
#[derive(Clone, Default)]
pub struct LocalSubscription(MutRc<Inner<Box<dyn SubscriptionLike>>>);

impl LocalSubscription {
  pub fn add<S: SubscriptionLike + 'static>(&self, subscription: S) {
    if !self.is_same(&subscription) {
      self.0.rc_deref_mut().add(Box::new(subscription))
    }
  }

  fn is_same(&self, other: &dyn Any) -> bool {
    if let Some(other) = other.downcast_ref::<Self>() {
      self.0.ptr_eq(&other.0)
    } else {
      false
    }
  }
}

impl TearDownSize for LocalSubscription {
  fn teardown_size(&self) -> usize { self.0.rc_deref().teardown.len() }
}

impl SubscriptionLike for LocalSubscription {
  #[inline]
  fn unsubscribe(&mut self) { self.0.unsubscribe() }
  #[inline]
  fn is_closed(&self) -> bool { self.0.is_closed() }
}

/// The thread-safe counterpart of [`LocalSubscription`].
#[derive(Clone, Default)]
pub struct SharedSubscription(
  MutArc<Inner<Box<dyn SubscriptionLike + Send + Sync>>>,
);

impl SharedSubscription {
  pub fn add<S: SubscriptionLike + Send + Sync + 'static>(
    &self,
    subscription: S,
  ) {
    if !self.is_same(&subscription) {
      self.0.rc_deref_mut().add(Box::new(subscription));
    }
  }

  fn is_same(&self, other: &dyn Any) -> bool {
    if let Some(other) = other.downcast_ref::<Self>() {
      self.0.ptr_eq(&other.0)
    } else {
      false
    }
  }
}

impl TearDownSize for SharedSubscription {
  fn teardown_size(&self) -> usize { self.0.rc_deref().teardown.len() }
}

impl SubscriptionLike for SharedSubscription {
  #[inline]
  fn unsubscribe(&mut self) { self.0.unsubscribe(); }
  #[inline]
  fn is_closed(&self) -> bool { self.0.is_closed() }
}

impl<T: ?Sized> SubscriptionLike for Box<T>
where
  T: SubscriptionLike,
{
  #[inline]
  fn unsubscribe(&mut self) {
    let s = &mut **self;
    s.unsubscribe()
  }

  #[inline]
  fn is_closed(&self) -> bool {
    let s = &**self;
    s.is_closed()
  }
}

/// An RAII "scoped subscription": when the guard is dropped (falls out of
/// scope, or unwinds), the wrapped subscription is unsubscribed.
///
/// If you want to drop it immediately, wrap it in its own scope.
#[derive(Debug)]
#[must_use]
pub struct SubscriptionGuard<T: SubscriptionLike>(pub(crate) T);

impl<T: SubscriptionLike> SubscriptionGuard<T> {
  /// Wraps an existing subscription with a guard to enable RAII behavior
  /// for it.
  pub fn new(subscription: T) -> SubscriptionGuard<T> {
    SubscriptionGuard(subscription)
  }
}

impl<T: SubscriptionLike> Drop for SubscriptionGuard<T> {
  #[inline]
  fn drop(&mut self) { self.0.unsubscribe() }
}
