use crate::prelude::*;
use std::{
  future::Future,
  pin::Pin,
  task::{Context, Poll},
};

pin_project_lite::pin_project! {
  /// Adapts a [`TaskRunner`] to an executor: one task step per poll.
  ///
  /// After a step that wants another turn the future wakes itself and
  /// returns `Pending`, so sibling tasks on the same executor interleave
  /// between steps.
  pub struct TaskFuture<T>
  where
    T: Schedulable,
  {
    runner: TaskRunner<T>,
  }
}

impl<T: Schedulable> TaskFuture<T> {
  pub fn new(task: T, handle: TaskHandle<T::Failure>) -> Self {
    Self {
      runner: TaskRunner::new(task, handle),
    }
  }
}

impl<T: Schedulable> Future for TaskFuture<T> {
  type Output = ();

  fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
    let this = self.project();
    if this.runner.step() {
      cx.waker().wake_by_ref();
      Poll::Pending
    } else {
      Poll::Ready(())
    }
  }
}
