//! A scheduler the caller drives one turn at a time.
//!
//! Nothing runs until the owner says so, which makes emission ticks,
//! cancellation windows, and failure propagation fully deterministic:
//!
//! ```rust
//! use rxtick::prelude::*;
//!
//! let scheduler = ManualScheduler::default();
//! observable::repeat_n("tick", 2, scheduler.clone())
//!   .subscribe(|v| println!("{}", v));
//!
//! // Nothing has been emitted yet.
//! scheduler.run_until_idle();
//! ```

use crate::prelude::*;
use std::collections::VecDeque;

type QueueEntry = Box<dyn FnMut() -> bool>;

/// A single-thread scheduler whose turns are taken explicitly.
///
/// `schedule_with` only enqueues; each [`run_one`](ManualScheduler::run_one)
/// call pops one task, runs one step, and re-enqueues the task at the back
/// when it wants another turn. Clones share the same queue.
#[derive(Clone, Default)]
pub struct ManualScheduler {
  queue: MutRc<VecDeque<QueueEntry>>,
}

impl ManualScheduler {
  pub fn new() -> Self { Self::default() }

  /// Run one step of the frontmost task. Returns `false` when the queue
  /// is empty.
  pub fn run_one(&self) -> bool {
    let entry = self.queue.rc_deref_mut().pop_front();
    match entry {
      Some(mut run) => {
        if run() {
          self.queue.rc_deref_mut().push_back(run);
        }
        true
      }
      None => false,
    }
  }

  /// Run up to `turns` steps; returns how many actually ran.
  pub fn run(&self, turns: usize) -> usize {
    let mut ran = 0;
    while ran < turns && self.run_one() {
      ran += 1;
    }
    ran
  }

  /// Run until no task wants another turn.
  ///
  /// An unbounded task that is never cancelled keeps wanting turns, and
  /// this call will not return for it; drive such tasks with
  /// [`run`](ManualScheduler::run) instead.
  pub fn run_until_idle(&self) {
    while self.run_one() {}
  }

  pub fn pending_count(&self) -> usize { self.queue.rc_deref().len() }

  pub fn is_empty(&self) -> bool { self.queue.rc_deref().is_empty() }
}

impl<T> Scheduler<T> for ManualScheduler
where
  T: Schedulable + 'static,
  T::Failure: 'static,
{
  fn schedule_with(&self, task: T, handle: TaskHandle<T::Failure>) {
    let mut runner = TaskRunner::new(task, handle);
    self
      .queue
      .rc_deref_mut()
      .push_back(Box::new(move || runner.step()));
  }
}
