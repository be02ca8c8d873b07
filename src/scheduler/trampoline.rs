use crate::prelude::*;
use std::{
  cell::{Cell, RefCell},
  collections::VecDeque,
};

thread_local! {
  static QUEUE: RefCell<VecDeque<Box<dyn FnMut() -> bool>>> =
    RefCell::new(VecDeque::new());
  static DRAINING: Cell<bool> = const { Cell::new(false) };
}

/// Runs scheduled work on the current thread, from a queue drained
/// iteratively.
///
/// The first `schedule_with` on a thread becomes the drain loop: it runs
/// queued steps round-robin until the queue is empty, then returns. Calls
/// made while a drain is already running only enqueue; the outer drain
/// picks the new work up. Re-running a step is a queue operation, never a
/// recursive call, so deep schedules cost no stack.
///
/// Each thread has its own queue; the scheduler value itself is stateless.
#[derive(Clone, Copy, Default)]
pub struct TrampolineScheduler;

impl<T> Scheduler<T> for TrampolineScheduler
where
  T: Schedulable + 'static,
  T::Failure: 'static,
{
  fn schedule_with(&self, task: T, handle: TaskHandle<T::Failure>) {
    let mut runner = TaskRunner::new(task, handle);
    QUEUE.with(|q| q.borrow_mut().push_back(Box::new(move || runner.step())));

    if DRAINING.with(Cell::get) {
      return;
    }
    DRAINING.with(|d| d.set(true));
    while let Some(mut run) = QUEUE.with(|q| q.borrow_mut().pop_front()) {
      if run() {
        QUEUE.with(|q| q.borrow_mut().push_back(run));
      }
    }
    DRAINING.with(|d| d.set(false));
  }

  fn kind(&self) -> SchedulerKind { SchedulerKind::Trampoline }
}
