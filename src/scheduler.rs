//! Scheduling contracts and the task model schedulers drive.
//!
//! A source packs its per-subscription state into a [`Task`] whose step
//! function reports, after every invocation, whether the scheduler should
//! run it again ([`TaskState::Continue`]), stop because the work delivered
//! a terminal event ([`TaskState::Finished`]), or stop because the
//! downstream consumer failed ([`TaskState::Failed`]). Concrete schedulers
//! differ only in *where* the steps run; they all drive through
//! [`TaskRunner`], an explicit loop that never grows the stack and checks
//! the subscription handle before every step.

use crate::prelude::*;

mod immediate;
pub use immediate::ImmediateScheduler;
mod trampoline;
pub use trampoline::TrampolineScheduler;
mod manual;
pub use manual::ManualScheduler;
#[cfg(any(feature = "futures-scheduler", feature = "tokio-scheduler"))]
mod task_future;
#[cfg(any(feature = "futures-scheduler", feature = "tokio-scheduler"))]
pub use task_future::TaskFuture;
#[cfg(feature = "futures-scheduler")]
mod futures_scheduler;
#[cfg(feature = "tokio-scheduler")]
mod tokio_scheduler;

/// How a scheduler runs the steps handed to it.
///
/// Sources branch on this tag at subscribe time instead of comparing
/// scheduler instances by identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerKind {
  /// Steps run inline, to completion, before `schedule` returns.
  Immediate,
  /// Steps run on the current thread, from a work queue drained
  /// iteratively; `schedule` returns once the queue is empty.
  Trampoline,
  /// Steps run later, on whatever facility the scheduler wraps.
  Recurring,
}

/// Outcome of one invocation of a scheduled step.
#[derive(Debug, PartialEq, Eq)]
pub enum TaskState<Err> {
  /// Invoke the step again under the scheduler's discipline.
  Continue,
  /// The work has delivered its terminal event; never invoke it again.
  Finished,
  /// The downstream consumer failed. Never invoke the step again and
  /// surface the error to whatever drives the schedule.
  Failed(Err),
}

/// A resumable unit of work a [`Scheduler`] can drive.
pub trait Schedulable {
  type Failure;

  fn step(&mut self) -> TaskState<Self::Failure>;
}

/// A generic task bundling mutable step state with a static step function.
pub struct Task<S, Err> {
  state: S,
  work: fn(&mut S) -> TaskState<Err>,
}

impl<S, Err> Task<S, Err> {
  pub fn new(state: S, work: fn(&mut S) -> TaskState<Err>) -> Self {
    Self { state, work }
  }
}

impl<S, Err> Schedulable for Task<S, Err> {
  type Failure = Err;

  #[inline]
  fn step(&mut self) -> TaskState<Err> { (self.work)(&mut self.state) }
}

struct HandleState<Err> {
  cancelled: bool,
  finished: bool,
  failure: Option<Err>,
}

impl<Err> Default for HandleState<Err> {
  fn default() -> Self {
    HandleState {
      cancelled: false,
      finished: false,
      failure: None,
    }
  }
}

impl<Err> SubscriptionLike for HandleState<Err> {
  #[inline]
  fn unsubscribe(&mut self) { self.cancelled = true; }

  #[inline]
  fn is_closed(&self) -> bool { self.cancelled || self.finished }
}

/// The cancellation handle of one scheduled task.
///
/// All clones observe the same state: once any of them is unsubscribed, or
/// the task reports `Finished`/`Failed`, the handle is closed and no
/// further step runs. A failure reported by the task is parked here until
/// the subscriber collects it with [`TaskHandle::take_failure`].
pub struct TaskHandle<Err>(MutArc<HandleState<Err>>);

impl<Err> TaskHandle<Err> {
  pub fn new() -> Self { Self(MutArc::own(HandleState::default())) }

  /// Collect the downstream failure that stopped the task, if any.
  pub fn take_failure(&self) -> Option<Err> {
    self.0.rc_deref_mut().failure.take()
  }

  pub(crate) fn finish(&self) { self.0.rc_deref_mut().finished = true; }

  pub(crate) fn fail(&self, err: Err) {
    let mut state = self.0.rc_deref_mut();
    state.finished = true;
    state.failure = Some(err);
  }
}

impl<Err> Default for TaskHandle<Err> {
  fn default() -> Self { Self::new() }
}

impl<Err> Clone for TaskHandle<Err> {
  #[inline]
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<Err> SubscriptionLike for TaskHandle<Err> {
  #[inline]
  fn unsubscribe(&mut self) { self.0.unsubscribe() }

  #[inline]
  fn is_closed(&self) -> bool { self.0.is_closed() }
}

/// The driving loop shared by every scheduler.
///
/// One `step` call runs at most one task step: nothing runs once the
/// handle is closed, and a terminal [`TaskState`] is recorded on the
/// handle. The handle is only inspected between steps, so a step already
/// in flight completes even when it is cancelled from within.
pub struct TaskRunner<T: Schedulable> {
  task: T,
  handle: TaskHandle<T::Failure>,
}

impl<T: Schedulable> TaskRunner<T> {
  pub fn new(task: T, handle: TaskHandle<T::Failure>) -> Self {
    Self { task, handle }
  }

  /// Returns `true` when the task wants another turn.
  pub fn step(&mut self) -> bool {
    if self.handle.is_closed() {
      return false;
    }
    match self.task.step() {
      TaskState::Continue => true,
      TaskState::Finished => {
        self.handle.finish();
        false
      }
      TaskState::Failed(err) => {
        self.handle.fail(err);
        false
      }
    }
  }
}

/// A Scheduler orders tasks and drives their execution.
pub trait Scheduler<T: Schedulable> {
  /// Run `task` repeatedly under this scheduler's discipline, until it
  /// reports a terminal [`TaskState`] or `handle` is unsubscribed.
  ///
  /// Sources use this form so they can hand the same handle to the parts
  /// of the subscription that must be able to cancel the pending work.
  fn schedule_with(&self, task: T, handle: TaskHandle<T::Failure>);

  /// Run `task` under this scheduler's discipline and return the handle
  /// that cancels it.
  fn schedule(&self, task: T) -> TaskHandle<T::Failure> {
    let handle = TaskHandle::new();
    self.schedule_with(task, handle.clone());
    handle
  }

  /// The discipline tag sources consult to pick an emission strategy.
  fn kind(&self) -> SchedulerKind { SchedulerKind::Recurring }
}

#[cfg(test)]
mod test {
  use super::*;

  fn count_to_three(count: &mut usize) -> TaskState<&'static str> {
    *count += 1;
    if *count < 3 { TaskState::Continue } else { TaskState::Finished }
  }

  #[test]
  fn runner_stops_on_finished() {
    let handle = TaskHandle::new();
    let mut runner =
      TaskRunner::new(Task::new(0_usize, count_to_three), handle.clone());

    assert!(runner.step());
    assert!(runner.step());
    assert!(!runner.step());
    assert!(handle.is_closed());
    assert!(handle.take_failure().is_none());
  }

  #[test]
  fn runner_parks_failure_on_handle() {
    let handle = TaskHandle::new();
    let mut runner = TaskRunner::new(
      Task::new((), |_: &mut ()| TaskState::Failed("boom")),
      handle.clone(),
    );

    assert!(!runner.step());
    assert!(handle.is_closed());
    assert_eq!(handle.take_failure(), Some("boom"));
    assert_eq!(handle.take_failure(), None);
  }

  #[test]
  fn closed_handle_blocks_the_step() {
    let mut handle = TaskHandle::new();
    let mut runner = TaskRunner::new(
      Task::new(0_usize, |count: &mut usize| {
        *count += 1;
        TaskState::<&'static str>::Continue
      }),
      handle.clone(),
    );

    assert!(runner.step());
    handle.unsubscribe();
    assert!(!runner.step());
  }

  #[test]
  fn handle_close_is_idempotent() {
    let mut handle = TaskHandle::<&'static str>::new();
    let mut twin = handle.clone();
    handle.unsubscribe();
    twin.unsubscribe();
    handle.unsubscribe();
    assert!(handle.is_closed());
    assert!(twin.is_closed());
  }
}
