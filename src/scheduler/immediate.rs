use crate::prelude::*;

/// Runs scheduled work inline, on the caller's stack.
///
/// `schedule_with` does not return until the task reports a terminal
/// [`TaskState`] or is cancelled from within one of its own steps, so an
/// unbounded task never hands control back to the caller. The driving
/// loop is iterative; re-running a step costs no stack.
#[derive(Clone, Copy, Default)]
pub struct ImmediateScheduler;

impl<T: Schedulable> Scheduler<T> for ImmediateScheduler {
  fn schedule_with(&self, task: T, handle: TaskHandle<T::Failure>) {
    let mut runner = TaskRunner::new(task, handle);
    while runner.step() {}
  }

  fn kind(&self) -> SchedulerKind { SchedulerKind::Immediate }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn drives_to_completion_before_returning() {
    let handle = ImmediateScheduler.schedule(Task::new(
      0_usize,
      |count: &mut usize| {
        *count += 1;
        if *count < 5 {
          TaskState::<&'static str>::Continue
        } else {
          TaskState::Finished
        }
      },
    ));
    assert!(handle.is_closed());
  }

  #[test]
  fn reports_the_immediate_kind() {
    assert_eq!(
      Scheduler::<Task<(), ()>>::kind(&ImmediateScheduler),
      SchedulerKind::Immediate
    );
  }
}
