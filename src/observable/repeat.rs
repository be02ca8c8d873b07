use crate::prelude::*;

/// Creates an observable emitting `value` over and over again, forever.
///
/// Every scheduler turn delivers one clone of `value` to the subscriber.
/// The stream never completes on its own; it ends only when the
/// subscription is cancelled or the downstream consumer fails.
///
/// # Examples
///
/// ```
/// use rxtick::prelude::*;
///
/// let scheduler = ManualScheduler::default();
/// let mut ticks = observable::repeat("tick", scheduler.clone())
///   .subscribe(|v| println!("{}", v));
///
/// scheduler.run(4); // four emissions
/// ticks.unsubscribe(); // no fifth, ever
/// scheduler.run_until_idle();
/// ```
pub fn repeat<Item, S>(value: Item, scheduler: S) -> RepeatObservable<Item, S> {
  RepeatObservable {
    value,
    count: None,
    scheduler,
  }
}

/// Creates an observable emitting `value` exactly `count` times, then
/// completing.
///
/// `count` of zero completes on the first turn without emitting anything.
/// On a scheduler of [`SchedulerKind::Immediate`] the whole sequence runs
/// before `subscribe` returns and the returned handle has nothing left to
/// cancel.
///
/// # Examples
///
/// ```
/// use rxtick::prelude::*;
///
/// observable::repeat_n(42, 3, ImmediateScheduler)
///   .subscribe(|v| println!("{}", v));
///
/// // print log:
/// // 42
/// // 42
/// // 42
/// ```
pub fn repeat_n<Item, S>(
  value: Item,
  count: usize,
  scheduler: S,
) -> RepeatObservable<Item, S> {
  RepeatObservable {
    value,
    count: Some(count),
    scheduler,
  }
}

/// Emitter for [`repeat`] and [`repeat_n`], holding the value to emit,
/// the optional bound and the scheduler that will drive the emissions.
#[derive(Clone)]
pub struct RepeatObservable<Item, S> {
  value: Item,
  count: Option<usize>,
  scheduler: S,
}

/// Step state of one repeat subscription.
///
/// Owned exclusively by the scheduled task; `remaining` is `None` for an
/// unbounded stream. The observer sits in an `Option` so the terminal
/// call can consume it while the state stays behind in the task.
pub struct RepeatState<Item, O> {
  value: Item,
  remaining: Option<usize>,
  observer: Option<O>,
}

/// The task a repeat subscription hands to its scheduler.
pub type RepeatTask<Item, O, U, Err> =
  Task<RepeatState<Item, TeardownObserver<O, U, TaskHandle<Err>>>, Err>;

fn repeat_step<Item, Err, O>(
  state: &mut RepeatState<Item, O>,
) -> TaskState<Err>
where
  Item: Clone,
  O: Observer<Item, Err>,
{
  let Some(mut observer) = state.observer.take() else {
    return TaskState::Finished;
  };
  if observer.is_finished() {
    // Cancelled between two turns; no terminal event is delivered.
    return TaskState::Finished;
  }
  match state.remaining.as_mut() {
    None => match observer.next(state.value.clone()) {
      Ok(()) => {
        state.observer = Some(observer);
        TaskState::Continue
      }
      Err(err) => TaskState::Failed(err),
    },
    Some(remaining) => {
      if *remaining > 0 {
        if let Err(err) = observer.next(state.value.clone()) {
          return TaskState::Failed(err);
        }
        *remaining -= 1;
      }
      if *remaining == 0 {
        // The bound ran out on this very turn.
        observer.complete();
        return TaskState::Finished;
      }
      state.observer = Some(observer);
      TaskState::Continue
    }
  }
}

impl<Item: Clone, S> RepeatObservable<Item, S> {
  /// Subscribe with an upstream cancellation token.
  ///
  /// `cancel` is released together with the scheduled work whenever the
  /// stream ends: on completion, on an error, on a downstream failure
  /// inside `next`. Closing `cancel` from the outside stops the stream
  /// before its next turn.
  pub fn subscribe_with<Err, O, U>(
    self,
    observer: O,
    cancel: U,
  ) -> TaskHandle<Err>
  where
    O: Observer<Item, Err>,
    U: SubscriptionLike,
    S: Scheduler<RepeatTask<Item, O, U, Err>>,
  {
    let Self {
      value,
      count,
      scheduler,
    } = self;
    let handle = TaskHandle::new();
    let mut observer = TeardownObserver::new(observer, cancel, handle.clone());

    match count {
      // A bounded repeat on an immediate scheduler is a plain loop: the
      // sequence finishes before subscribe returns, so there is nothing
      // to schedule and nothing left to cancel afterwards.
      Some(count) if scheduler.kind() == SchedulerKind::Immediate => {
        for _ in 0..count {
          if let Err(err) = observer.next(value.clone()) {
            handle.fail(err);
            return handle;
          }
        }
        observer.complete();
        handle
      }
      _ => {
        let state = RepeatState {
          value,
          remaining: count,
          observer: Some(observer),
        };
        scheduler.schedule_with(Task::new(state, repeat_step), handle.clone());
        handle
      }
    }
  }
}

impl<Item, Err, O, S> Observable<Item, Err, O> for RepeatObservable<Item, S>
where
  Item: Clone,
  O: Observer<Item, Err>,
  S: Scheduler<RepeatTask<Item, O, SingleSubscription, Err>>,
{
  type Unsub = TaskHandle<Err>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self.subscribe_with(observer, SingleSubscription::default())
  }
}

impl<Item, Err, S> ObservableExt<Item, Err> for RepeatObservable<Item, S> {}

#[cfg(test)]
mod test {
  use super::*;
  use bencher::{benchmark_group, Bencher};
  use std::{cell::RefCell, rc::Rc};

  fn recording_observer(
    events: &Rc<RefCell<Vec<String>>>,
  ) -> AllObserver<
    impl FnMut(i32) -> Result<(), &'static str>,
    impl FnOnce(&'static str),
    impl FnOnce(),
  > {
    let on_next = events.clone();
    let on_error = events.clone();
    let on_complete = events.clone();
    AllObserver::new(
      move |v: i32| {
        on_next.borrow_mut().push(format!("next {}", v));
        Ok(())
      },
      move |e| on_error.borrow_mut().push(format!("error {}", e)),
      move || on_complete.borrow_mut().push("complete".to_string()),
    )
  }

  #[test]
  fn bounded_emits_then_completes_on_one_turn() {
    let scheduler = ManualScheduler::default();
    let events = Rc::new(RefCell::new(Vec::new()));
    let handle = repeat_n(7, 3, scheduler.clone())
      .actual_subscribe(recording_observer(&events));

    assert!(events.borrow().is_empty());
    scheduler.run_until_idle();

    assert_eq!(
      *events.borrow(),
      vec!["next 7", "next 7", "next 7", "complete"]
    );
    assert!(handle.is_closed());
    assert!(scheduler.is_empty());
  }

  #[test]
  fn zero_count_completes_without_emitting() {
    let scheduler = ManualScheduler::default();
    let events = Rc::new(RefCell::new(Vec::new()));
    repeat_n(7, 0, scheduler.clone())
      .actual_subscribe(recording_observer(&events));

    scheduler.run_until_idle();
    assert_eq!(*events.borrow(), vec!["complete"]);
  }

  #[test]
  fn completion_lands_on_the_last_emission_turn() {
    let scheduler = ManualScheduler::default();
    let events = Rc::new(RefCell::new(Vec::new()));
    repeat_n(7, 2, scheduler.clone())
      .actual_subscribe(recording_observer(&events));

    scheduler.run_one();
    assert_eq!(*events.borrow(), vec!["next 7"]);
    scheduler.run_one();
    assert_eq!(*events.borrow(), vec!["next 7", "next 7", "complete"]);
  }

  #[test]
  fn unbounded_emits_until_cancelled() {
    let scheduler = ManualScheduler::default();
    let nexts = Rc::new(RefCell::new(0));
    let counter = nexts.clone();
    let mut handle = repeat("tick", scheduler.clone())
      .subscribe(move |_| *counter.borrow_mut() += 1);

    scheduler.run(5);
    assert_eq!(*nexts.borrow(), 5);

    handle.unsubscribe();
    scheduler.run_until_idle();
    assert_eq!(*nexts.borrow(), 5);
    assert!(scheduler.is_empty());
  }

  #[test]
  fn immediate_bounded_runs_before_subscribe_returns() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let mut handle = repeat_n(7, 3, ImmediateScheduler)
      .actual_subscribe(recording_observer(&events));

    assert_eq!(
      *events.borrow(),
      vec!["next 7", "next 7", "next 7", "complete"]
    );
    assert!(handle.is_closed());

    // The handle is inert: unsubscribing again changes nothing.
    handle.unsubscribe();
    handle.unsubscribe();
    assert!(handle.take_failure().is_none());
  }

  #[test]
  fn immediate_zero_count_only_completes() {
    let events = Rc::new(RefCell::new(Vec::new()));
    repeat_n(7, 0, ImmediateScheduler)
      .actual_subscribe(recording_observer(&events));
    assert_eq!(*events.borrow(), vec!["complete"]);
  }

  #[test]
  fn trampoline_bounded_drains_during_subscribe() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let handle = repeat_n(7, 2, TrampolineScheduler)
      .actual_subscribe(recording_observer(&events));

    assert_eq!(*events.borrow(), vec!["next 7", "next 7", "complete"]);
    assert!(handle.is_closed());
  }

  #[test]
  fn downstream_failure_stops_the_stream_and_surfaces() {
    let scheduler = ManualScheduler::default();
    let nexts = Rc::new(RefCell::new(0));
    let seen = nexts.clone();
    let handle = repeat_n(7, 5, scheduler.clone()).subscribe_all(
      move |_| {
        *seen.borrow_mut() += 1;
        if *seen.borrow() == 3 { Err("refused") } else { Ok(()) }
      },
      |_| panic!("failure must not come back through the error channel"),
      || panic!("a failed stream must not complete"),
    );

    scheduler.run_until_idle();
    assert_eq!(*nexts.borrow(), 3);
    assert!(handle.is_closed());
    assert_eq!(handle.take_failure(), Some("refused"));
    assert!(scheduler.is_empty());
  }

  #[test]
  fn cancel_token_is_released_on_complete() {
    let scheduler = ManualScheduler::default();
    let cancel = SharedSubscription::default();
    let handle = repeat_n(7, 1, scheduler.clone()).subscribe_with(
      FnMutObserver(|_: i32| {}),
      cancel.clone(),
    );

    assert!(!cancel.is_closed());
    scheduler.run_until_idle();
    assert!(cancel.is_closed());
    assert!(handle.is_closed());
  }

  #[test]
  fn closing_the_cancel_token_stops_the_next_turn() {
    let scheduler = ManualScheduler::default();
    let cancel = LocalSubscription::default();
    let nexts = Rc::new(RefCell::new(0));

    // The consumer cancels its own subscription from inside `next`.
    let counter = nexts.clone();
    let reentrant = cancel.clone();
    repeat("tick", scheduler.clone()).subscribe_with(
      FnMutObserver(move |_| {
        *counter.borrow_mut() += 1;
        if *counter.borrow() == 2 {
          let mut reentrant = reentrant.clone();
          reentrant.unsubscribe();
        }
      }),
      cancel,
    );

    scheduler.run_until_idle();
    assert_eq!(*nexts.borrow(), 2);
  }

  #[test]
  fn each_subscription_ticks_independently() {
    let scheduler = ManualScheduler::default();
    let first = Rc::new(RefCell::new(0));
    let second = Rc::new(RefCell::new(0));

    let counter = first.clone();
    let source = repeat_n(1, 4, scheduler.clone());
    let mut early = source
      .clone()
      .subscribe(move |_| *counter.borrow_mut() += 1);
    let counter = second.clone();
    source.subscribe(move |_| *counter.borrow_mut() += 1);

    scheduler.run(4);
    early.unsubscribe();
    scheduler.run_until_idle();

    assert_eq!(*first.borrow(), 2);
    assert_eq!(*second.borrow(), 4);
  }

  #[test]
  fn bench() { do_bench(); }

  benchmark_group!(do_bench, bench_repeat_immediate);

  fn bench_repeat_immediate(b: &mut Bencher) {
    b.iter(|| {
      repeat_n(1, 100, ImmediateScheduler).subscribe(|_| {});
    });
  }
}
