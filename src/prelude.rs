//! Re-exports of the commonly used types and traits.

pub use crate::observable;
pub use crate::observable::{
  repeat, repeat_n, Observable, ObservableExt, RepeatObservable, RepeatState,
  RepeatTask,
};
pub use crate::observer::{
  AllObserver, FnMutObserver, Observer, TeardownObserver,
};
pub use crate::rc::{MutArc, MutRc, RcDeref, RcDerefMut};
#[cfg(any(feature = "futures-scheduler", feature = "tokio-scheduler"))]
pub use crate::scheduler::TaskFuture;
pub use crate::scheduler::{
  ImmediateScheduler, ManualScheduler, Schedulable, Scheduler, SchedulerKind,
  Task, TaskHandle, TaskRunner, TaskState, TrampolineScheduler,
};
pub use crate::subscription::{
  LocalSubscription, SharedSubscription, SingleSubscription,
  SubscriptionGuard, SubscriptionLike, TearDownSize,
};
