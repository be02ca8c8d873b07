//! # rxtick: a scheduler-driven repeating-emission core
//!
//! A minimal Reactive-Extensions-style building block: an observable that
//! emits one fixed value again and again, forever or a bounded number of
//! times, on whatever scheduler it is given, together with the observer,
//! subscription and scheduler contracts it is built on.
//!
//! ## Quick Start
//!
//! ```rust
//! use rxtick::prelude::*;
//!
//! // Runs inline: three emissions and the completion happen before
//! // `subscribe` returns.
//! observable::repeat_n(42, 3, ImmediateScheduler)
//!   .subscribe(|v| println!("Value: {}", v));
//!
//! // Driven turn by turn: nothing runs until the scheduler is told to.
//! let scheduler = ManualScheduler::default();
//! let mut ticks = observable::repeat("tick", scheduler.clone())
//!   .subscribe(|v| println!("{}", v));
//! scheduler.run(4);
//! ticks.unsubscribe();
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observable`] / [`ObservableExt`] | The subscribe surface |
//! | [`Observer`] | Consumes `next`, `error` and `complete` events |
//! | [`Scheduler`] | Orders task steps and drives their execution |
//! | [`TaskHandle`] | Handle to cancel a scheduled task |
//! | [`SubscriptionLike`] | Idempotent release of a running stream |
//!
//! The emission loop itself is scheduler-agnostic: one step per scheduler
//! turn, with the step reporting through [`TaskState`] whether to go on,
//! stop after a terminal event, or stop because the downstream consumer
//! failed. Cancellation is safe at any point, including re-entrantly from
//! inside the very callback being cancelled, and release is exactly-once.
//!
//! ## Feature Flags
//!
//! - **`futures-scheduler`** (default): drive emissions on
//!   `futures::executor::LocalPool` / `ThreadPool`
//! - **`tokio-scheduler`**: drive emissions on a Tokio runtime
//!
//! [`Observable`]: observable::Observable
//! [`ObservableExt`]: observable::ObservableExt
//! [`Observer`]: observer::Observer
//! [`Scheduler`]: scheduler::Scheduler
//! [`TaskHandle`]: scheduler::TaskHandle
//! [`TaskState`]: scheduler::TaskState
//! [`SubscriptionLike`]: subscription::SubscriptionLike

pub mod observable;
pub mod observer;
pub mod prelude;
pub mod rc;
pub mod scheduler;
pub mod subscription;

pub use prelude::*;
