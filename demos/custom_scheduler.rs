//! Example: Custom Scheduler Injection
//!
//! Any type implementing `Scheduler` can drive an emission sequence. This
//! example defines a scheduler that logs every decision it makes while
//! executing tasks inline, and then injects it into a repeat stream.

use rxtick::prelude::*;

#[derive(Clone, Copy, Default)]
pub struct VerboseScheduler;

impl<T: Schedulable> Scheduler<T> for VerboseScheduler {
  fn schedule_with(&self, task: T, handle: TaskHandle<T::Failure>) {
    println!("[VerboseScheduler] New task scheduled.");

    // Every scheduler drives through the same loop: one step at a time,
    // stopping as soon as the task settles or the handle is closed.
    let mut runner = TaskRunner::new(task, handle);
    let mut turns = 0;
    while runner.step() {
      turns += 1;
      println!("[VerboseScheduler] Turn {} done, task wants more.", turns);
    }
    println!("[VerboseScheduler] Task settled after {} turns.", turns + 1);
  }
}

fn main() {
  println!("== bounded repeat on a custom scheduler ==");
  let handle = observable::repeat_n("ping", 3, VerboseScheduler)
    .subscribe(|v| println!("  got: {}", v));
  println!("subscription closed: {}", handle.is_closed());

  println!();
  println!("== downstream failure surfaces to the drive side ==");
  let handle = observable::repeat_n(1, 10, VerboseScheduler).subscribe_all(
    |v: i32| {
      println!("  consuming {}", v);
      Err("consumer refused")
    },
    |_: &'static str| {},
    || println!("  completed (not reached)"),
  );
  println!("surfaced failure: {:?}", handle.take_failure());
}
