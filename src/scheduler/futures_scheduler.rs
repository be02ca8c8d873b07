use crate::prelude::*;
use futures::{
  executor::{LocalSpawner, ThreadPool},
  task::{LocalSpawnExt, SpawnExt},
};

impl<T> Scheduler<T> for LocalSpawner
where
  T: Schedulable + 'static,
  T::Failure: 'static,
{
  fn schedule_with(&self, task: T, handle: TaskHandle<T::Failure>) {
    let spawned = self.spawn_local(TaskFuture::new(task, handle.clone()));
    if spawned.is_err() {
      // The pool is gone; the work can never run.
      let mut handle = handle;
      handle.unsubscribe();
    }
  }
}

impl<T> Scheduler<T> for ThreadPool
where
  T: Schedulable + Send + 'static,
  T::Failure: Send + 'static,
{
  fn schedule_with(&self, task: T, handle: TaskHandle<T::Failure>) {
    let spawned = self.spawn(TaskFuture::new(task, handle.clone()));
    if spawned.is_err() {
      let mut handle = handle;
      handle.unsubscribe();
    }
  }
}
