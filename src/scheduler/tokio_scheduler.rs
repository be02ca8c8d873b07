use crate::prelude::*;
use tokio::runtime::Handle;

impl<T> Scheduler<T> for Handle
where
  T: Schedulable + Send + 'static,
  T::Failure: Send + 'static,
{
  fn schedule_with(&self, task: T, handle: TaskHandle<T::Failure>) {
    self.spawn(TaskFuture::new(task, handle));
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
  };

  #[tokio::test(flavor = "multi_thread")]
  async fn tokio_runtime_drives_a_task() {
    let (tx, rx) = std::sync::mpsc::channel();
    let ran = Arc::new(AtomicUsize::new(0));

    Handle::current().schedule(Task::new(
      (ran.clone(), tx),
      |(ran, tx): &mut (
        Arc<AtomicUsize>,
        std::sync::mpsc::Sender<()>,
      )| {
        if ran.fetch_add(1, Ordering::Relaxed) + 1 < 3 {
          TaskState::<()>::Continue
        } else {
          let _ = tx.send(());
          TaskState::Finished
        }
      },
    ));

    tokio::task::spawn_blocking(move || {
      rx.recv_timeout(std::time::Duration::from_secs(5)).unwrap()
    })
    .await
    .unwrap();
    assert_eq!(ran.load(Ordering::Relaxed), 3);
  }

  #[tokio::test(flavor = "multi_thread")]
  async fn tokio_runtime_drives_a_repeat_stream() {
    let (tx, rx) = std::sync::mpsc::channel();
    let nexts = Arc::new(AtomicUsize::new(0));

    let seen = nexts.clone();
    observable::repeat_n(2, 4, Handle::current()).subscribe_all(
      move |_: i32| {
        seen.fetch_add(1, Ordering::Relaxed);
        Ok(())
      },
      |_: &'static str| {},
      move || tx.send(()).unwrap(),
    );

    tokio::task::spawn_blocking(move || {
      rx.recv_timeout(std::time::Duration::from_secs(5)).unwrap()
    })
    .await
    .unwrap();
    assert_eq!(nexts.load(Ordering::Relaxed), 4);
  }
}
