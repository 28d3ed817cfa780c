//! Background persistence worker.
//!
//! One worker thread per repository owns the store. Jobs are applied in FIFO
//! order, so the snapshot of the latest mutation is always the last write.
//! Writes are best-effort: failures are logged by `TaskStore::save` and never
//! retried.

use super::{RepoError, RepoResult};
use crate::model::task::Task;
use crate::store::task_store::TaskStore;
use crate::store::KeyValueStore;
use crossbeam_channel::{bounded, unbounded, Sender};
use log::{debug, error};
use std::thread::{self, JoinHandle};

const WORKER_THREAD_NAME: &str = "tasklist-persist";

enum WriteJob {
    Save(Vec<Task>),
    Flush(Sender<()>),
}

pub(crate) struct PersistenceWorker {
    jobs: Option<Sender<WriteJob>>,
    handle: Option<JoinHandle<()>>,
}

impl PersistenceWorker {
    pub(crate) fn spawn<S: KeyValueStore>(store: TaskStore<S>) -> RepoResult<Self> {
        let (jobs, inbox) = unbounded::<WriteJob>();
        let handle = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || {
                for job in inbox {
                    match job {
                        // Failure already logged inside save.
                        WriteJob::Save(tasks) => {
                            let _ = store.save(&tasks);
                        }
                        WriteJob::Flush(ack) => {
                            let _ = ack.send(());
                        }
                    }
                }
                debug!("event=persist_worker module=repo status=stopped");
            })
            .map_err(RepoError::WorkerSpawn)?;

        Ok(Self {
            jobs: Some(jobs),
            handle: Some(handle),
        })
    }

    /// Queues a full-collection write and returns immediately.
    pub(crate) fn schedule(&self, tasks: Vec<Task>) {
        let Some(jobs) = &self.jobs else {
            return;
        };
        if jobs.send(WriteJob::Save(tasks)).is_err() {
            error!(
                "event=persist_schedule module=repo status=error error_code=persistence_write_failure error=worker_gone"
            );
        }
    }

    /// Blocks until every write queued before this call has been attempted.
    pub(crate) fn flush(&self) {
        let Some(jobs) = &self.jobs else {
            return;
        };
        let (ack, done) = bounded(1);
        if jobs.send(WriteJob::Flush(ack)).is_ok() {
            let _ = done.recv();
        }
    }
}

impl Drop for PersistenceWorker {
    fn drop(&mut self) {
        // Closing the channel lets the worker drain pending writes and exit.
        drop(self.jobs.take());
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("event=persist_worker module=repo status=error error_code=worker_panicked");
            }
        }
    }
}
