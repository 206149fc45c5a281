//! Record queue shared by producers and the writer thread
//!
//! An unbounded FIFO guarded by one mutex, with a condition variable the
//! writer parks on. Producers only hold the lock for a `push_back`; the writer
//! detaches the whole backlog in one swap and performs I/O after releasing it.

use super::record::Record;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;

#[derive(Debug, Default)]
struct QueueState {
    records: VecDeque<Record>,
    shutdown: bool,
}

/// What the writer got back from [`RecordQueue::wait_for_work`].
#[derive(Debug, Default)]
pub struct Batch {
    /// Records in enqueue order
    pub records: VecDeque<Record>,
    /// Shutdown was requested when the batch was taken
    pub shutdown: bool,
}

#[derive(Debug, Default)]
pub struct RecordQueue {
    state: Mutex<QueueState>,
    available: Condvar,
}

impl RecordQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and wake the writer if it is parked.
    ///
    /// Never blocks on capacity.
    pub fn enqueue(&self, record: Record) {
        {
            let mut state = self.state.lock();
            state.records.push_back(record);
        }
        self.available.notify_one();
    }

    /// Detach everything currently queued, oldest first.
    pub fn drain_all(&self) -> VecDeque<Record> {
        std::mem::take(&mut self.state.lock().records)
    }

    /// Park until there is at least one record or shutdown was requested,
    /// then detach the backlog.
    pub fn wait_for_work(&self) -> Batch {
        let mut state = self.state.lock();
        self.available
            .wait_while(&mut state, |state| state.records.is_empty() && !state.shutdown);

        Batch {
            records: std::mem::take(&mut state.records),
            shutdown: state.shutdown,
        }
    }

    /// Ask the writer to exit once the queue is empty.
    pub fn request_shutdown(&self) {
        self.state.lock().shutdown = true;
        self.available.notify_all();
    }

    /// Clear a previous shutdown request so a new writer can be started.
    pub fn reset_shutdown(&self) {
        self.state.lock().shutdown = false;
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.state.lock().shutdown
    }

    pub fn len(&self) -> usize {
        self.state.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::Destination;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_fifo_order() {
        let queue = RecordQueue::new();
        for i in 0..5 {
            queue.enqueue(Record::new(format!("{}", i), Destination::Console));
        }
        assert_eq!(queue.len(), 5);

        let drained: Vec<String> = queue
            .drain_all()
            .iter()
            .map(|record| record.payload().to_string())
            .collect();
        assert_eq!(drained, vec!["0", "1", "2", "3", "4"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_wait_returns_on_shutdown() {
        let queue = RecordQueue::new();
        queue.request_shutdown();

        let batch = queue.wait_for_work();
        assert!(batch.shutdown);
        assert!(batch.records.is_empty());

        queue.reset_shutdown();
        assert!(!queue.is_shutdown_requested());
    }

    #[test]
    fn test_wait_wakes_on_enqueue() {
        let queue = Arc::new(RecordQueue::new());
        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.wait_for_work())
        };

        thread::sleep(Duration::from_millis(20));
        queue.enqueue(Record::new("wake\n", Destination::File));

        let batch = consumer.join().unwrap();
        assert!(!batch.shutdown);
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].destination(), Destination::File);
    }
}
