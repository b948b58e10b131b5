//! Bounded ring buffer of pending call records
//!
//! Records are pushed at the front, most recent first. When the buffer is full the
//! oldest record at the back is evicted. Draining pops from the back, which yields
//! records in the order the calls happened.

use super::call_record::CallRecord;
use crate::config::DEFAULT_TRACE_CAPACITY;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Fixed-capacity store of call records awaiting a flush
pub struct TraceBuffer {
    records: Mutex<VecDeque<CallRecord>>,
    capacity: usize,
}

impl TraceBuffer {
    /// Create a buffer holding at most `capacity` records
    ///
    /// A capacity of zero discards everything pushed into it. Storage grows on demand,
    /// so a huge capacity only bounds the buffer and allocates nothing up front.
    pub fn new(capacity: usize) -> Self {
        Self {
            records: Mutex::new(VecDeque::with_capacity(capacity.min(DEFAULT_TRACE_CAPACITY))),
            capacity,
        }
    }

    /// Insert a record at the front, evicting the oldest one when full
    ///
    /// Returns the evicted record, if any.
    pub fn push_front(&self, record: CallRecord) -> Option<CallRecord> {
        if self.capacity == 0 {
            return Some(record);
        }

        let mut records = self.lock();
        let evicted = if records.len() >= self.capacity {
            records.pop_back()
        } else {
            None
        };
        records.push_front(record);
        evicted
    }

    /// Remove and return every record, oldest first
    pub fn drain_oldest_first(&self) -> Vec<CallRecord> {
        let mut records = self.lock();
        let mut drained = Vec::with_capacity(records.len());
        while let Some(record) = records.pop_back() {
            drained.push(record);
        }
        drained
    }

    /// Messages of the pending records, oldest first, without draining
    pub fn snapshot(&self) -> Vec<String> {
        self.lock().iter().rev().map(CallRecord::message).collect()
    }

    /// Messages of the pending records of one invocation, oldest first
    pub fn records_for_call(&self, call_id: &str) -> Vec<String> {
        self.lock()
            .iter()
            .rev()
            .filter(|record| record.call_id == call_id)
            .map(CallRecord::message)
            .collect()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    // Flushes run inside the panic hook, so a poisoned lock is recovered.
    fn lock(&self) -> MutexGuard<'_, VecDeque<CallRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
