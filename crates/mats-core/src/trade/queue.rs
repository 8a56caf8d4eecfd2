use std::collections::VecDeque;

use serde::Serialize;

use super::{Transaction, TransactionKind};
use crate::material::Material;

/// Completed and queued transaction counts since the queue last became busy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Progress {
    pub done: u32,
    pub total: u32,
}

impl Progress {
    pub fn remaining(&self) -> u32 {
        self.total.saturating_sub(self.done)
    }

    /// Completed share in `[0, 1]`; zero when nothing was queued.
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.done as f32 / self.total as f32
        }
    }
}

/// FIFO queue of trader operations. The head is the only one in flight.
#[derive(Debug, Clone, Default)]
pub struct TransactionQueue {
    transactions: VecDeque<Transaction>,
    progress: Progress,
}

impl TransactionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transaction.
    ///
    /// Returns `true` if the queue was empty, in which case the progress
    /// counters restart from zero.
    pub fn push(&mut self, kind: TransactionKind, material: Material) -> bool {
        let was_empty = self.transactions.is_empty();
        if was_empty {
            self.progress = Progress::default();
        }
        self.transactions.push_back(Transaction::new(kind, material));
        self.progress.total += 1;
        was_empty
    }

    /// Remove the head and count it as done, whatever its outcome.
    pub fn pop(&mut self) -> Option<Transaction> {
        let trans = self.transactions.pop_front()?;
        self.progress.done += 1;
        Some(trans)
    }

    /// Drop every queued transaction. Counters are kept for the status readout.
    pub fn clear(&mut self) {
        self.transactions.clear();
    }

    pub fn front(&self) -> Option<&Transaction> {
        self.transactions.front()
    }

    pub fn front_mut(&mut self) -> Option<&mut Transaction> {
        self.transactions.front_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }
}
