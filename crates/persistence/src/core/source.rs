//! Record sources consumed by the pagination engine.

use crate::mapping::RecordComparator;

/// An ordered, countable sequence of records.
///
/// The pagination engine counts the source once and then fetches a single
/// window from it.
pub trait RecordSource {
    /// The record type.
    type Item;

    /// Returns the total number of records.
    fn count(&self) -> usize;

    /// Returns up to `take` records after skipping `skip`.
    fn fetch(&self, skip: usize, take: usize) -> Vec<Self::Item>;
}

/// An in-memory record source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection<T> {
    records: Vec<T>,
}

impl<T> Collection<T> {
    /// Wraps a vector of records.
    pub fn new(records: Vec<T>) -> Self {
        Self { records }
    }

    /// Keeps only the records matching `predicate`.
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: FnMut(&T) -> bool,
    {
        self.records.retain(predicate);
        self
    }

    /// Sorts the records with a compiled comparator.
    ///
    /// The sort is stable: records that compare equal keep their relative order.
    pub fn order_by(mut self, comparator: &RecordComparator<T>) -> Self {
        if !comparator.is_empty() {
            self.records.sort_by(|a, b| comparator.compare(a, b));
        }
        self
    }

    /// Returns the records as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.records
    }

    /// Unwraps the records.
    pub fn into_inner(self) -> Vec<T> {
        self.records
    }
}

impl<T> From<Vec<T>> for Collection<T> {
    fn from(records: Vec<T>) -> Self {
        Self::new(records)
    }
}

impl<T: Clone> RecordSource for Collection<T> {
    type Item = T;

    fn count(&self) -> usize {
        self.records.len()
    }

    fn fetch(&self, skip: usize, take: usize) -> Vec<T> {
        self.records.iter().skip(skip).take(take).cloned().collect()
    }
}
