use std::cell::Cell;
use std::time::Instant;

use tracing::{debug, info};

/// Nesting tag for a wrapped range: outer ranges (epochs) report at `info`,
/// inner ranges (batches) at `debug`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Outer,
    Inner,
}

/// Instruments an iteration range with progress output.
///
/// The wrapper yields exactly the elements of the inner range. When the
/// logger is enabled, completing a step emits one event carrying the step
/// counter, the per-step wall time, and the current accuracy slot if the
/// training loop has filled it. The accuracy slot uses interior mutability
/// so the loop can update it while the wrapper is iterating.
pub struct ProgressLogger {
    pub enabled: bool,
    desc: String,
    accuracy: Cell<Option<f64>>,
}

impl ProgressLogger {
    pub fn new(desc: &str) -> ProgressLogger {
        ProgressLogger {
            enabled: false,
            desc: desc.to_owned(),
            accuracy: Cell::new(None),
        }
    }

    pub fn set_accuracy(&self, value: f64) {
        self.accuracy.set(Some(value));
    }

    pub fn accuracy(&self) -> Option<f64> {
        self.accuracy.get()
    }

    pub fn clear_accuracy(&self) {
        self.accuracy.set(None);
    }

    pub fn wrap<I>(&self, range: I, position: Position) -> ProgressIter<'_, I::IntoIter>
    where
        I: IntoIterator,
    {
        let inner = range.into_iter();
        let total = inner.size_hint().1;
        ProgressIter {
            inner,
            logger: self,
            position,
            completed: 0,
            total,
            step_started: Instant::now(),
        }
    }
}

pub struct ProgressIter<'a, I> {
    inner: I,
    logger: &'a ProgressLogger,
    position: Position,
    completed: usize,
    total: Option<usize>,
    step_started: Instant,
}

impl<I> ProgressIter<'_, I> {
    fn finish_step(&self) {
        if !self.logger.enabled {
            return;
        }

        let elapsed_ms = self.step_started.elapsed().as_millis() as u64;
        let mut line = match self.total {
            Some(total) => format!("{}{}/{}", self.logger.desc, self.completed, total),
            None => format!("{}{}", self.logger.desc, self.completed),
        };
        line.push_str(&format!(" - took: {elapsed_ms}ms"));
        if let Some(accuracy) = self.logger.accuracy() {
            line.push_str(&format!(" - accuracy: {accuracy:.5}"));
        }

        match self.position {
            Position::Outer => info!(target: "laminar_nn::progress", "{line}"),
            Position::Inner => debug!(target: "laminar_nn::progress", "{line}"),
        }
    }
}

impl<I: Iterator> Iterator for ProgressIter<'_, I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if self.completed > 0 {
            self.finish_step();
        }
        match self.inner.next() {
            Some(item) => {
                self.completed += 1;
                self.step_started = Instant::now();
                Some(item)
            }
            None => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_yields_the_same_elements() {
        let logger = ProgressLogger::new("Epochs: ");
        let collected: Vec<usize> = logger.wrap(0..5, Position::Outer).collect();
        assert_eq!(collected, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn wrap_is_transparent_when_disabled() {
        let logger = ProgressLogger::new("Batches: ");
        assert!(!logger.enabled);
        let collected: Vec<usize> = logger.wrap(0..3, Position::Inner).collect();
        assert_eq!(collected, vec![0, 1, 2]);
    }

    #[test]
    fn accuracy_slot_is_updatable_mid_iteration() {
        let logger = ProgressLogger::new("Batches: ");
        for i in logger.wrap(0..4, Position::Inner) {
            logger.set_accuracy((i + 1) as f64 / 4.0);
        }
        assert_eq!(logger.accuracy(), Some(1.0));
        logger.clear_accuracy();
        assert_eq!(logger.accuracy(), None);
    }
}
