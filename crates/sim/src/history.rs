use std::collections::VecDeque;

use serde::Serialize;

/// Healthy/infected head count at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Census {
    pub healthy: usize,
    pub infected: usize,
}

impl Census {
    pub fn total(&self) -> usize {
        self.healthy + self.infected
    }
}

/// Sliding window of census samples. Once full, each new sample evicts the
/// oldest.
#[derive(Debug, Clone)]
pub struct History {
    samples: VecDeque<Census>,
    capacity: usize,
}

impl History {
    /// A window of at least one sample; a zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, census: Census) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(census);
    }

    /// Samples from oldest to newest.
    pub fn samples(&self) -> impl Iterator<Item = &Census> {
        self.samples.iter()
    }

    pub fn latest(&self) -> Option<Census> {
        self.samples.back().copied()
    }

    /// Highest infected count in the window.
    pub fn peak_infected(&self) -> usize {
        self.samples.iter().map(|c| c.infected).max().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
