use std::collections::VecDeque;

pub const DEFAULT_WINDOW_SIZE: usize = 50;

/// Summary of the samples currently in a [`DistanceWindow`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStats {
    pub average: f64,
    pub minimum: f64,
    pub maximum: f64,
    /// Sample standard deviation, zero for a single sample
    pub std_dev: f64,
}

/// Rolling window over the latest distances
#[derive(Debug, Clone)]
pub struct DistanceWindow {
    samples: VecDeque<f64>,
    capacity: usize,
    pushed: u64,
}

impl DistanceWindow {
    /// A capacity of zero is raised to one
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            pushed: 0,
        }
    }

    /// Adds a sample, evicting the oldest one when full. Returns the index of the sample.
    pub fn push(&mut self, distance: f64) -> u64 {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(distance);
        self.pushed += 1;
        self.pushed - 1
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

    /// Total samples pushed since creation or the last clear
    pub fn total_pushed(&self) -> u64 {
        self.pushed
    }

    pub fn samples(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
        self.pushed = 0;
    }

    /// `None` while the window is empty
    pub fn stats(&self) -> Option<WindowStats> {
        if self.samples.is_empty() {
            return None;
        }
        let count = self.samples.len() as f64;
        let average = self.samples().sum::<f64>() / count;
        let minimum = self.samples().fold(f64::INFINITY, f64::min);
        let maximum = self.samples().fold(f64::NEG_INFINITY, f64::max);
        let std_dev = if self.samples.len() > 1 {
            let squares: f64 = self.samples().map(|x| (x - average).powi(2)).sum();
            (squares / (count - 1.0)).sqrt()
        } else {
            0.0
        };

        Some(WindowStats {
            average,
            minimum,
            maximum,
            std_dev,
        })
    }
}

impl Default for DistanceWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test0_empty_window_has_no_stats() {
        let window = DistanceWindow::default();
        assert_eq!(window.capacity(), DEFAULT_WINDOW_SIZE);
        assert_eq!(window.stats(), None);
    }

    #[test]
    fn test1_single_sample_has_zero_deviation() {
        let mut window = DistanceWindow::default();
        window.push(12.5);
        let stats = window.stats().unwrap();
        assert_eq!(stats.average, 12.5);
        assert_eq!(stats.minimum, 12.5);
        assert_eq!(stats.maximum, 12.5);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test2_sample_standard_deviation() {
        let mut window = DistanceWindow::default();
        for value in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            window.push(value);
        }
        let stats = window.stats().unwrap();
        assert!((stats.average - 5.0).abs() < 1e-12);
        assert_eq!(stats.minimum, 2.0);
        assert_eq!(stats.maximum, 9.0);
        // sum of squares is 32 over 7 degrees of freedom
        assert!((stats.std_dev - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test3_oldest_samples_are_evicted() {
        let mut window = DistanceWindow::new(3);
        for value in 1..=5 {
            window.push(value as f64);
        }
        assert_eq!(window.samples().collect::<Vec<_>>(), vec![3.0, 4.0, 5.0]);
        assert_eq!(window.total_pushed(), 5);
        assert_eq!(window.stats().unwrap().minimum, 3.0);
    }

    #[test]
    fn test4_clear_resets_index() {
        let mut window = DistanceWindow::new(0);
        assert_eq!(window.capacity(), 1);
        assert_eq!(window.push(1.0), 0);
        assert_eq!(window.push(2.0), 1);
        window.clear();
        assert!(window.is_empty());
        assert_eq!(window.push(3.0), 0);
    }
}
