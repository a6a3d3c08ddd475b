/// Accumulates samples and reports their arithmetic mean.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct RunningAverage {
    sum: f64,
    count: usize,
}

impl RunningAverage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, x: f64) {
        self.sum += x;
        self.count += 1;
    }

    pub fn reset(&mut self) {
        *self = Self::default()
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// `None` until the first sample arrives.
    pub fn value(&self) -> Option<f64> {
        if self.count > 0 {
            Some(self.sum / self.count as f64)
        } else {
            None
        }
    }
}

impl Extend<f64> for RunningAverage {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for x in iter {
            self.add(x)
        }
    }
}

impl FromIterator<f64> for RunningAverage {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut a = Self::new();
        a.extend(iter);
        a
    }
}
