//! Exponential Moving Average.

use super::Filter;

/// An Exponential Moving Average (EMA) filter.
///
/// The first pushed value is returned unchanged and seeds the average; every
/// later push moves the average towards the new value by the configured
/// `alpha`.
#[derive(Debug, Clone)]
pub struct Ema {
    alpha: f32,
    last: Option<f32>,
}

impl Ema {
    /// Creates a new Exponential Moving Average filter.
    ///
    /// The `alpha` parameter must be between 0.0 and 1.0 and defines how quickly the weight of
    /// older values should decay. Values closer to 1.0 favor recent values over older values, while
    /// values closer to 0.0 favor older values more strongly.
    ///
    /// # Panics
    ///
    /// This method will panic if `alpha` is not in between 0.0 and 1.0.
    pub fn new(alpha: f32) -> Self {
        assert!(alpha >= 0.0 && alpha <= 1.0);
        Self { alpha, last: None }
    }
}

impl Filter<f32> for Ema {
    fn push(&mut self, value: f32) -> f32 {
        let avg = match self.last {
            Some(last) => last + self.alpha * (value - last),
            None => value,
        };
        self.last = Some(avg);
        avg
    }

    fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ema() {
        let mut filter = Ema::new(0.5);
        assert_eq!(filter.push(1.0), 1.0);
        assert_eq!(filter.push(2.0), 1.5);
        assert_eq!(filter.push(2.0), 1.75);
    }

    #[test]
    fn test_reset() {
        let mut filter = Ema::new(0.5);
        assert_eq!(filter.push(1.0), 1.0);
        filter.reset();
        assert_eq!(filter.push(5.0), 5.0);
    }

    #[test]
    fn converges_to_constant_input() {
        let mut filter = Ema::new(0.2);
        filter.push(0.0);
        let mut value = 0.0;
        for _ in 0..100 {
            value = filter.push(100.0);
        }
        approx::assert_relative_eq!(value, 100.0, max_relative = 1e-4);
    }
}
