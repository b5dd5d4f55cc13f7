//! Box-shaped domains of actions and observations.
use rand::{distributions::Uniform, Rng};
use rand_distr::{Exp1, StandardNormal};
use serde::{Deserialize, Serialize};

/// A (possibly unbounded) box in `R^n`, the Cartesian product of `n` intervals.
///
/// Bounds are stored in single precision, matching the `float32` boxes
/// declared by gym-style environments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxSpace {
    low: Vec<f32>,
    high: Vec<f32>,
}

impl BoxSpace {
    /// Constructs a box from lower and upper bounds of each axis.
    ///
    /// Panics if `low` and `high` have different lengths.
    pub fn new(low: Vec<f32>, high: Vec<f32>) -> Self {
        assert_eq!(
            low.len(),
            high.len(),
            "bounds of a box space must have the same length"
        );
        Self { low, high }
    }

    /// A box of dimension `dim` with the same bounds on every axis.
    pub fn bounded(dim: usize, low: f32, high: f32) -> Self {
        Self::new(vec![low; dim], vec![high; dim])
    }

    /// A box of dimension `dim` spanning the whole real line on every axis.
    pub fn unbounded(dim: usize) -> Self {
        Self::bounded(dim, f32::NEG_INFINITY, f32::INFINITY)
    }

    /// Shape of the elements of the space.
    pub fn shape(&self) -> Vec<usize> {
        vec![self.low.len()]
    }

    /// Number of axes.
    pub fn dim(&self) -> usize {
        self.low.len()
    }

    /// Lower bounds.
    pub fn low(&self) -> &[f32] {
        &self.low
    }

    /// Upper bounds.
    pub fn high(&self) -> &[f32] {
        &self.high
    }

    /// Returns `true` if every axis has finite bounds on both sides.
    pub fn is_bounded(&self) -> bool {
        self.low.iter().chain(self.high.iter()).all(|v| v.is_finite())
    }

    /// Returns `true` if `x` has the dimension of the box and lies within its bounds.
    pub fn contains(&self, x: &[f64]) -> bool {
        x.len() == self.dim()
            && x.iter()
                .zip(self.low.iter().zip(self.high.iter()))
                .all(|(&v, (&lo, &hi))| v >= lo as f64 && v <= hi as f64)
    }

    /// Draws a random element of the box.
    ///
    /// Bounded axes are sampled uniformly, unbounded axes from a standard
    /// normal distribution, and half-bounded axes from an exponential
    /// distribution shifted to the finite bound.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Vec<f32> {
        self.low
            .iter()
            .zip(self.high.iter())
            .map(|(&lo, &hi)| match (lo.is_finite(), hi.is_finite()) {
                (true, true) => rng.sample(Uniform::new_inclusive(lo, hi)),
                (true, false) => lo + rng.sample::<f32, _>(Exp1),
                (false, true) => hi - rng.sample::<f32, _>(Exp1),
                (false, false) => rng.sample::<f32, _>(StandardNormal),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::BoxSpace;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_bounded_sample_within_bounds() {
        let space = BoxSpace::bounded(6, -1.0, 1.0);
        let mut rng = StdRng::seed_from_u64(42);

        assert!(space.is_bounded());
        assert_eq!(space.shape(), vec![6]);
        for _ in 0..100 {
            let x = space.sample(&mut rng);
            let x = x.iter().map(|&v| v as f64).collect::<Vec<_>>();
            assert!(space.contains(&x));
        }
    }

    #[test]
    fn test_unbounded_space() {
        let space = BoxSpace::unbounded(3);
        let mut rng = StdRng::seed_from_u64(0);

        assert!(!space.is_bounded());
        assert!(space.contains(&[1e30, -1e30, 0.0]));
        assert!(!space.contains(&[0.0, 0.0]));
        assert!(space.sample(&mut rng).iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_half_bounded_sample() {
        let space = BoxSpace::new(vec![2.0, f32::NEG_INFINITY], vec![f32::INFINITY, -3.0]);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..100 {
            let x = space.sample(&mut rng);
            assert!(x[0] >= 2.0);
            assert!(x[1] <= -3.0);
        }
    }

    #[test]
    fn test_unbounded_sample_is_standard_normal() {
        let space = BoxSpace::unbounded(1);
        let mut rng = StdRng::seed_from_u64(3);
        let n = 50_000;
        let xs = (0..n).map(|_| space.sample(&mut rng)[0] as f64).collect::<Vec<_>>();

        let mean = xs.iter().sum::<f64>() / n as f64;
        let var = xs.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n as f64;
        assert!(mean.abs() < 0.05, "mean = {}", mean);
        assert!((var - 1.0).abs() < 0.05, "var = {}", var);
    }

    #[test]
    fn test_half_bounded_sample_has_unit_mean_offset() {
        let space = BoxSpace::new(vec![2.0], vec![f32::INFINITY]);
        let mut rng = StdRng::seed_from_u64(5);
        let n = 50_000;
        let mean = (0..n).map(|_| space.sample(&mut rng)[0] as f64).sum::<f64>() / n as f64;
        assert!((mean - 3.0).abs() < 0.05, "mean = {}", mean);
    }

    #[test]
    fn test_degenerate_axis() {
        let space = BoxSpace::bounded(2, 0.5, 0.5);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(space.sample(&mut rng), vec![0.5, 0.5]);
    }

    #[test]
    #[should_panic]
    fn test_mismatched_bounds() {
        let _ = BoxSpace::new(vec![0.0; 2], vec![1.0; 3]);
    }
}
