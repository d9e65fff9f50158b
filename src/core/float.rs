use num_traits::{Float, FromPrimitive, ToPrimitive};
use std::fmt::Debug;

// A Float trait that captures what we accept as sample coordinates. Samples are
// copied into f64 storage at construction, so all we need is a lossless-enough
// conversion and the usual thread-safety bounds.
pub trait ClusterFloat: Float + Debug + FromPrimitive + ToPrimitive + Copy + Sync + Send {
    /// Widens the coordinate to double precision.
    #[inline]
    fn to_f64_lossy(self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }
}

impl ClusterFloat for f32 {}
impl ClusterFloat for f64 {}

#[cfg(test)]
mod tests {
    use super::ClusterFloat;

    #[test]
    fn test_widening() {
        assert_eq!(1.5f32.to_f64_lossy(), 1.5);
        assert_eq!((-2.25f64).to_f64_lossy(), -2.25);
        assert!(f32::NAN.to_f64_lossy().is_nan());
    }
}
