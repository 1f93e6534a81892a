// Floating-point error in the schedules can exceed f64::EPSILON.
const LOOSE_EPSILON: f64 = 1e-10;

pub(crate) fn assert_approx_eq(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < LOOSE_EPSILON,
        "{actual} is not approximately equal to {expected}"
    );
}

pub(crate) trait TestHelper {
    fn assert_approx_eq<const N: usize>(&self, expected: [f64; N]);
}

impl TestHelper for [f64] {
    fn assert_approx_eq<const N: usize>(&self, expected: [f64; N]) {
        assert_eq!(self.len(), N, "{self:?} and {expected:?} differ in length");
        self.iter()
            .zip(expected)
            .for_each(|(&actual, expected)| assert_approx_eq(actual, expected));
    }
}
