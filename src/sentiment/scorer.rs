/// Maps text to a polarity, conventionally in [-1.0, 1.0].
///
/// Callers must not assume the range is enforced; out-of-range values are
/// passed through untouched.
pub trait PolarityScorer: Send + Sync {
    fn polarity(&self, text: &str) -> f64;
    fn name(&self) -> &str;
}
