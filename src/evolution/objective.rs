/// A function to be minimized over real vectors of length `nvars`.
///
/// Any closure `Fn(&[f64]) -> f64` is an objective. A panic raised by the objective is
/// not caught by the solver and unwinds out of `run`.
///
/// ```rust
/// use evomin::evolution::Objective;
///
/// let sphere = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
/// assert_eq!(sphere.evaluate(&[1.0, 2.0]), 5.0);
/// ```
pub trait Objective {
    fn evaluate(&self, x: &[f64]) -> f64;
}

impl<F> Objective for F
where
    F: Fn(&[f64]) -> f64,
{
    fn evaluate(&self, x: &[f64]) -> f64 {
        self(x)
    }
}
