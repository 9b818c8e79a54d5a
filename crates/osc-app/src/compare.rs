//! Deviation metrics between a simulated trajectory and a reference curve.

use osc_core::Real;
use serde::Serialize;

/// Summary of how far one integrator's trajectory strays from the reference.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DeviationSummary {
    pub integrator: String,
    pub samples: usize,
    pub max_abs: Real,
    pub t_at_max: Real,
    pub rms: Real,
    pub final_abs: Real,
}

/// Absolute deviation of each sample; NaN samples count as infinitely far.
pub fn abs_deviations(t: &[Real], xs: &[Real], reference: impl Fn(Real) -> Real) -> Vec<Real> {
    t.iter()
        .zip(xs)
        .map(|(&t, &x)| {
            let d = (x - reference(t)).abs();
            if d.is_nan() { Real::INFINITY } else { d }
        })
        .collect()
}

pub fn max_abs_deviation(t: &[Real], xs: &[Real], reference: impl Fn(Real) -> Real) -> Real {
    abs_deviations(t, xs, reference)
        .into_iter()
        .fold(0.0, Real::max)
}

pub fn deviation_summary(
    integrator: &str,
    t: &[Real],
    xs: &[Real],
    reference: impl Fn(Real) -> Real,
) -> DeviationSummary {
    let devs = abs_deviations(t, xs, reference);

    let (idx_max, max_abs) = devs
        .iter()
        .copied()
        .enumerate()
        .fold((0, 0.0), |(bi, bd), (i, d)| if d > bd { (i, d) } else { (bi, bd) });

    let rms = if devs.is_empty() {
        0.0
    } else {
        (devs.iter().map(|d| d * d).sum::<Real>() / devs.len() as Real).sqrt()
    };

    DeviationSummary {
        integrator: integrator.to_string(),
        samples: devs.len(),
        max_abs,
        t_at_max: t.get(idx_max).copied().unwrap_or(0.0),
        rms,
        final_abs: devs.last().copied().unwrap_or(0.0),
    }
}

/// Observed convergence order between two runs with step sizes `dt_a > dt_b`.
pub fn observed_order(dt_a: Real, err_a: Real, dt_b: Real, err_b: Real) -> Option<Real> {
    if !(err_a > 0.0 && err_b > 0.0 && err_a.is_finite() && err_b.is_finite()) {
        return None;
    }
    if dt_a == dt_b {
        return None;
    }
    Some((err_a / err_b).ln() / (dt_a / dt_b).ln())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_on_known_offsets() {
        let t = [0.0, 1.0, 2.0, 3.0];
        let xs = [0.0, 1.5, 2.0, 2.5];
        let s = deviation_summary("probe", &t, &xs, |t| t);
        assert_eq!(s.samples, 4);
        assert_eq!(s.max_abs, 0.5);
        assert_eq!(s.t_at_max, 1.0);
        assert_eq!(s.final_abs, 0.5);
        assert!((s.rms - (0.5_f64 / 4.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn nan_samples_are_infinite_deviation() {
        let t = [0.0, 1.0];
        let xs = [0.0, Real::NAN];
        assert_eq!(max_abs_deviation(&t, &xs, |_| 0.0), Real::INFINITY);
    }

    #[test]
    fn observed_order_recovers_power_law() {
        let order = observed_order(0.02, 4e-4, 0.01, 1e-4).unwrap();
        assert!((order - 2.0).abs() < 1e-12);
        assert_eq!(observed_order(0.02, 0.0, 0.01, 1e-4), None);
        assert_eq!(observed_order(0.01, 1.0, 0.01, 1.0), None);
    }

    #[test]
    fn empty_series() {
        let s = deviation_summary("none", &[], &[], |_| 0.0);
        assert_eq!(s.samples, 0);
        assert_eq!(s.max_abs, 0.0);
        assert_eq!(s.rms, 0.0);
    }
}
