use crate::error::{ModelError, Result};
use rand::RngCore;
use rand_distr::Distribution as _;

/// A distribution family usable as a variable's generating distribution.
///
/// Implementations are stateless: one descriptor is shared by reference
/// across every variable that uses the family. Parameter ordering and count
/// are fixed per family (e.g. Normal: `[mean, standard_deviation]`). The
/// evaluators never special-case a family — adding one means implementing
/// this trait and handing the descriptor to the graph builder.
pub trait Distribution: Send + Sync {
    /// Family name, used in error messages.
    fn name(&self) -> &'static str;

    /// Natural-log density of `point` under the family parameterized by
    /// `params`. May return negative infinity outside the support.
    fn log_density(&self, point: f64, params: &[f64]) -> Result<f64>;

    /// Draw one value from the family parameterized by `params`.
    fn sample(&self, params: &[f64], rng: &mut dyn RngCore) -> Result<f64>;
}

/// Shared handle to a stateless distribution descriptor.
pub type DistRef = std::sync::Arc<dyn Distribution>;

fn params2(family: &'static str, params: &[f64]) -> Result<(f64, f64)> {
    match *params {
        [a, b] => Ok((a, b)),
        _ => Err(ModelError::ParamCount {
            family,
            expected: 2,
            got: params.len(),
        }),
    }
}

fn params1(family: &'static str, params: &[f64]) -> Result<f64> {
    match *params {
        [a] => Ok(a),
        _ => Err(ModelError::ParamCount {
            family,
            expected: 1,
            got: params.len(),
        }),
    }
}

// ── Normal (mean, standard deviation) ───────────────────────────────

pub struct Normal;

impl Normal {
    pub fn new() -> DistRef {
        std::sync::Arc::new(Normal)
    }

    fn check_sd(sd: f64) -> Result<()> {
        if sd > 0.0 && sd.is_finite() {
            Ok(())
        } else {
            Err(ModelError::InvalidParams {
                family: "normal",
                reason: format!("standard deviation must be positive, got {}", sd),
            })
        }
    }
}

impl Distribution for Normal {
    fn name(&self) -> &'static str {
        "normal"
    }

    fn log_density(&self, point: f64, params: &[f64]) -> Result<f64> {
        let (mean, sd) = params2(self.name(), params)?;
        Self::check_sd(sd)?;
        let diff = point - mean;
        Ok(-0.5 * (diff * diff) / (sd * sd) - sd.ln() - 0.5 * std::f64::consts::TAU.ln())
    }

    fn sample(&self, params: &[f64], rng: &mut dyn RngCore) -> Result<f64> {
        let (mean, sd) = params2(self.name(), params)?;
        Self::check_sd(sd)?;
        let dist = rand_distr::Normal::new(mean, sd).map_err(|e| ModelError::InvalidParams {
            family: self.name(),
            reason: e.to_string(),
        })?;
        Ok(dist.sample(rng))
    }
}

// ── Uniform (lower, upper) ──────────────────────────────────────────

pub struct Uniform;

impl Uniform {
    pub fn new() -> DistRef {
        std::sync::Arc::new(Uniform)
    }

    fn check_bounds(lo: f64, hi: f64) -> Result<()> {
        if lo < hi && lo.is_finite() && hi.is_finite() {
            Ok(())
        } else {
            Err(ModelError::InvalidParams {
                family: "uniform",
                reason: format!("bounds must satisfy lower < upper, got [{}, {}]", lo, hi),
            })
        }
    }
}

impl Distribution for Uniform {
    fn name(&self) -> &'static str {
        "uniform"
    }

    fn log_density(&self, point: f64, params: &[f64]) -> Result<f64> {
        let (lo, hi) = params2(self.name(), params)?;
        Self::check_bounds(lo, hi)?;
        if point >= lo && point <= hi {
            Ok(-(hi - lo).ln())
        } else {
            Ok(f64::NEG_INFINITY)
        }
    }

    fn sample(&self, params: &[f64], rng: &mut dyn RngCore) -> Result<f64> {
        let (lo, hi) = params2(self.name(), params)?;
        Self::check_bounds(lo, hi)?;
        Ok(rand_distr::Uniform::new(lo, hi).sample(rng))
    }
}

// ── Exponential (rate) ──────────────────────────────────────────────

pub struct Exponential;

impl Exponential {
    pub fn new() -> DistRef {
        std::sync::Arc::new(Exponential)
    }

    fn check_rate(rate: f64) -> Result<()> {
        if rate > 0.0 && rate.is_finite() {
            Ok(())
        } else {
            Err(ModelError::InvalidParams {
                family: "exponential",
                reason: format!("rate must be positive, got {}", rate),
            })
        }
    }
}

impl Distribution for Exponential {
    fn name(&self) -> &'static str {
        "exponential"
    }

    fn log_density(&self, point: f64, params: &[f64]) -> Result<f64> {
        let rate = params1(self.name(), params)?;
        Self::check_rate(rate)?;
        if point >= 0.0 {
            Ok(rate.ln() - rate * point)
        } else {
            Ok(f64::NEG_INFINITY)
        }
    }

    fn sample(&self, params: &[f64], rng: &mut dyn RngCore) -> Result<f64> {
        let rate = params1(self.name(), params)?;
        Self::check_rate(rate)?;
        let dist = rand_distr::Exp::new(rate).map_err(|e| ModelError::InvalidParams {
            family: self.name(),
            reason: e.to_string(),
        })?;
        Ok(dist.sample(rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_normal_log_density_standard() {
        let d = Normal;
        // logpdf(0; 0, 1) = -0.5 * ln(2π)
        let lp = d.log_density(0.0, &[0.0, 1.0]).unwrap();
        assert!((lp - (-0.5 * std::f64::consts::TAU.ln())).abs() < 1e-12);
    }

    #[test]
    fn test_normal_log_density_shifted() {
        let d = Normal;
        let lp = d.log_density(1.5, &[0.0, 5.0]).unwrap();
        let expected =
            -0.5 * (1.5f64 / 5.0).powi(2) - 5.0f64.ln() - 0.5 * std::f64::consts::TAU.ln();
        assert!((lp - expected).abs() < 1e-12);
    }

    #[test]
    fn test_normal_rejects_bad_sd() {
        let d = Normal;
        assert!(matches!(
            d.log_density(0.0, &[0.0, 0.0]),
            Err(ModelError::InvalidParams { .. })
        ));
        assert!(matches!(
            d.log_density(0.0, &[0.0, -1.0]),
            Err(ModelError::InvalidParams { .. })
        ));
    }

    #[test]
    fn test_normal_rejects_wrong_arity() {
        let d = Normal;
        assert!(matches!(
            d.log_density(0.0, &[0.0]),
            Err(ModelError::ParamCount {
                expected: 2,
                got: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_normal_sample_moments() {
        let d = Normal;
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let n = 10_000;
        let draws: Vec<f64> = (0..n)
            .map(|_| d.sample(&[2.0, 3.0], &mut rng).unwrap())
            .collect();
        let mean = draws.iter().sum::<f64>() / n as f64;
        let var = draws.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;
        assert!((mean - 2.0).abs() < 0.15, "mean={}", mean);
        assert!((var.sqrt() - 3.0).abs() < 0.15, "std={}", var.sqrt());
    }

    #[test]
    fn test_uniform_log_density() {
        let d = Uniform;
        let lp = d.log_density(0.5, &[0.0, 2.0]).unwrap();
        assert!((lp - (-2.0f64.ln())).abs() < 1e-12);
        assert_eq!(d.log_density(3.0, &[0.0, 2.0]).unwrap(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_uniform_sample_in_support() {
        let d = Uniform;
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..1000 {
            let x = d.sample(&[-1.0, 4.0], &mut rng).unwrap();
            assert!((-1.0..4.0).contains(&x));
        }
    }

    #[test]
    fn test_exponential_log_density() {
        let d = Exponential;
        let lp = d.log_density(2.0, &[0.5]).unwrap();
        assert!((lp - (0.5f64.ln() - 1.0)).abs() < 1e-12);
        assert_eq!(d.log_density(-0.1, &[0.5]).unwrap(), f64::NEG_INFINITY);
        assert!(matches!(
            d.log_density(1.0, &[-2.0]),
            Err(ModelError::InvalidParams { .. })
        ));
    }
}
