use serde::{Serialize, Deserialize};
use std::fmt;

const WIDTH: usize = 12;


/// Descriptive statistics of a sequence of real values:
/// count, mean, sample standard deviation, minimum,
/// quartiles (linear interpolation), maximum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Describe {
    /// Number of values.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Standard deviation with `n - 1` in the denominator.
    pub std: f64,
    /// Smallest value.
    pub min: f64,
    /// First quartile.
    pub q25: f64,
    /// Median.
    pub q50: f64,
    /// Third quartile.
    pub q75: f64,
    /// Largest value.
    pub max: f64,
}


/// Quantile `q` of the sorted slice `xs`,
/// interpolating linearly between the closest ranks.
fn quantile(xs: &[f64], q: f64) -> f64 {
    if xs.is_empty() { return f64::NAN; }

    let pos = q * (xs.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    xs[lo] + (xs[hi] - xs[lo]) * (pos - lo as f64)
}


impl Describe {
    /// Summarize `xs`. Empty input yields `count = 0` and `NaN` elsewhere.
    pub fn new(xs: &[f64]) -> Self {
        let count = xs.len();
        let n = count as f64;

        let mut sorted = xs.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let mean = if count == 0 {
            f64::NAN
        } else {
            xs.iter().sum::<f64>() / n
        };
        let std = if count < 2 {
            f64::NAN
        } else {
            let ss = xs.iter()
                .map(|x| (x - mean).powi(2))
                .sum::<f64>();
            (ss / (n - 1.0)).sqrt()
        };

        Self {
            count,
            mean,
            std,
            min: sorted.first().copied().unwrap_or(f64::NAN),
            q25: quantile(&sorted, 0.25),
            q50: quantile(&sorted, 0.50),
            q75: quantile(&sorted, 0.75),
            max: sorted.last().copied().unwrap_or(f64::NAN),
        }
    }


    /// Round every statistic to `digits` decimals.
    pub fn round(self, digits: i32) -> Self {
        let scale = 10_f64.powi(digits);
        let r = |x: f64| (x * scale).round() / scale;
        Self {
            count: self.count,
            mean: r(self.mean),
            std: r(self.std),
            min: r(self.min),
            q25: r(self.q25),
            q50: r(self.q50),
            q75: r(self.q75),
            max: r(self.max),
        }
    }


    /// Returns the eight `(name, value)` rows of the summary.
    pub fn rows(&self) -> [(&'static str, f64); 8] {
        [
            ("count", self.count as f64),
            ("mean", self.mean),
            ("std", self.std),
            ("min", self.min),
            ("25%", self.q25),
            ("50%", self.q50),
            ("75%", self.q75),
            ("max", self.max),
        ]
    }
}


impl fmt::Display for Describe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.rows() {
            writeln!(f, "{name:<8}{value:>WIDTH$}")?;
        }
        Ok(())
    }
}
