//! Fleet smoothing of turbine power curves.
//!
//! A single-turbine power curve is convolved with a Gaussian wind-speed
//! uncertainty kernel to approximate the aggregate output of many turbines
//! spread over a larger area. Default parameters follow G. B. Andresen,
//! A. A. Søndergaard, M. Greiner, *Validation of Danish wind time series from
//! a new global renewable energy atlas for energy system analysis*,
//! Energy 93 (2015) 1074–1088.

use serde::Deserialize;

/// Lower bound of the regular velocity grid the convolution runs on (m/s).
const GRID_MIN: f64 = -50.0;
/// Upper bound of the regular velocity grid (m/s).
const GRID_MAX: f64 = 50.0;
/// Number of grid points, giving a 0.1 m/s spacing.
const GRID_POINTS: usize = 1001;
/// Spacing of the regular grid (m/s).
const GRID_STEP: f64 = 0.1;

/// Upper bound of the resampled output curve (m/s).
const OUTPUT_MAX: f64 = 35.0;
/// Number of points in the resampled output curve.
pub const OUTPUT_POINTS: usize = 72;

/// Output power at 0 m/s above this value (MW) counts as oversmoothing.
const OVERSMOOTHING_THRESHOLD_MW: f64 = 1e-2;

/// Kernel parameters for fleet smoothing.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SmoothingParams {
    /// Fleet availability factor applied to the smoothed curve.
    pub eta: f64,
    /// Mean of the wind-speed deviation (m/s).
    pub delta_v: f64,
    /// Standard deviation of the wind-speed deviation (m/s).
    pub sigma: f64,
}

impl Default for SmoothingParams {
    fn default() -> Self {
        Self {
            eta: 0.95,
            delta_v: 1.27,
            sigma: 2.29,
        }
    }
}

impl SmoothingParams {
    /// Gaussian kernel centered at `delta_v` with spread `sigma`.
    fn kernel(&self, v: f64) -> f64 {
        let var = self.sigma * self.sigma;
        let d = v - self.delta_v;
        (1.0 / (2.0 * std::f64::consts::PI * var).sqrt()) * (-d * d / (2.0 * var)).exp()
    }
}

/// Result of [`smooth`].
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothedCurve {
    /// Output velocities, 0 to 35 m/s in 72 points.
    pub velocities: Vec<f64>,
    /// Smoothed power at each output velocity (MW).
    pub power: Vec<f64>,
    /// Set when the smoothed curve generates power at 0 m/s.
    pub oversmoothed: bool,
}

/// Smooths a power curve with a Gaussian wind-speed kernel.
///
/// `velocities` must be non-decreasing and the same length as `power`.
/// Outside the input domain the curve is held at its endpoint values.
/// The result is always sampled on the same 0–35 m/s, 72-point grid, so
/// smoothing an already smoothed curve keeps its domain.
///
/// Oversmoothing (power above 1e-2 MW at 0 m/s) is reported through a
/// warning and [`SmoothedCurve::oversmoothed`]; the curve is still returned.
pub fn smooth(velocities: &[f64], power: &[f64], params: &SmoothingParams) -> SmoothedCurve {
    let grid = linspace(GRID_MIN, GRID_MAX, GRID_POINTS);
    let power_reg: Vec<f64> = grid.iter().map(|&v| interp(v, velocities, power)).collect();
    let kernel_reg: Vec<f64> = grid.iter().map(|&v| params.kernel(v)).collect();

    // The discrete convolution assumes unit spacing; rescale to the grid step.
    let convolution: Vec<f64> = convolve_same(&power_reg, &kernel_reg)
        .into_iter()
        .map(|p| p * GRID_STEP)
        .collect();

    let out_velocities = linspace(0.0, OUTPUT_MAX, OUTPUT_POINTS);
    let out_power: Vec<f64> = out_velocities
        .iter()
        .map(|&v| params.eta * interp(v, &grid, &convolution))
        .collect();

    let oversmoothed = out_velocities
        .iter()
        .zip(&out_power)
        .any(|(&v, &p)| v == 0.0 && p > OVERSMOOTHING_THRESHOLD_MW);
    if oversmoothed {
        tracing::warn!(
            eta = params.eta,
            delta_v = params.delta_v,
            sigma = params.sigma,
            "oversmoothing detected: turbine generates energy at 0 m/s wind speed"
        );
    }

    SmoothedCurve {
        velocities: out_velocities,
        power: out_power,
        oversmoothed,
    }
}

/// `n` evenly spaced samples from `start` to `stop`, both inclusive.
fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Piecewise-linear interpolation of `(xp, fp)` at `x`, clamped to the
/// endpoint values outside `[xp[0], xp[last]]`.
fn interp(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    let (Some(&x_first), Some(&x_last)) = (xp.first(), xp.last()) else {
        return 0.0;
    };
    if x <= x_first {
        return fp[0];
    }
    if x >= x_last {
        return fp[fp.len() - 1];
    }

    // First index with xp[hi] > x; xp[lo] <= x < xp[hi].
    let hi = xp.partition_point(|&v| v <= x);
    let lo = hi - 1;
    let t = (x - xp[lo]) / (xp[hi] - xp[lo]);
    fp[lo] + t * (fp[hi] - fp[lo])
}

/// Discrete convolution of `a` and `b`, cropped to the centered `a.len()`
/// samples of the full result.
fn convolve_same(a: &[f64], b: &[f64]) -> Vec<f64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let offset = (b.len() - 1) / 2;
    (0..a.len())
        .map(|i| {
            let k = i + offset;
            let j_min = k.saturating_sub(b.len() - 1);
            let j_max = k.min(a.len() - 1);
            (j_min..=j_max).map(|j| a[j] * b[k - j]).sum()
        })
        .collect()
}
