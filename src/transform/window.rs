//! Rolling window statistics.
//!
//! Windows are only evaluated where they fit completely inside the series;
//! every other position is NaN. A centered window of width `w` at index `i`
//! covers `[i - w/2, i - w/2 + w)`, so even widths reach one step further
//! back than forward.

/// Bounds of the full window ending or centered at `i`, if it fits.
fn window_bounds(i: usize, n: usize, window: usize, center: bool) -> Option<(usize, usize)> {
    if window == 0 {
        return None;
    }
    let start = if center {
        i.checked_sub(window / 2)?
    } else {
        (i + 1).checked_sub(window)?
    };
    let end = start + window;
    (end <= n).then_some((start, end))
}

/// Generic rolling window application over full windows.
fn rolling_apply<F>(series: &[f64], window: usize, center: bool, f: F) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let n = series.len();
    (0..n)
        .map(|i| match window_bounds(i, n, window, center) {
            Some((start, end)) => f(&series[start..end]),
            None => f64::NAN,
        })
        .collect()
}

fn mean_of(segment: &[f64]) -> f64 {
    segment.iter().sum::<f64>() / segment.len() as f64
}

/// Sample variance (n - 1 denominator).
fn sample_var_of(segment: &[f64]) -> f64 {
    if segment.len() < 2 {
        return f64::NAN;
    }
    let mean = mean_of(segment);
    segment.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (segment.len() - 1) as f64
}

/// Compute rolling mean (moving average).
///
/// # Arguments
/// * `series` - Input time series
/// * `window` - Window size
/// * `center` - If true, center the window, otherwise it trails
pub fn rolling_mean(series: &[f64], window: usize, center: bool) -> Vec<f64> {
    rolling_apply(series, window, center, mean_of)
}

/// Compute rolling sample variance.
pub fn rolling_var(series: &[f64], window: usize, center: bool) -> Vec<f64> {
    rolling_apply(series, window, center, sample_var_of)
}

/// Compute rolling sample standard deviation.
pub fn rolling_std(series: &[f64], window: usize, center: bool) -> Vec<f64> {
    rolling_var(series, window, center)
        .into_iter()
        .map(f64::sqrt)
        .collect()
}

/// Centered rolling mean and sample standard deviation of one sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingStats {
    /// Window width.
    pub window: usize,
    /// Mean per index, NaN where the window does not fit.
    pub mean: Vec<f64>,
    /// Sample standard deviation per index, NaN where the window does not fit.
    pub std: Vec<f64>,
}

impl RollingStats {
    /// Compute centered statistics in a single pass over the windows.
    pub fn centered(series: &[f64], window: usize) -> Self {
        let n = series.len();
        let mut mean = vec![f64::NAN; n];
        let mut std = vec![f64::NAN; n];

        for i in 0..n {
            if let Some((start, end)) = window_bounds(i, n, window, true) {
                let segment = &series[start..end];
                mean[i] = mean_of(segment);
                std[i] = sample_var_of(segment).sqrt();
            }
        }

        Self { window, mean, std }
    }

    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /// Whether the window at `i` was full.
    pub fn is_defined(&self, i: usize) -> bool {
        self.mean.get(i).is_some_and(|m| !m.is_nan())
    }

    /// `[mean - k*std, mean + k*std]` at index `i`.
    pub fn band(&self, i: usize, k: f64) -> Option<(f64, f64)> {
        if !self.is_defined(i) {
            return None;
        }
        let (m, s) = (self.mean[i], self.std[i]);
        Some((m - k * s, m + k * s))
    }
}
