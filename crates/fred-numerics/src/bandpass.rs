//! Band-pass filters.
//!
//! Both filters isolate fluctuations with periods between `low` and `high`
//! observations. Baxter-King applies fixed symmetric weights and therefore
//! loses `k` observations at each end; Christiano-Fitzgerald uses the whole
//! sample with asymmetric weights and keeps every observation.

use std::f64::consts::PI;

use fred_core::{FredError, Result};

fn validate_band(low: f64, high: f64) -> Result<()> {
    if !(low.is_finite() && high.is_finite()) || low < 2.0 || high <= low {
        return Err(FredError::InvalidParameter(format!(
            "band-pass periods must satisfy 2 <= low < high, got low={low}, high={high}"
        )));
    }
    Ok(())
}

/// Ideal band-pass weights `b_0..=b_len` for periods `[low, high]`.
fn ideal_weights(low: f64, high: f64, len: usize) -> Vec<f64> {
    let omega_low = 2.0 * PI / high;
    let omega_high = 2.0 * PI / low;
    let mut weights = Vec::with_capacity(len + 1);
    weights.push((omega_high - omega_low) / PI);
    for j in 1..=len {
        let j = j as f64;
        weights.push(((omega_high * j).sin() - (omega_low * j).sin()) / (PI * j));
    }
    weights
}

/// Baxter-King band-pass filter.
///
/// Returns the cyclical component for observations `k..n-k`, i.e. a vector
/// `2k` shorter than `x`.
///
/// # Errors
/// - [`FredError::InvalidParameter`] unless `2 <= low < high`.
/// - [`FredError::InsufficientData`] if `x` has `2k` or fewer observations.
pub fn bk_filter(x: &[f64], low: f64, high: f64, k: usize) -> Result<Vec<f64>> {
    validate_band(low, high)?;
    let n = x.len();
    if n <= 2 * k {
        return Err(FredError::InsufficientData {
            required: 2 * k + 1,
            actual: n,
        });
    }

    let mut weights = ideal_weights(low, high, k);
    // Force the weights to sum to zero so a constant input maps to zero.
    let total = weights[0] + 2.0 * weights[1..].iter().sum::<f64>();
    let shift = total / (2 * k + 1) as f64;
    for w in &mut weights {
        *w -= shift;
    }

    let cycle = (k..n - k)
        .map(|t| {
            let mut acc = weights[0] * x[t];
            for (j, w) in weights.iter().enumerate().skip(1) {
                acc += w * (x[t - j] + x[t + j]);
            }
            acc
        })
        .collect();
    Ok(cycle)
}

/// Christiano-Fitzgerald asymmetric band-pass filter, without drift
/// adjustment (random-walk end corrections).
///
/// Returns `(cycle, trend)` with `trend = x - cycle`, both as long as `x`.
///
/// # Errors
/// - [`FredError::InvalidParameter`] unless `2 <= low < high`.
/// - [`FredError::InsufficientData`] if `x` has fewer than two observations.
pub fn cf_filter(x: &[f64], low: f64, high: f64) -> Result<(Vec<f64>, Vec<f64>)> {
    validate_band(low, high)?;
    let n = x.len();
    if n < 2 {
        return Err(FredError::InsufficientData {
            required: 2,
            actual: n,
        });
    }

    let b = ideal_weights(low, high, n);
    // prefix[m] = b_1 + ... + b_m
    let mut prefix = vec![0.0; n + 1];
    for m in 1..=n {
        prefix[m] = prefix[m - 1] + b[m];
    }

    let first = x[0];
    let last = x[n - 1];
    let mut cycle = Vec::with_capacity(n);
    for i in 0..n {
        let ahead = n.saturating_sub(i + 2);
        let behind = i.saturating_sub(1);

        let end_weight = -0.5 * b[0] - prefix[ahead];
        let start_weight = -b[0] - prefix[ahead] - prefix[behind] - end_weight;

        let mut acc = b[0] * x[i] + end_weight * last + start_weight * first;
        for j in 1..=ahead {
            acc += b[j] * x[i + j];
        }
        for j in 1..=behind {
            acc += b[j] * x[i - j];
        }
        cycle.push(acc);
    }

    let trend = x.iter().zip(&cycle).map(|(v, c)| v - c).collect();
    Ok((cycle, trend))
}
