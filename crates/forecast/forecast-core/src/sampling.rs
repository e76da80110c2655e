//! Posterior predictive simulation
//!
//! Each draw keeps the fitted seasonal terms, extends the trend with
//! randomly placed future changepoints and adds Gaussian observation noise.

use chrono::NaiveDate;
use forecast_spi::{ForecastError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Binomial, Distribution, Normal};

use crate::deadline::Deadline;
use crate::model::DecompositionModel;

/// Draws between deadline checks
const CHECK_EVERY: usize = 50;

/// Simulate `samples` draws for every date.
///
/// Returns one vector of draws per date, in the order of `dates`.
pub fn sample_predictive(
    model: &DecompositionModel,
    dates: &[NaiveDate],
    samples: usize,
    seed: u64,
    deadline: &Deadline,
) -> Result<Vec<Vec<f64>>> {
    let components = model.components(dates);
    let seasonal: Vec<f64> = (0..components.len()).map(|i| components.seasonal(i)).collect();
    let times: Vec<f64> = dates.iter().map(|&d| model.scaled_time(d)).collect();

    let t_max = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let future_steps = if t_max > 1.0 {
        ((t_max - 1.0) * model.span_days()).round() as u64
    } else {
        0
    };

    let deltas = model.deltas();
    let change_probability = if deltas.is_empty() {
        0.0
    } else {
        (deltas.len() as f64 / model.history_len() as f64).min(1.0)
    };
    let change_scale = deltas.iter().map(|d| d.abs()).sum::<f64>() / deltas.len().max(1) as f64 + 1e-8;

    let noise = Normal::new(0.0, model.noise_scale())
        .map_err(|e| ForecastError::NumericalError(format!("noise distribution: {}", e)))?;
    let changes = Binomial::new(future_steps, change_probability)
        .map_err(|e| ForecastError::NumericalError(format!("changepoint distribution: {}", e)))?;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut draws: Vec<Vec<f64>> = vec![Vec::with_capacity(samples); dates.len()];
    let mut extra: Vec<(f64, f64)> = Vec::new();

    for draw in 0..samples {
        if draw % CHECK_EVERY == 0 {
            deadline.check("sample")?;
        }

        extra.clear();
        let n_new = if future_steps > 0 && change_probability > 0.0 {
            changes.sample(&mut rng)
        } else {
            0
        };
        for _ in 0..n_new {
            let position = 1.0 + rng.gen::<f64>() * (t_max - 1.0);
            extra.push((position, laplace(&mut rng, change_scale)));
        }

        for (i, &t) in times.iter().enumerate() {
            let trend = model.trend().evaluate_with(model.params(), t, &extra) * model.y_scale();
            draws[i].push(trend + seasonal[i] + noise.sample(&mut rng));
        }
    }

    Ok(draws)
}

/// Laplace(0, scale) by inverse transform
fn laplace<R: Rng + ?Sized>(rng: &mut R, scale: f64) -> f64 {
    let u = rng.gen::<f64>() - 0.5;
    -scale * u.signum() * (1.0 - 2.0 * u.abs()).max(f64::MIN_POSITIVE).ln()
}
