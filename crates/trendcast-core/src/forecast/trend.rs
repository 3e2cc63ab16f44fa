//! Ordinary least-squares trend fitting over the calendar axis.

use serde::{Deserialize, Serialize};

use crate::{BarSeries, ForecastError};

/// Fewest bars that define a line.
pub const MIN_OBSERVATIONS: usize = 2;

/// Fitted line `y = intercept + slope * axis`.
///
/// The fit is stored around the sample means so that evaluating at Julian
/// day numbers (around 2.4 million) does not cancel away the precision of
/// the price level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    slope: f64,
    axis_mean: f64,
    value_mean: f64,
}

impl LinearFit {
    /// Least-squares fit of `values` against `axis`.
    ///
    /// Both slices must have the same length of at least [`MIN_OBSERVATIONS`].
    pub fn fit(axis: &[f64], values: &[f64]) -> Result<Self, ForecastError> {
        let n = axis.len().min(values.len());
        if n < MIN_OBSERVATIONS {
            return Err(ForecastError::InsufficientData {
                required: MIN_OBSERVATIONS,
                actual: n,
            });
        }

        let count = n as f64;
        let axis_mean = axis[..n].iter().sum::<f64>() / count;
        let value_mean = values[..n].iter().sum::<f64>() / count;

        let (sxx, sxy) = axis[..n]
            .iter()
            .zip(&values[..n])
            .fold((0.0, 0.0), |(sxx, sxy), (&x, &y)| {
                let dx = x - axis_mean;
                (sxx + dx * dx, sxy + dx * (y - value_mean))
            });

        // All observations on one axis value: no line through them.
        if sxx <= f64::EPSILON {
            return Err(ForecastError::InsufficientData {
                required: MIN_OBSERVATIONS,
                actual: 1,
            });
        }

        Ok(Self {
            slope: sxy / sxx,
            axis_mean,
            value_mean,
        })
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Value of the line at axis zero.
    pub fn intercept(&self) -> f64 {
        self.value_mean - self.slope * self.axis_mean
    }

    pub fn predict(&self, axis: f64) -> f64 {
        self.value_mean + self.slope * (axis - self.axis_mean)
    }
}

/// Independent close and high trend lines fitted on one series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FittedModel {
    pub close: LinearFit,
    pub high: LinearFit,
}

impl FittedModel {
    /// Fit close and high against each bar's calendar axis value.
    pub fn fit(series: &BarSeries) -> Result<Self, ForecastError> {
        let bars = series.bars();
        let axis: Vec<f64> = bars.iter().map(|bar| f64::from(bar.date.axis_value())).collect();
        let closes: Vec<f64> = bars.iter().map(|bar| bar.close).collect();
        let highs: Vec<f64> = bars.iter().map(|bar| bar.high).collect();

        let model = Self {
            close: LinearFit::fit(&axis, &closes)?,
            high: LinearFit::fit(&axis, &highs)?,
        };

        tracing::debug!(
            symbol = %series.symbol(),
            observations = bars.len(),
            close_slope = model.close.slope(),
            high_slope = model.high.slope(),
            "fitted trend"
        );

        Ok(model)
    }

    pub fn predict_close(&self, axis_value: i32) -> f64 {
        self.close.predict(f64::from(axis_value))
    }

    pub fn predict_high(&self, axis_value: i32) -> f64 {
        self.high.predict(f64::from(axis_value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn matches_closed_form_solution() {
        // x = 0..3, y = 1, 3, 2, 5: slope 5.5 / 5 = 1.1, intercept 2.75 - 1.65
        let fit = LinearFit::fit(&[0.0, 1.0, 2.0, 3.0], &[1.0, 3.0, 2.0, 5.0]).expect("fit");
        assert_close(fit.slope(), 1.1);
        assert_close(fit.intercept(), 1.1);
        assert_close(fit.predict(3.0), 4.4);
    }

    #[test]
    fn stays_exact_on_julian_day_axis() {
        let base = 2_460_320.0;
        let axis: Vec<f64> = (0..10).map(|i| base + f64::from(i)).collect();
        let values: Vec<f64> = (0..10).map(|i| 100.0 + f64::from(i)).collect();

        let fit = LinearFit::fit(&axis, &values).expect("fit");
        assert_close(fit.slope(), 1.0);
        assert_close(fit.predict(base + 10.0), 110.0);
    }

    #[test]
    fn rejects_fewer_than_two_points() {
        let err = LinearFit::fit(&[1.0], &[5.0]).expect_err("must fail");
        assert_eq!(
            err,
            ForecastError::InsufficientData {
                required: 2,
                actual: 1
            }
        );

        let err = LinearFit::fit(&[], &[]).expect_err("must fail");
        assert!(matches!(err, ForecastError::InsufficientData { actual: 0, .. }));
    }

    #[test]
    fn rejects_degenerate_axis() {
        let err = LinearFit::fit(&[7.0, 7.0, 7.0], &[1.0, 2.0, 3.0]).expect_err("must fail");
        assert!(matches!(err, ForecastError::InsufficientData { .. }));
    }
}
