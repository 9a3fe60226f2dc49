//! Temporal distribution of project targets: month sequences, target
//! shaping, cumulative percentage curves, and plan-vs-actual slippage.

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::ScheduleError;

/// Month-token (`YYYY-MM`) to value. Carries no order of its own;
/// every function here takes the ordered month slice alongside it.
pub type MonthlyBreakdown = BTreeMap<String, f64>;

/// How a scalar target is shaped across a month sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistributionStrategy {
    /// Flat split with the remainder spread over the leading months.
    Even,
    /// Ramp from half pace to full pace across the first half of the
    /// sequence, then hold.
    Weighted,
}

impl FromStr for DistributionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "even" => Ok(Self::Even),
            "weighted" => Ok(Self::Weighted),
            other => Err(format!("unknown distribution strategy: {}", other)),
        }
    }
}

/// Every first-of-month token from `start`'s month through `end`'s
/// month inclusive, ascending and contiguous. Empty when `start` is
/// after `end`.
pub fn generate_month_range(start: NaiveDate, end: NaiveDate) -> Vec<String> {
    let mut tokens = Vec::new();
    let (mut year, mut month) = (start.year(), start.month());
    while (year, month) <= (end.year(), end.month()) {
        tokens.push(format!("{:04}-{:02}", year, month));
        month += 1;
        if month > 12 {
            month = 1;
            year += 1;
        }
    }
    tokens
}

/// Per-month weights for the weighted strategy: linear ramp from 0.5
/// to 1.0 across the first half of the sequence, then hold at 1.0.
fn ramp_weights(n: usize) -> Vec<f64> {
    let mid = n / 2;
    (0..n)
        .map(|i| {
            if i < mid {
                0.5 + 0.5 * i as f64 / mid as f64
            } else {
                1.0
            }
        })
        .collect()
}

/// Distribute `total` across `months`. Both strategies reproduce the
/// total exactly: even by construction, weighted by assigning the
/// rounding residual to the midpoint month.
pub fn generate_monthly_template(
    total: f64,
    months: &[String],
    strategy: DistributionStrategy,
) -> MonthlyBreakdown {
    let n = months.len();
    if n == 0 {
        return MonthlyBreakdown::new();
    }
    match strategy {
        DistributionStrategy::Even => {
            let base = (total / n as f64).floor();
            let remainder = (total - base * n as f64).round() as usize;
            months
                .iter()
                .enumerate()
                .map(|(i, m)| {
                    let value = if i < remainder { base + 1.0 } else { base };
                    (m.clone(), value)
                })
                .collect()
        }
        DistributionStrategy::Weighted => {
            let weights = ramp_weights(n);
            let total_weight: f64 = weights.iter().sum();
            let mut values: Vec<f64> = weights
                .iter()
                .map(|w| (total * w / total_weight).round())
                .collect();
            let residual = total - values.iter().sum::<f64>();
            if residual != 0.0 {
                values[n / 2] += residual;
            }
            months
                .iter()
                .cloned()
                .zip(values)
                .collect()
        }
    }
}

/// Cumulative percentage targets toward a fixed ceiling of 100. The
/// final month is forced to exactly 100 regardless of accumulated
/// rounding; only the last index is overridden.
pub fn generate_cumulative_percentage_template(
    months: &[String],
    strategy: DistributionStrategy,
) -> MonthlyBreakdown {
    let n = months.len();
    if n == 0 {
        return MonthlyBreakdown::new();
    }
    let weights = match strategy {
        DistributionStrategy::Even => vec![1.0; n],
        DistributionStrategy::Weighted => ramp_weights(n),
    };
    let total_weight: f64 = weights.iter().sum();
    let mut accumulated = 0.0;
    months
        .iter()
        .enumerate()
        .map(|(i, m)| {
            accumulated += weights[i];
            let value = if i == n - 1 {
                100.0
            } else {
                (100.0 * accumulated / total_weight).round()
            };
            (m.clone(), value)
        })
        .collect()
}

/// Pure predicate over a cumulative-percentage breakdown: values must
/// be non-decreasing across the month sequence, never exceed 100, and
/// the final month must land within 0.01 of 100. Months absent from
/// the map read as 0.
pub fn validate_cumulative_percentage(
    breakdown: &MonthlyBreakdown,
    months: &[String],
) -> Result<(), ScheduleError> {
    let Some(last_month) = months.last() else {
        return Err(ScheduleError::EmptyMonths);
    };
    let mut previous: Option<f64> = None;
    for month in months {
        let value = breakdown.get(month).copied().unwrap_or(0.0);
        if let Some(p) = previous {
            if value < p {
                return Err(ScheduleError::NotMonotonic {
                    month: month.clone(),
                });
            }
        }
        if value > 100.0 {
            return Err(ScheduleError::AboveCeiling {
                month: month.clone(),
                value,
            });
        }
        previous = Some(value);
    }
    let final_value = breakdown.get(last_month).copied().unwrap_or(0.0);
    if (final_value - 100.0).abs() > 0.01 {
        return Err(ScheduleError::IncompleteFinal { value: final_value });
    }
    Ok(())
}

/// Proportionally rescale every month toward `new_total`, rounding each
/// and assigning the residual to the first month with a nonzero rounded
/// value. No-op when the current total is 0. When every month rounds to
/// zero the residual is dropped; that condition is logged but not
/// repaired.
pub fn adjust_monthly_breakdown(current: &MonthlyBreakdown, new_total: f64) -> MonthlyBreakdown {
    let current_total: f64 = current.values().sum();
    if current_total == 0.0 {
        return current.clone();
    }
    let ratio = new_total / current_total;
    let mut adjusted: MonthlyBreakdown = current
        .iter()
        .map(|(month, value)| (month.clone(), (value * ratio).round()))
        .collect();
    let residual = new_total - adjusted.values().sum::<f64>();
    if residual != 0.0 {
        let carrier = adjusted
            .iter()
            .find(|(_, v)| **v != 0.0)
            .map(|(m, _)| m.clone());
        match carrier {
            Some(month) => {
                if let Some(v) = adjusted.get_mut(&month) {
                    *v += residual;
                }
            }
            None => {
                log::warn!(
                    "monthly rescale dropped a residual of {} because every month rounded to zero",
                    residual
                );
            }
        }
    }
    adjusted
}

/// Running total of a breakdown across the month sequence.
pub fn calculate_cumulative_progress(
    breakdown: &MonthlyBreakdown,
    months: &[String],
) -> MonthlyBreakdown {
    let mut accumulated = 0.0;
    months
        .iter()
        .map(|month| {
            accumulated += breakdown.get(month).copied().unwrap_or(0.0);
            (month.clone(), accumulated)
        })
        .collect()
}

/// Elementwise plan minus actual per month. Positive values mean the
/// project is behind schedule; there is no smoothing or carry-over.
pub fn calculate_slippage(
    plan: &MonthlyBreakdown,
    actual: &MonthlyBreakdown,
    months: &[String],
) -> MonthlyBreakdown {
    months
        .iter()
        .map(|month| {
            let planned = plan.get(month).copied().unwrap_or(0.0);
            let achieved = actual.get(month).copied().unwrap_or(0.0);
            (month.clone(), planned - achieved)
        })
        .collect()
}
