//! Text formatting of derived values.
//!
//! Win-rate fields may be exported as percentages or fractions; the scale is
//! normalized here and nowhere else.

use featlens_model::DeltaScale;

/// Marker shown in place of a missing value.
pub const UNAVAILABLE: &str = "unavailable";

/// Converts a win-rate value to percentage points.
#[must_use]
pub fn to_percent(value: f64, scale: DeltaScale) -> f64 {
    match scale {
        DeltaScale::Percent => value,
        DeltaScale::Fraction => value * 100.0,
    }
}

/// Formats a signed effect size, e.g. `+4.20%`.
#[must_use]
pub fn format_delta(delta: Option<f64>, scale: DeltaScale) -> String {
    delta.map_or_else(
        || UNAVAILABLE.to_owned(),
        |d| format!("{:+.2}%", to_percent(d, scale)),
    )
}

/// Formats an unsigned percentage, e.g. `12.50%`.
#[must_use]
pub fn format_percentage(value: Option<f64>, scale: DeltaScale) -> String {
    value.map_or_else(
        || UNAVAILABLE.to_owned(),
        |v| format!("{:.2}%", to_percent(v, scale)),
    )
}

/// Formats a p-value; small values use scientific notation.
#[must_use]
pub fn format_p_value(p_value: Option<f64>) -> String {
    match p_value {
        None => UNAVAILABLE.to_owned(),
        Some(p) if p > 0.0 && p < 1e-3 => format!("{p:.2e}"),
        Some(p) => format!("{p:.4}"),
    }
}

/// Formats a correlation coefficient.
#[must_use]
pub fn format_correlation(value: Option<f64>) -> String {
    value.map_or_else(|| UNAVAILABLE.to_owned(), |v| format!("{v:.2}"))
}

/// Formats a signed activation score.
#[must_use]
pub fn format_score(score: Option<f64>) -> String {
    score.map_or_else(|| UNAVAILABLE.to_owned(), |s| format!("{s:+.2}"))
}
