use tracing::trace;

/// Value stored for a rate cell that is missing or not a number.
///
/// This is lossy: a zero rate is indistinguishable from "not published".
/// Consumers that need the difference should read the source table.
pub const FALLBACK_RATE: f64 = 0.0;

/// Coerce one tenor cell to a rate percentage.
pub fn parse_rate(cell: Option<&str>) -> f64 {
    let Some(raw) = cell else {
        return FALLBACK_RATE;
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            trace!(cell = raw, "non-numeric rate cell; using fallback");
            FALLBACK_RATE
        }
    }
}
