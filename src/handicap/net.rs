use super::index::round_to_tenth;
use super::types::IndexValue;

/// Net score for ranking: gross minus the as-of index, one decimal.
///
/// Fails open: a non-finite gross or index returns `gross` unchanged.
pub fn project_net(gross: f64, index: IndexValue) -> f64 {
    if !gross.is_finite() || !index.is_finite() {
        return gross;
    }
    // -0.0 normalises to 0.0
    round_to_tenth(gross - index) + 0.0
}

/// Net for a score card. Players without a qualifying prior round play off scratch.
pub fn net_for(gross: Option<i32>, index: Option<IndexValue>) -> Option<f64> {
    let gross = f64::from(gross?);
    Some(match index {
        Some(index) => project_net(gross, index),
        None => gross,
    })
}
