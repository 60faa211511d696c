pub fn clip01(x: f64) -> f64 {
    if x < 0.0 {
        0.0
    } else if x > 1.0 {
        1.0
    } else {
        x
    }
}

/// Arithmetic mean; 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Arithmetic mean, or `None` for an empty slice.
pub fn mean_opt(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(mean(values))
    }
}

/// Population standard deviation; 0 for fewer than two values.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

/// `1 - stddev / span`, clamped to [0, 1]. A single value has full agreement,
/// no values have none.
pub fn agreement(values: &[f64], span: f64) -> f64 {
    match values.len() {
        0 => 0.0,
        1 => 1.0,
        _ if span <= 0.0 => 0.0,
        _ => clip01(1.0 - std_dev(values) / span),
    }
}

/// `numerator / denominator * 100`, 0 when the denominator is 0.
pub fn percent(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator * 100.0
    }
}
