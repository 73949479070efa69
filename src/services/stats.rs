//! Elementary descriptive statistics over f64 slices.

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (ddof = 1). NaN for fewer than two values.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

/// Quantile with linear interpolation between the two nearest ranks.
pub fn quantile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() || !(0.0..=1.0).contains(&q) {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let weight = pos - lower as f64;
    sorted[lower] * (1.0 - weight) + sorted[upper] * weight
}

/// Pearson correlation coefficient across shared indices. NaN when either
/// series is constant or empty.
pub fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return f64::NAN;
    }
    let a = &a[..n];
    let b = &b[..n];

    let mean_a = mean(a);
    let mean_b = mean(b);
    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for i in 0..n {
        let da = a[i] - mean_a;
        let db = b[i] - mean_b;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }

    let denom = (var_a * var_b).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    cov / denom
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn mean_min_max_of_simple_series() {
        let values = [10.0, 20.0, 30.0];
        assert!((mean(&values) - 20.0).abs() < EPS);
        assert!((quantile(&values, 0.0) - 10.0).abs() < EPS);
        assert!((quantile(&values, 1.0) - 30.0).abs() < EPS);
    }

    #[test]
    fn std_dev_uses_sample_variance() {
        // Sample std of [10, 20, 30] is 10.
        assert!((std_dev(&[10.0, 20.0, 30.0]) - 10.0).abs() < EPS);
        assert!(std_dev(&[10.0]).is_nan());
    }

    #[test]
    fn quartiles_interpolate_linearly() {
        let values = [10.0, 20.0, 30.0];
        assert!((quantile(&values, 0.25) - 15.0).abs() < EPS);
        assert!((quantile(&values, 0.5) - 20.0).abs() < EPS);
        assert!((quantile(&values, 0.75) - 25.0).abs() < EPS);
    }

    #[test]
    fn correlation_of_scaled_series_is_one() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [10.0, 20.0, 30.0, 40.0];
        assert!((pearson(&a, &b) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn correlation_of_inverted_series_is_minus_one() {
        let a = [1.0, 2.0, 3.0];
        let b = [3.0, 2.0, 1.0];
        assert!((pearson(&a, &b) + 1.0).abs() < 1e-9);
    }

    #[test]
    fn constant_series_correlation_is_nan() {
        let a = [5.0, 5.0, 5.0];
        let b = [1.0, 2.0, 3.0];
        assert!(pearson(&a, &b).is_nan());
        assert!(pearson(&[], &[]).is_nan());
    }
}
