use std::cmp::Ordering;

use super::model::SdgPrediction;

/// Arithmetic mean of `values`, `0.0` when there are none.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Percentile of `values` using linear interpolation between the two closest ranks.
///
/// `p` is expressed on the 0..=100 scale and is clamped into it. This matches the
/// default ("linear") method of numpy's `percentile`.
///
/// # Example
/// ```
/// use sdg_classify::classifier::utils::percentile;
///
/// let p90 = percentile(&[0.1, 0.2, 0.9], 90.0);
/// assert!((p90 - 0.76).abs() < 1e-12);
/// ```
pub fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 100.0) };
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let fraction = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Returns the `n` highest-scoring predictions, best first.
///
/// The sort is stable, so equal scores keep the order the service returned them in.
pub fn top_n(predictions: &[SdgPrediction], n: usize) -> Vec<&SdgPrediction> {
    let mut ranked: Vec<&SdgPrediction> = predictions.iter().collect();
    ranked.sort_by(|a, b| b.prediction.partial_cmp(&a.prediction).unwrap_or(Ordering::Equal));
    ranked.truncate(n);
    ranked
}

/// Predictions scoring at least `floor`, in service order.
pub fn at_least(predictions: &[SdgPrediction], floor: f64) -> Vec<&SdgPrediction> {
    predictions.iter().filter(|p| p.prediction >= floor).collect()
}

/// Formats one prediction as `"03 (45%) Good health and well-being"`.
pub fn format_entry(prediction: &SdgPrediction) -> String {
    format!(
        "{:02} ({:.0}%) {}",
        prediction.sdg.code,
        prediction.prediction * 100.0,
        prediction.sdg.name
    )
}

pub fn format_entries<'a>(predictions: impl IntoIterator<Item = &'a SdgPrediction>) -> String {
    predictions
        .into_iter()
        .map(format_entry)
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(code: i64, name: &str, score: f64) -> SdgPrediction {
        SdgPrediction::new(code, name, score)
    }

    #[test]
    fn test_mean() {
        assert!((mean(&[0.1, 0.2, 0.9]) - 0.4).abs() < 1e-12);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_percentile_linear_interpolation() {
        let scores = [0.9, 0.1, 0.2];
        assert!((percentile(&scores, 90.0) - 0.76).abs() < 1e-12);
        assert!((percentile(&scores, 50.0) - 0.2).abs() < 1e-12);
        assert_eq!(percentile(&scores, 0.0), 0.1);
        assert_eq!(percentile(&scores, 100.0), 0.9);
        assert!((percentile(&[1.0, 2.0, 3.0, 4.0], 25.0) - 1.75).abs() < 1e-12);
    }

    #[test]
    fn test_percentile_edge_cases() {
        assert_eq!(percentile(&[], 90.0), 0.0);
        assert_eq!(percentile(&[0.3], 90.0), 0.3);
        assert_eq!(percentile(&[0.1, 0.5], 150.0), 0.5);
        assert_eq!(percentile(&[0.1, 0.5], -5.0), 0.1);
    }

    #[test]
    fn test_top_n_is_stable() {
        let predictions = vec![
            prediction(1, "a", 0.2),
            prediction(2, "b", 0.5),
            prediction(3, "c", 0.2),
            prediction(4, "d", 0.5),
            prediction(5, "e", 0.1),
        ];
        let codes: Vec<i64> = top_n(&predictions, 3).iter().map(|p| p.sdg.code).collect();
        assert_eq!(codes, vec![2, 4, 1]);
        assert_eq!(top_n(&predictions[..2], 3).len(), 2);
    }

    #[test]
    fn test_format_entry() {
        assert_eq!(format_entry(&prediction(3, "Good health", 0.456)), "03 (46%) Good health");
        assert_eq!(format_entry(&prediction(13, "Climate action", 1.0)), "13 (100%) Climate action");
        assert_eq!(format_entry(&prediction(7, "Energy", 0.004)), "07 (0%) Energy");
    }

    #[test]
    fn test_format_entries_joins_with_pipe() {
        let predictions = vec![prediction(1, "No poverty", 0.5), prediction(2, "Zero hunger", 0.25)];
        assert_eq!(
            format_entries(&predictions),
            "01 (50%) No poverty | 02 (25%) Zero hunger"
        );
        assert_eq!(format_entries(Vec::<&SdgPrediction>::new()), "");
    }

    #[test]
    fn test_at_least_keeps_service_order() {
        let predictions = vec![
            prediction(1, "a", 0.3),
            prediction(2, "b", 0.9),
            prediction(3, "c", 0.3),
        ];
        let codes: Vec<i64> = at_least(&predictions, 0.3).iter().map(|p| p.sdg.code).collect();
        assert_eq!(codes, vec![1, 2, 3]);
    }
}
