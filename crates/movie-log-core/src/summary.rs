use movie_log_models::{WatchedEntry, WatchedSummary};

/// Arithmetic mean; an empty input averages to 0 rather than NaN
pub fn average<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Count and display-rounded means over the watched list.
///
/// The critics' mean only covers entries that have a critics' rating, the
/// runtime mean only entries with a known (non-zero) runtime.
pub fn summarize(entries: &[WatchedEntry]) -> WatchedSummary {
    WatchedSummary {
        count: entries.len(),
        avg_imdb_rating: round_to(average(entries.iter().filter_map(|e| e.imdb_rating)), 1),
        avg_user_rating: round_to(average(entries.iter().map(|e| f64::from(e.user_rating))), 1),
        avg_runtime: round_to(average(
            entries
                .iter()
                .filter(|e| e.runtime_minutes > 0)
                .map(|e| f64::from(e.runtime_minutes)),
        ), 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, imdb_rating: Option<f64>, runtime: u32, user_rating: u8) -> WatchedEntry {
        WatchedEntry {
            imdb_id: id.to_string(),
            title: id.to_string(),
            poster: None,
            imdb_rating,
            runtime_minutes: runtime,
            user_rating,
            rating_decisions: 1,
        }
    }

    #[test]
    fn test_average_empty_is_zero() {
        assert_eq!(average(Vec::new()), 0.0);
    }

    #[test]
    fn test_empty_summary_is_all_zeros() {
        let summary = summarize(&[]);

        assert_eq!(summary, WatchedSummary::default());
        assert!(!summary.avg_imdb_rating.is_nan());
    }

    #[test]
    fn test_summary_rounding() {
        let entries = vec![
            entry("tt1375666", Some(8.8), 148, 10),
            entry("tt0088763", Some(8.5), 116, 9),
            entry("tt0000003", Some(7.0), 101, 8),
        ];

        let summary = summarize(&entries);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.avg_imdb_rating, 8.1); // 8.1 exactly
        assert_eq!(summary.avg_user_rating, 9.0);
        assert_eq!(summary.avg_runtime, 122.0); // 121.67
    }

    #[test]
    fn test_missing_critics_rating_is_skipped() {
        let entries = vec![entry("a", Some(6.0), 90, 4), entry("b", None, 100, 6)];

        let summary = summarize(&entries);
        assert_eq!(summary.avg_imdb_rating, 6.0);
        assert_eq!(summary.avg_user_rating, 5.0);
        assert_eq!(summary.avg_runtime, 95.0);
    }

    #[test]
    fn test_unknown_runtime_is_skipped() {
        let entries = vec![entry("a", Some(7.0), 0, 8), entry("b", Some(8.0), 120, 6)];

        let summary = summarize(&entries);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.avg_runtime, 120.0);
        assert_eq!(summary.avg_user_rating, 7.0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(7.25, 1), 7.3);
        assert_eq!(round_to(121.5, 0), 122.0);
        assert_eq!(round_to(0.0, 1), 0.0);
    }
}
