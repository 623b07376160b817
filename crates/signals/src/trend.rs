//! Per-sample trend flags.
//!
//! `trend[0]` is always [`Trend::Unknown`]. For `i > 0` the flag is `Unknown`
//! when either `v[i]` or `v[i - 1]` is absent, otherwise `Up` when
//! `v[i] >= v[i - 1]` and `Down` below that. Plateaus count as `Up`.

use divergence_core::Trend;
use rust_decimal::Decimal;

/// Trend of `current` relative to `previous`.
#[must_use]
pub fn trend_between(previous: Option<Decimal>, current: Option<Decimal>) -> Trend {
    match (previous, current) {
        (Some(previous), Some(current)) if current >= previous => Trend::Up,
        (Some(_), Some(_)) => Trend::Down,
        _ => Trend::Unknown,
    }
}

/// Trend flags for a series with possible gaps.
#[must_use]
pub fn classify_trends(values: &[Option<Decimal>]) -> Vec<Trend> {
    let mut trends = Vec::with_capacity(values.len());
    if values.is_empty() {
        return trends;
    }
    trends.push(Trend::Unknown);
    trends.extend(values.windows(2).map(|pair| trend_between(pair[0], pair[1])));
    trends
}

/// Trend flags for a dense series.
#[must_use]
pub fn classify_dense_trends(values: &[Decimal]) -> Vec<Trend> {
    let mut trends = Vec::with_capacity(values.len());
    if values.is_empty() {
        return trends;
    }
    trends.push(Trend::Unknown);
    trends.extend(
        values
            .windows(2)
            .map(|pair| trend_between(Some(pair[0]), Some(pair[1]))),
    );
    trends
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_first_sample_is_unknown() {
        assert_eq!(classify_dense_trends(&[dec!(5)]), vec![Trend::Unknown]);
        assert!(classify_dense_trends(&[]).is_empty());
        assert!(classify_trends(&[]).is_empty());
    }

    #[test]
    fn test_equality_counts_as_up() {
        let trends = classify_dense_trends(&[dec!(10), dec!(10), dec!(9), dec!(9.5)]);
        assert_eq!(
            trends,
            vec![Trend::Unknown, Trend::Up, Trend::Down, Trend::Up]
        );
    }

    #[test]
    fn test_gaps_are_unknown() {
        let values = vec![
            None,
            None,
            Some(dec!(50)),
            Some(dec!(49)),
            None,
            Some(dec!(51)),
            Some(dec!(52)),
        ];
        let trends = classify_trends(&values);
        assert_eq!(
            trends,
            vec![
                Trend::Unknown, // index 0
                Trend::Unknown, // both absent
                Trend::Unknown, // predecessor absent
                Trend::Down,
                Trend::Unknown, // current absent
                Trend::Unknown, // predecessor absent
                Trend::Up,
            ]
        );
    }

    #[test]
    fn test_all_absent_never_resolves() {
        let trends = classify_trends(&[None, None, None]);
        assert!(trends.iter().all(|t| *t == Trend::Unknown));
    }

    #[test]
    fn test_dense_and_sparse_agree() {
        let dense = vec![dec!(1), dec!(3), dec!(2), dec!(2)];
        let sparse: Vec<Option<Decimal>> = dense.iter().copied().map(Some).collect();
        assert_eq!(classify_dense_trends(&dense), classify_trends(&sparse));
    }
}
