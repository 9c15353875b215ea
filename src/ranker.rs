//! Ranking and top-N selection

use crate::types::AggregateRow;

/// Ranker for ordering aggregate rows by metric total
pub struct Ranker;

impl Ranker {
    /// Sort rows descending by total.
    ///
    /// The sort is stable, so ties keep the order the aggregator emitted
    /// them in (first-encounter order of the group); the source data
    /// offers no secondary tie-break criterion.
    pub fn rank(mut rows: Vec<AggregateRow>) -> Vec<AggregateRow> {
        rows.sort_by(|a, b| b.total.total_cmp(&a.total));
        rows
    }

    /// Take the first `n` rows of a ranked sequence.
    ///
    /// Returns all rows when `n` exceeds the row count.
    pub fn top(mut rows: Vec<AggregateRow>, n: usize) -> Vec<AggregateRow> {
        rows.truncate(n);
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_rows(pairs: &[(&str, f64)]) -> Vec<AggregateRow> {
        pairs
            .iter()
            .map(|(event_type, total)| AggregateRow {
                event_type: event_type.to_string(),
                total: *total,
            })
            .collect()
    }

    #[test]
    fn test_rank_sorts_descending() {
        let rows = make_rows(&[("HAIL", 2.0), ("TORNADO", 10.0), ("FLOOD", 5.0)]);
        let ranked = Ranker::rank(rows);

        let order: Vec<&str> = ranked.iter().map(|r| r.event_type.as_str()).collect();
        assert_eq!(order, vec!["TORNADO", "FLOOD", "HAIL"]);

        for pair in ranked.windows(2) {
            assert!(pair[0].total >= pair[1].total);
        }
    }

    #[test]
    fn test_ties_keep_first_encounter_order() {
        let rows = make_rows(&[("HAIL", 3.0), ("FLOOD", 3.0), ("TORNADO", 3.0)]);
        let ranked = Ranker::rank(rows);

        let order: Vec<&str> = ranked.iter().map(|r| r.event_type.as_str()).collect();
        assert_eq!(order, vec!["HAIL", "FLOOD", "TORNADO"]);
    }

    #[test]
    fn test_top_truncates_to_n() {
        let rows = make_rows(&[("TORNADO", 10.0), ("FLOOD", 5.0), ("HAIL", 2.0)]);
        let top = Ranker::top(rows, 2);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].event_type, "TORNADO");
        assert_eq!(top[1].event_type, "FLOOD");
    }

    #[test]
    fn test_top_is_a_prefix_of_the_ranking() {
        let ranked = Ranker::rank(make_rows(&[
            ("TORNADO", 10.0),
            ("FLOOD", 5.0),
            ("HAIL", 2.0),
        ]));
        let top = Ranker::top(ranked.clone(), 2);

        assert_eq!(top[..], ranked[..2]);
    }

    #[test]
    fn test_top_beyond_length_returns_all() {
        let rows = make_rows(&[("TORNADO", 10.0), ("FLOOD", 5.0)]);
        let top = Ranker::top(rows, 10);

        assert_eq!(top.len(), 2);
    }

    #[test]
    fn test_empty_rows() {
        assert!(Ranker::rank(Vec::new()).is_empty());
        assert!(Ranker::top(Vec::new(), 5).is_empty());
    }
}
