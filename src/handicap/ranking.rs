use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};
use icu_locid::Locale;
use log::warn;

use super::types::{RankMode, RankedResult, ScoreCard};

fn primary_key(card: &ScoreCard, mode: RankMode) -> Option<f64> {
    match mode {
        RankMode::Net => card.net,
        RankMode::Gross => card.gross.map(f64::from),
    }
    .filter(|v| v.is_finite())
}

fn secondary_key(card: &ScoreCard, mode: RankMode) -> Option<f64> {
    match mode {
        RankMode::Net => primary_key(card, RankMode::Gross),
        RankMode::Gross => primary_key(card, RankMode::Net),
    }
}

/// Ascending, missing values last.
fn compare_keys(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        // -0.0 and 0.0 tie
        (Some(a), Some(b)) => (a + 0.0).total_cmp(&(b + 0.0)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Collator for the `tag` locale, or `None` (plain code-point order) when it cannot be built.
fn name_collator(tag: &str) -> Option<Collator> {
    let locale: Locale = match tag.parse() {
        Ok(locale) => locale,
        Err(e) => {
            warn!("Unknown collation locale '{}' ({}), ordering names by code point", tag, e);
            return None;
        }
    };
    match Collator::try_new(&locale.into(), CollatorOptions::new()) {
        Ok(collator) => Some(collator),
        Err(e) => {
            warn!("No collation data ({}), ordering names by code point", e);
            None
        }
    }
}

/// Orders a field and assigns standard competition ranks ("1, 1, 3").
///
/// Ties on the ranking key are broken by the other key, then by player name
/// collated for `locale`; only the ranking key decides whether two lines
/// share a rank.
pub fn rank_results(cards: Vec<ScoreCard>, mode: RankMode, locale: &str) -> Vec<RankedResult> {
    let collator = name_collator(locale);
    let mut sorted = cards;
    sorted.sort_by(|a, b| {
        compare_keys(primary_key(a, mode), primary_key(b, mode))
            .then_with(|| compare_keys(secondary_key(a, mode), secondary_key(b, mode)))
            .then_with(|| match &collator {
                Some(collator) => collator.compare(&a.name, &b.name),
                None => a.name.cmp(&b.name),
            })
    });

    let mut ranked: Vec<RankedResult> = Vec::with_capacity(sorted.len());
    for (idx, card) in sorted.into_iter().enumerate() {
        let rank = match ranked.last() {
            Some(prev)
                if compare_keys(primary_key(&prev.card, mode), primary_key(&card, mode))
                    == Ordering::Equal =>
            {
                prev.rank
            }
            _ => idx + 1,
        };
        ranked.push(RankedResult { rank, card });
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOCALE: &str = "ja";

    fn card(player_id: i64, name: &str, gross: Option<i32>, net: Option<f64>) -> ScoreCard {
        ScoreCard {
            player_id,
            name: name.to_string(),
            category: Some("M".to_string()),
            handicap: None,
            out_score: None,
            in_score: None,
            gross,
            net,
        }
    }

    fn ranks(results: &[RankedResult]) -> Vec<(String, usize)> {
        results.iter().map(|r| (r.card.name.clone(), r.rank)).collect()
    }

    fn pairs(expected: &[(&str, usize)]) -> Vec<(String, usize)> {
        expected.iter().map(|(n, r)| (n.to_string(), *r)).collect()
    }

    #[test]
    fn test_ties_share_rank_with_gap() {
        let cards = vec![
            card(3, "C", Some(80), Some(72.0)),
            card(2, "B", Some(80), Some(70.0)),
            card(1, "A", Some(80), Some(70.0)),
        ];
        let ranked = rank_results(cards, RankMode::Net, LOCALE);
        assert_eq!(ranks(&ranked), pairs(&[("A", 1), ("B", 1), ("C", 3)]));
    }

    #[test]
    fn test_three_way_tie_is_followed_by_rank_four() {
        let cards = vec![
            card(1, "Dan", Some(90), Some(75.0)),
            card(2, "Amy", Some(88), Some(70.0)),
            card(3, "Bob", Some(88), Some(70.0)),
            card(4, "Cal", Some(88), Some(70.0)),
        ];
        let ranked = rank_results(cards, RankMode::Net, LOCALE);
        let assigned: Vec<usize> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(assigned, vec![1, 1, 1, 4]);
    }

    #[test]
    fn test_net_tie_broken_by_gross_but_rank_shared() {
        let cards = vec![
            card(1, "Ann", Some(95), Some(76.5)),
            card(2, "Ben", Some(85), Some(76.5)),
        ];
        let ranked = rank_results(cards, RankMode::Net, LOCALE);
        assert_eq!(ranks(&ranked), pairs(&[("Ben", 1), ("Ann", 1)]));
    }

    #[test]
    fn test_gross_mode_breaks_ties_by_net() {
        let cards = vec![
            card(1, "Ann", Some(85), Some(80.0)),
            card(2, "Ben", Some(85), Some(74.2)),
            card(3, "Cid", Some(83), Some(83.0)),
        ];
        let ranked = rank_results(cards, RankMode::Gross, LOCALE);
        assert_eq!(ranks(&ranked), pairs(&[("Cid", 1), ("Ben", 2), ("Ann", 2)]));
    }

    #[test]
    fn test_name_tiebreak_uses_collation() {
        let cards = vec![
            card(1, "Zoë", Some(80), Some(70.0)),
            card(2, "Émile", Some(80), Some(70.0)),
            card(3, "adam", Some(80), Some(70.0)),
            card(4, "Eve", Some(80), Some(70.0)),
        ];
        let ranked = rank_results(cards, RankMode::Net, LOCALE);
        let names: Vec<&str> = ranked.iter().map(|r| r.card.name.as_str()).collect();
        assert_eq!(names, vec!["adam", "Émile", "Eve", "Zoë"]);
        assert!(ranked.iter().all(|r| r.rank == 1));
    }

    #[test]
    fn test_japanese_names_follow_reading_order() {
        let field = || {
            vec![
                card(1, "伊藤", Some(80), Some(70.0)),
                card(2, "阿部", Some(80), Some(70.0)),
            ]
        };
        let names = |ranked: Vec<RankedResult>| -> Vec<String> {
            ranked.into_iter().map(|r| r.card.name).collect()
        };

        assert_eq!(names(rank_results(field(), RankMode::Net, "ja")), vec!["阿部", "伊藤"]);
        // Root collation orders unified ideographs by code point.
        assert_eq!(names(rank_results(field(), RankMode::Net, "und")), vec!["伊藤", "阿部"]);
    }

    #[test]
    fn test_unparsable_locale_falls_back_to_code_points() {
        let cards = vec![
            card(1, "b", Some(80), Some(70.0)),
            card(2, "a", Some(80), Some(70.0)),
        ];
        let ranked = rank_results(cards, RankMode::Net, "not a locale!");
        assert_eq!(ranks(&ranked), pairs(&[("a", 1), ("b", 1)]));
    }

    #[test]
    fn test_negative_zero_net_shares_rank() {
        let cards = vec![
            card(1, "Ann", Some(72), Some(-0.0)),
            card(2, "Ben", Some(72), Some(0.0)),
            card(3, "Cid", Some(73), Some(1.0)),
        ];
        let ranked = rank_results(cards, RankMode::Net, LOCALE);
        assert_eq!(ranks(&ranked), pairs(&[("Ann", 1), ("Ben", 1), ("Cid", 3)]));
    }

    #[test]
    fn test_missing_scores_sort_last() {
        let cards = vec![
            card(1, "Ann", None, None),
            card(2, "Ben", Some(90), Some(80.0)),
            card(3, "Cid", None, None),
        ];
        let ranked = rank_results(cards, RankMode::Net, LOCALE);
        assert_eq!(ranks(&ranked), pairs(&[("Ben", 1), ("Ann", 2), ("Cid", 2)]));
    }

    #[test]
    fn test_ranking_is_idempotent() {
        let cards = vec![
            card(1, "Ann", Some(95), Some(76.5)),
            card(2, "Ben", Some(85), Some(76.5)),
            card(3, "Cid", Some(83), Some(70.1)),
            card(4, "Dee", Some(101), Some(88.0)),
        ];
        let first = rank_results(cards.clone(), RankMode::Net, LOCALE);
        let second = rank_results(cards, RankMode::Net, LOCALE);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_empty_field() {
        assert!(rank_results(Vec::new(), RankMode::Gross, LOCALE).is_empty());
    }
}
