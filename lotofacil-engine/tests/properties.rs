use lotofacil_db::models::DrawHistory;
use lotofacil_engine::frequency::FrequencyTable;
use lotofacil_engine::spatial::{self, band_of, BAND_COUNT};
use lotofacil_engine::ranking::{rank_by, Order};
use lotofacil_engine::scoring::FactorScore;
use lotofacil_engine::{parity, streak, MultifactorialScorer, ScorerConfig, StrategySelector};
use proptest::prelude::*;

fn draw_numbers() -> impl Strategy<Value = Vec<u8>> {
    proptest::sample::subsequence((1u8..=25).collect::<Vec<_>>(), 15)
}

fn history(min: usize, max: usize) -> impl Strategy<Value = DrawHistory> {
    proptest::collection::vec(draw_numbers(), min..max)
        .prop_map(|rows| DrawHistory::from_numbers(rows).expect("generated draws are valid"))
}

proptest! {
    /// Every strategy returns 15 distinct numbers in [1, 25].
    #[test]
    fn prop_every_game_is_valid(history in history(2, 80)) {
        let selector = StrategySelector::new(ScorerConfig::default()).unwrap();
        for report in selector.run_all(&history).unwrap() {
            let numbers = report.game.numbers();
            prop_assert_eq!(numbers.len(), 15);
            prop_assert!(numbers.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(numbers.iter().all(|&n| (1..=25).contains(&n)));
        }
    }

    /// Counts over a window of W draws sum to 15 * W.
    #[test]
    fn prop_window_counts_sum(history in history(1, 60), a in 0usize..70, b in 0usize..70) {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        let table = FrequencyTable::new(&history);
        let width = end.min(history.len()).saturating_sub(start.min(history.len()));
        let total: u32 = (1u8..=25)
            .map(|n| table.count(n, Some(start), Some(end)).unwrap())
            .sum();
        prop_assert_eq!(total as usize, 15 * width);
        prop_assert_eq!(table.counts_in(start, end).iter().sum::<u32>() as usize, 15 * width);
    }

    /// Presence runs plus absence runs cover the whole history.
    #[test]
    fn prop_runs_cover_history(history in history(2, 60)) {
        for stat in streak::analyze(&history).unwrap() {
            let covered: u32 = stat.presence_runs.iter().sum::<u32>() + stat.absence_runs.iter().sum::<u32>();
            prop_assert_eq!(covered as usize, history.len());
            prop_assert!(stat.current_length >= 1);
        }
    }

    /// The balanced game reproduces the modal even/odd split.
    #[test]
    fn prop_parity_matches_mode(history in history(1, 60)) {
        let profile = parity::profile(&history).unwrap();
        let target = profile.mode().unwrap();
        let counts = FrequencyTable::new(&history).counts();
        let game = parity::select_balanced(target, &counts).unwrap();
        prop_assert_eq!(game.even_count(), target.even);
        prop_assert_eq!(15 - game.even_count(), target.odd);
    }

    /// Band targets sum to 15 and the spatial game follows them.
    #[test]
    fn prop_band_targets_respected(history in history(1, 60)) {
        let profile = spatial::profile(&history).unwrap();
        prop_assert_eq!(profile.targets.iter().sum::<usize>(), 15);
        let counts = FrequencyTable::new(&history).counts();
        let game = spatial::select_by_band(&profile.targets, &counts).unwrap();
        for band in 0..BAND_COUNT {
            let in_band = game.numbers().iter().filter(|&&n| band_of(n) == band).count();
            prop_assert_eq!(in_band, profile.targets[band]);
            prop_assert!((profile.targets[band] as f64 - profile.averages[band]).abs() < 1.0);
        }
    }

    /// Same history and configuration: same game and same scores.
    #[test]
    fn prop_scorer_deterministic(history in history(2, 60), hot in 0.0f64..0.5) {
        let rest = (1.0 - hot) / 3.0;
        let config = ScorerConfig {
            frequency_weight: rest,
            trend_weight: rest,
            pattern_weight: 1.0 - hot - 2.0 * rest,
            hot_weight: hot,
            ..ScorerConfig::default()
        };
        let scorer = MultifactorialScorer::new(config).unwrap();
        let (game_a, scores_a) = scorer.select(&history).unwrap();
        let (game_b, scores_b) = scorer.select(&history).unwrap();
        prop_assert_eq!(game_a, game_b);
        for (a, b) in scores_a.iter().zip(&scores_b) {
            prop_assert_eq!(a.score.to_bits(), b.score.to_bits());
        }
    }

    /// Moving only hot_weight (other weights keep their proportions) can only
    /// swap two numbers when their recent-window order disagrees with their
    /// order under the lower hot weight; the swap goes the recent-window way.
    #[test]
    fn prop_hot_weight_only_reorders_by_recent_counts(history in history(2, 60)) {
        let low = MultifactorialScorer::new(hot_config(0.0)).unwrap().score(&history).unwrap();
        let high = MultifactorialScorer::new(hot_config(0.5)).unwrap().score(&history).unwrap();
        let rank_low = positions(&low);
        let rank_high = positions(&high);

        for x in 1u8..=25 {
            for y in 1u8..=25 {
                let (xi, yi) = ((x - 1) as usize, (y - 1) as usize);
                let swapped = rank_low[xi] < rank_low[yi] && rank_high[yi] < rank_high[xi];
                let clear = (low[xi].score - low[yi].score).abs() > 1e-9
                    || (high[xi].score - high[yi].score).abs() > 1e-9;
                if swapped && clear {
                    prop_assert!(
                        low[yi].hot_count > low[xi].hot_count,
                        "{} passou {} sem estar à frente nos últimos {} sorteios",
                        y, x, ScorerConfig::default().hot_window
                    );
                }
            }
        }
    }
}

/// Defaults without the hot signal are 0.25/0.30/0.25 (sum 0.8); those
/// proportions are kept and scaled to `1 - hot`. Both configs used here have
/// exactly representable weights.
fn hot_config(hot: f64) -> ScorerConfig {
    let rest = 1.0 - hot;
    ScorerConfig {
        frequency_weight: 0.3125 * rest,
        trend_weight: 0.375 * rest,
        pattern_weight: 0.3125 * rest,
        hot_weight: hot,
        ..ScorerConfig::default()
    }
}

fn positions(scores: &[FactorScore]) -> Vec<usize> {
    let order = rank_by(1u8..=25, |n| scores[(n - 1) as usize].score, Order::Descending);
    let mut rank = vec![0usize; 25];
    for (pos, n) in order.into_iter().enumerate() {
        rank[(n - 1) as usize] = pos;
    }
    rank
}
