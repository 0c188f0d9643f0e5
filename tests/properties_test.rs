//! Property tests for month ranges and inflation compounding

use proptest::prelude::*;
use purchasing_power::prelude::*;

fn month_key() -> impl Strategy<Value = MonthKey> {
    (1990i32..2060, 1u32..=12).prop_map(|(year, month)| MonthKey::new(year, month).unwrap())
}

fn inflation_entries() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..0.05, 1..60)
}

proptest! {
    #[test]
    fn range_length_matches_formula(start in month_key(), end in month_key()) {
        let months = months_between(start, end);
        if start <= end {
            let expected = (end.year() - start.year()) as i64 * 12
                + (end.month() as i64 - start.month() as i64)
                + 1;
            prop_assert_eq!(months.len() as i64, expected);
            prop_assert_eq!(months.first().copied(), Some(start));
            prop_assert_eq!(months.last().copied(), Some(end));
        } else {
            prop_assert!(months.is_empty());
        }
        prop_assert_eq!(months.len(), month_count(start, end));
    }

    #[test]
    fn range_strictly_increasing_without_gaps(start in month_key(), span in 0usize..120) {
        let mut end = start;
        for _ in 0..span {
            end = end.succ();
        }
        let months = months_between(start, end);
        prop_assert_eq!(months.len(), span + 1);
        for pair in months.windows(2) {
            prop_assert!(pair[0] < pair[1]);
            prop_assert_eq!(pair[0].succ(), pair[1]);
        }
    }

    #[test]
    fn month_key_text_round_trips(key in month_key()) {
        let text = key.to_string();
        prop_assert_eq!(text.len(), 7);
        prop_assert_eq!(text.parse::<MonthKey>().unwrap(), key);
    }

    #[test]
    fn series_length_and_monotonic_factor(
        start in month_key(),
        rates in inflation_entries(),
        principal in 0.0f64..1.0e9,
        usd in any::<bool>(),
    ) {
        let mut inflation = InflationTable::new();
        let mut month = start;
        for rate in &rates {
            inflation.add_rate(month, *rate).unwrap();
            month = month.succ();
        }
        let end = months_between(start, month).into_iter().nth(rates.len() - 1).unwrap();
        let basis = if usd { CurrencyBasis::Usd } else { CurrencyBasis::Pyg };

        let series = compute_series(principal, basis, start, end, &RateTable::new(), &inflation).unwrap();

        prop_assert_eq!(series.len(), month_count(start, end));
        prop_assert_eq!(series[0].cumulative_inflation_factor, 1.0);
        for pair in series.windows(2) {
            prop_assert!(pair[1].cumulative_inflation_factor >= pair[0].cumulative_inflation_factor);
        }
        for snapshot in &series {
            prop_assert!(snapshot.real_local <= snapshot.nominal_local);
        }

        let kpis = aggregate(&series).unwrap();
        prop_assert!(kpis.loss >= 0.0);
    }
}
