use std::collections::BTreeSet;

use kgtk_compact::{compact, CompactOptions, GroupAccumulator, GroupingMode};
use kgtk_io::{FileMode, Header, MemorySink, MemorySource};
use proptest::prelude::*;

fn value() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "[a-d]{1,2}"]
}

fn group_rows() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(prop::collection::vec(value(), 2), 1..8).prop_map(|cells| {
        cells
            .into_iter()
            .map(|mut row| {
                row.insert(0, "k".to_string());
                row
            })
            .collect()
    })
}

fn compact_group(rows: &[Vec<String>]) -> Vec<String> {
    let mut acc = GroupAccumulator::new("|");
    for row in rows {
        assert_eq!(acc.push("k", row.clone()), None);
    }
    acc.flush().expect("open group")
}

proptest! {
    #[test]
    fn merged_row_ignores_arrival_order(
        (rows, shuffled) in group_rows().prop_flat_map(|rows| {
            let shuffled = Just(rows.clone()).prop_shuffle();
            (Just(rows), shuffled)
        })
    ) {
        prop_assume!(rows.len() > 1);
        prop_assert_eq!(compact_group(&rows), compact_group(&shuffled));
    }

    #[test]
    fn merged_cells_hold_sorted_distinct_non_empty_values(rows in group_rows()) {
        prop_assume!(rows.len() > 1);
        let merged = compact_group(&rows);
        for col in 1..3 {
            let expected: BTreeSet<&str> = rows
                .iter()
                .map(|row| row[col].as_str())
                .filter(|v| !v.is_empty())
                .collect();
            let expected = expected.into_iter().collect::<Vec<_>>().join("|");
            prop_assert_eq!(&merged[col], &expected);
        }
    }

    #[test]
    fn buffered_output_is_independent_of_input_order(
        (rows, shuffled) in prop::collection::vec(
            (prop_oneof![Just("a"), Just("b"), Just("c")], value()),
            0..16,
        )
        .prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(id, v)| vec![id.to_string(), v])
                .collect::<Vec<_>>()
        })
        .prop_flat_map(|rows| {
            let shuffled = Just(rows.clone()).prop_shuffle();
            (Just(rows), shuffled)
        })
    ) {
        let run = |input: Vec<Vec<String>>| {
            let header =
                Header::new(vec!["id".to_string(), "v".to_string()], FileMode::Auto).unwrap();
            let mut sink = MemorySink::new();
            let options = CompactOptions {
                mode: GroupingMode::Buffered,
                ..CompactOptions::default()
            };
            compact(MemorySource::new(header, input), &mut sink, options).unwrap();
            sink.into_rows()
        };
        prop_assert_eq!(run(rows), run(shuffled));
    }
}
