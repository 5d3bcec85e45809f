use std::collections::HashSet;

use proptest::prelude::*;
use sku_tally::{aggregate::aggregate_text, source::Cell, aggregate};

#[test]
fn order_export_is_counted_per_sku() {
    let summary = aggregate_text(["A1", "A1", "B2"]);
    assert_eq!(summary.as_pairs(), vec![("A1", 2), ("B2", 1)]);
}

#[test]
fn blank_identifiers_are_kept() {
    let summary = aggregate_text(["", "", "X"]);
    assert_eq!(summary.as_pairs(), vec![("", 2), ("X", 1)]);
}

#[test]
fn no_rows_no_summary() {
    let summary = aggregate(&Vec::<Cell>::new());
    assert!(summary.is_empty());
}

#[test]
fn mixed_cell_types_group_by_text() {
    let cells = vec![
        Cell::Integer(12345),
        Cell::from("12345"),
        Cell::Float(12345.0),
        Cell::from("AB-12"),
        Cell::Empty,
    ];
    let summary = aggregate(&cells);
    assert_eq!(summary.as_pairs(), vec![("12345", 3), ("", 1), ("AB-12", 1)]);
}

fn sku_values() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[A-C]{0,2}", 0..60)
}

proptest! {
    #[test]
    fn counts_sum_to_row_count(values in sku_values()) {
        let summary = aggregate_text(&values);
        prop_assert_eq!(summary.total(), values.len());
    }

    #[test]
    fn each_identifier_appears_once(values in sku_values()) {
        let summary = aggregate_text(&values);
        let distinct = values.iter().collect::<HashSet<_>>();
        prop_assert_eq!(summary.len(), distinct.len());
        let listed = summary.iter().map(|row| &row.sku).collect::<HashSet<_>>();
        prop_assert_eq!(listed.len(), summary.len());
        prop_assert!(summary.iter().all(|row| row.total_sold_count >= 1));
    }

    #[test]
    fn ordered_by_count_then_identifier(values in sku_values()) {
        let summary = aggregate_text(&values);
        for pair in summary.rows().windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(
                a.total_sold_count > b.total_sold_count
                    || (a.total_sold_count == b.total_sold_count && a.sku < b.sku)
            );
        }
    }

    #[test]
    fn row_order_does_not_change_summary(values in sku_values()) {
        let mut reversed = values.clone();
        reversed.reverse();
        prop_assert_eq!(aggregate_text(&values), aggregate_text(&reversed));
    }
}
