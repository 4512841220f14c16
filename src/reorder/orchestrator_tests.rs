use super::*;
use crate::order::OrderError;
use crate::reorder::RequestItem;
use std::collections::BTreeSet;
use uuid::Uuid;

fn item(id: i64, order: Option<i32>) -> OrderableItem<i64, i32> {
    OrderableItem::new(id, order)
}

fn request(entries: &[(&str, f64)]) -> ReorderRequest {
    ReorderRequest::new(
        entries
            .iter()
            .map(|(id, order)| RequestItem::new(*id, *order))
            .collect(),
    )
}

fn overwriting() -> Reconciler {
    Reconciler::new(ReconcilerSettings {
        precedence: UserRequestPrecedence::Overwrite,
        ..ReconcilerSettings::default()
    })
}

fn mapping(result: &ReorderResult<i64, i32>) -> Vec<(i64, i32)> {
    result.orders.iter().map(|(id, order)| (*id, *order)).collect()
}

/// Final order of every item after applying `result` on top of `items`.
fn applied(items: &[OrderableItem<i64, i32>], result: &ReorderResult<i64, i32>) -> Vec<(i64, Option<i32>)> {
    items
        .iter()
        .map(|item| (item.id, result.get(&item.id).or(item.order)))
        .collect()
}

fn assert_unique(items: &[OrderableItem<i64, i32>], result: &ReorderResult<i64, i32>) {
    let finals = applied(items, result);
    let values: Vec<i32> = finals.iter().filter_map(|(_, order)| *order).collect();
    let distinct: BTreeSet<i32> = values.iter().copied().collect();
    assert_eq!(values.len(), distinct.len(), "duplicate order values in {finals:?}");
    assert_eq!(values.len(), items.len(), "unordered items left in {finals:?}");
}

#[test]
fn test_all_unordered_without_request_numbers_by_id() {
    let items = vec![item(3, None), item(1, None), item(2, None)];
    let result = Reconciler::default().reorder(&items, &ReorderRequest::default()).unwrap();
    assert_eq!(mapping(&result), vec![(1, 1), (2, 2), (3, 3)]);
    assert_eq!(result.initialized.len(), 3);
    assert!(result.requested.is_empty());
}

#[test]
fn test_duplicate_request_values_are_separated() {
    let items = vec![item(1, Some(5)), item(2, Some(5))];
    let result = Reconciler::default()
        .reorder(&items, &request(&[("1", 5.0), ("2", 5.0)]))
        .unwrap();
    assert_eq!(mapping(&result), vec![(1, 5), (2, 6)]);
    assert_eq!(result.adjusted.iter().copied().collect::<Vec<_>>(), vec![2]);
}

#[test]
fn test_unordered_item_fills_gap() {
    let items = vec![item(1, Some(1)), item(2, Some(5)), item(3, None)];
    let result = Reconciler::default().reorder(&items, &ReorderRequest::default()).unwrap();
    assert_eq!(mapping(&result), vec![(3, 2)]);
}

#[test]
fn test_request_conflicting_with_untouched_item_is_moved() {
    let items = vec![item(7, Some(1)), item(8, Some(3)), item(9, Some(10))];
    let result = Reconciler::default()
        .reorder(&items, &request(&[("7", 3.0)]))
        .unwrap();
    assert_eq!(mapping(&result), vec![(7, 4)]);
    assert!(result.adjusted.contains(&7));
    assert_eq!(result.get(&8), None);
}

#[test]
fn test_requested_item_may_take_its_own_old_value_back() {
    let items = vec![item(1, Some(1)), item(2, Some(2))];
    let result = Reconciler::default()
        .reorder(&items, &request(&[("2", 2.0)]))
        .unwrap();
    assert_eq!(mapping(&result), vec![(2, 2)]);
    assert!(result.adjusted.is_empty());
}

#[test]
fn test_swap_two_items() {
    let items = vec![item(1, Some(1)), item(2, Some(2)), item(3, Some(3))];
    let result = Reconciler::default()
        .reorder(&items, &request(&[("1", 2.0), ("2", 1.0)]))
        .unwrap();
    assert_eq!(mapping(&result), vec![(1, 2), (2, 1)]);
    assert_unique(&items, &result);
}

#[test]
fn test_mixed_collection_ends_unique_and_covered() {
    let items = vec![
        item(1, Some(1)),
        item(2, Some(1)),
        item(3, None),
        item(4, Some(4)),
        item(5, None),
        item(6, Some(10)),
        item(7, None),
    ];
    let result = Reconciler::default()
        .reorder(&items, &request(&[("5", 1.0), ("3", 1.0), ("6", 4.0)]))
        .unwrap();
    assert_unique(&items, &result);

    // coverage: every requested and every unordered item is in the mapping
    for id in [3, 5, 6, 7] {
        assert!(result.get(&id).is_some(), "missing {id}");
    }
    // stability: untouched item 4 and the first holder of 1 keep their values
    assert_eq!(result.get(&4), None);
    assert_eq!(result.get(&1), None);
    assert!(result.repaired.contains(&2));
}

#[test]
fn test_reorder_is_deterministic() {
    let items = vec![
        item(10, None),
        item(4, Some(2)),
        item(7, Some(2)),
        item(1, None),
        item(3, Some(9)),
    ];
    let req = request(&[("7", 9.0), ("10", 9.0), ("1", 2.0)]);
    let first = Reconciler::default().reorder(&items, &req).unwrap();
    let mut shuffled = items.clone();
    shuffled.reverse();
    let mut reversed_request = req.clone();
    reversed_request.items.reverse();
    let second = Reconciler::default().reorder(&shuffled, &reversed_request).unwrap();
    assert_eq!(first, second);
    assert_unique(&items, &first);
}

#[test]
fn test_untouched_items_with_unique_values_are_not_in_result() {
    let items = vec![item(1, Some(1)), item(2, Some(2)), item(3, Some(3))];
    let result = Reconciler::default().reorder(&items, &ReorderRequest::default()).unwrap();
    assert!(result.is_empty());
}

#[test]
fn test_unknown_request_id_is_rejected() {
    let items = vec![item(1, Some(1))];
    let err = Reconciler::default()
        .reorder(&items, &request(&[("99", 1.0)]))
        .unwrap_err();
    assert_eq!(err, ReconcileError::UnknownItem("99".to_string()));
}

#[test]
fn test_unconvertible_request_id_is_rejected() {
    let items = vec![item(1, Some(1))];
    let err = Reconciler::default()
        .reorder(&items, &request(&[("first", 1.0)]))
        .unwrap_err();
    assert_eq!(
        err,
        ReconcileError::Order(OrderError::conversion("first", "i64"))
    );
}

#[test]
fn test_unrepresentable_desired_order_is_rejected() {
    let items = vec![item(1, Some(1))];
    let err = Reconciler::default()
        .reorder(&items, &request(&[("1", 1e12)]))
        .unwrap_err();
    assert!(matches!(
        err,
        ReconcileError::Order(OrderError::InvalidOrderValue { .. })
    ));
}

#[test]
fn test_repeated_request_id_keeps_last_entry() {
    let items = vec![item(1, Some(1)), item(2, Some(2))];
    let result = Reconciler::default()
        .reorder(&items, &request(&[("1", 5.0), ("1", 7.0)]))
        .unwrap();
    assert_eq!(mapping(&result), vec![(1, 7)]);
}

#[test]
fn test_desired_order_is_rounded_for_integer_collections() {
    let items = vec![item(1, None)];
    let result = Reconciler::default()
        .reorder(&items, &request(&[("1", 2.5)]))
        .unwrap();
    assert_eq!(mapping(&result), vec![(1, 2)]);
}

#[test]
fn test_zero_counts_as_unset_when_configured() {
    let items = vec![item(1, Some(0)), item(2, Some(0)), item(3, Some(0))];
    let zero_unset = Reconciler::new(ReconcilerSettings {
        treat_zero_as_unset: true,
        ..ReconcilerSettings::default()
    });
    let result = zero_unset.reorder(&items, &ReorderRequest::default()).unwrap();
    assert_eq!(mapping(&result), vec![(1, 1), (2, 2), (3, 3)]);

    // by default zero is an ordinary (shared) value and gets repaired instead
    let result = Reconciler::default().reorder(&items, &ReorderRequest::default()).unwrap();
    assert_eq!(mapping(&result), vec![(2, 1), (3, 2)]);
}

#[test]
fn test_overwrite_writes_requested_value_verbatim() {
    let items = vec![item(7, Some(1)), item(8, Some(3))];
    let result = overwriting().reorder(&items, &request(&[("7", 3.0)])).unwrap();
    assert_eq!(mapping(&result), vec![(7, 3)]);
    assert!(result.adjusted.is_empty());
    // item 8 keeps 3 as well: overwrite does not avoid conflicts
    assert_eq!(result.get(&8), None);
}

#[test]
fn test_overwrite_initializes_unordered_before_request() {
    let items = vec![item(1, Some(1)), item(2, None), item(3, None)];
    let result = overwriting()
        .reorder(&items, &request(&[("3", 2.0)]))
        .unwrap();
    // item 2 is initialized after the current maximum, ignoring the request
    assert_eq!(mapping(&result), vec![(2, 2), (3, 2)]);
    assert_eq!(result.initialized.iter().copied().collect::<Vec<_>>(), vec![2]);
}

#[test]
fn test_overwrite_still_separates_duplicates_inside_request() {
    let items = vec![item(1, None), item(2, None)];
    let result = overwriting()
        .reorder(&items, &request(&[("2", 4.0), ("1", 4.0)]))
        .unwrap();
    assert_eq!(mapping(&result), vec![(1, 4), (2, 5)]);
}

#[test]
fn test_conflict_avoid_differs_from_overwrite_on_collision() {
    let items = vec![item(1, Some(1)), item(2, Some(2))];
    let req = request(&[("1", 2.0)]);
    let avoided = Reconciler::default().reorder(&items, &req).unwrap();
    let overwritten = overwriting().reorder(&items, &req).unwrap();
    assert_eq!(mapping(&avoided), vec![(1, 3)]);
    assert_eq!(mapping(&overwritten), vec![(1, 2)]);
}

#[test]
fn test_float_collection_keeps_fractional_positions() {
    let items: Vec<OrderableItem<i64, f64>> = vec![
        OrderableItem::new(1, Some(1.0)),
        OrderableItem::new(2, Some(2.0)),
        OrderableItem::new(3, None),
    ];
    let result = Reconciler::default()
        .reorder(&items, &request(&[("2", 1.5)]))
        .unwrap();
    let moved = result.get(&2).unwrap();
    assert!((moved - 1.5).abs() < f64::EPSILON);
    let appended = result.get(&3).unwrap();
    assert!((appended - 2.5).abs() < f64::EPSILON);
}

#[test]
fn test_uuid_ids() {
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();
    let items: Vec<OrderableItem<Uuid, i64>> =
        vec![OrderableItem::new(first, None), OrderableItem::new(second, None)];
    let result = Reconciler::default()
        .reorder(&items, &request(&[(first.to_string().as_str(), 3.0)]))
        .unwrap();
    assert_eq!(result.get(&first), Some(3));
    assert_eq!(result.get(&second), Some(4));
}

#[test]
fn test_negative_zero_request_collides_with_zero() {
    let items = vec![
        OrderableItem::new(1_i64, Some(0.0_f64)),
        OrderableItem::new(2, Some(5.0)),
    ];
    let result = Reconciler::default()
        .reorder(&items, &request(&[("2", -0.0)]))
        .unwrap();

    let moved = result.get(&2).unwrap();
    assert_eq!(moved.order_cmp(&0.0), std::cmp::Ordering::Greater);
    assert!((moved - 1.0).abs() < f64::EPSILON);
    assert!(result.adjusted.contains(&2));
    assert_eq!(result.get(&1), None);
}

#[test]
fn test_negative_zero_counts_as_unset() {
    let items = vec![
        OrderableItem::new(1_i64, Some(-0.0_f64)),
        OrderableItem::new(2, Some(0.0)),
    ];
    let reconciler = Reconciler::new(ReconcilerSettings {
        treat_zero_as_unset: true,
        ..ReconcilerSettings::default()
    });
    let result = reconciler.reorder(&items, &ReorderRequest::default()).unwrap();

    assert_eq!(result.get(&1), Some(1.0));
    assert_eq!(result.get(&2), Some(2.0));
    assert_eq!(result.initialized.len(), 2);
}
