#![allow(clippy::indexing_slicing, clippy::float_cmp)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use common::{collection_path, create_collection, create_test_dir, request};
use order_reconciler::store::read_header;
use order_reconciler::{
    FileRepository, OrderRepository, OrderableItem, ReconcilerSettings, RepositoryError,
    ServiceError, UserRequestPrecedence,
};
use std::collections::BTreeSet;
use uuid::Uuid;

#[tokio::test]
async fn test_swap_and_initialize_persists_to_file() {
    let temp_dir = create_test_dir();
    let service = create_collection(
        temp_dir.path(),
        "menu",
        vec![
            OrderableItem::new(1_i64, Some(1_i32)),
            OrderableItem::new(2, Some(2)),
            OrderableItem::new(3, Some(3)),
            OrderableItem::new(4, None),
            OrderableItem::new(5, None),
        ],
        ReconcilerSettings::default(),
    )
    .await;
    let mut events = service.events().subscribe();

    let result = service
        .reorder(&request(&[("1", 2.0), ("2", 1.0)]))
        .await
        .expect("Reorder should succeed");
    assert_eq!(result.get(&1), Some(2));
    assert_eq!(result.get(&2), Some(1));
    assert_eq!(result.get(&4), Some(4));
    assert_eq!(result.get(&5), Some(5));
    assert_eq!(result.get(&3), None);

    let reopened: FileRepository<i64, i32> =
        FileRepository::open(collection_path(temp_dir.path(), "menu"))
            .await
            .unwrap();
    let items = reopened.load_items().await.unwrap();
    let orders: Vec<Option<i32>> = items.iter().map(|i| i.order).collect();
    assert_eq!(orders, vec![Some(2), Some(1), Some(3), Some(4), Some(5)]);

    let event = events.try_recv().expect("Event should be published");
    assert_eq!(event.collection, "menu");
    assert_eq!(event.ids, vec!["1", "2", "4", "5"]);
}

#[tokio::test]
async fn test_gap_is_filled_before_appending() {
    let temp_dir = create_test_dir();
    let service = create_collection(
        temp_dir.path(),
        "tasks",
        vec![
            OrderableItem::new(1_i64, Some(1_i64)),
            OrderableItem::new(2, Some(5)),
            OrderableItem::new(3, None),
            OrderableItem::new(4, None),
        ],
        ReconcilerSettings::default(),
    )
    .await;

    let result = service.reorder(&request(&[])).await.unwrap();
    assert_eq!(result.get(&3), Some(2));
    assert_eq!(result.get(&4), Some(6));
    assert_eq!(result.initialized.len(), 2);
}

#[tokio::test]
async fn test_conflict_moves_requested_item() {
    let temp_dir = create_test_dir();
    let service = create_collection(
        temp_dir.path(),
        "steps",
        vec![
            OrderableItem::new(3_i64, Some(3_i32)),
            OrderableItem::new(7, Some(1)),
        ],
        ReconcilerSettings::default(),
    )
    .await;

    let result = service.reorder(&request(&[("7", 3.0)])).await.unwrap();
    assert_eq!(result.get(&7), Some(4));
    assert!(result.adjusted.contains(&7));

    let items = service.repository().load_items().await.unwrap();
    assert_eq!(items[0].order, Some(3));
    assert_eq!(items[1].order, Some(4));
}

#[tokio::test]
async fn test_overwrite_precedence_writes_request_verbatim() {
    let temp_dir = create_test_dir();
    let service = create_collection(
        temp_dir.path(),
        "steps",
        vec![
            OrderableItem::new(3_i64, Some(3_i32)),
            OrderableItem::new(7, Some(1)),
        ],
        ReconcilerSettings {
            precedence: UserRequestPrecedence::Overwrite,
            ..ReconcilerSettings::default()
        },
    )
    .await;

    let result = service.reorder(&request(&[("7", 3.0)])).await.unwrap();
    assert_eq!(result.get(&7), Some(3));
    assert!(result.adjusted.is_empty());
}

#[tokio::test]
async fn test_string_ids_with_float_orders() {
    let temp_dir = create_test_dir();
    let service = create_collection(
        temp_dir.path(),
        "sections",
        vec![
            OrderableItem::new("intro".to_string(), Some(1.5_f64)),
            OrderableItem::new("body".to_string(), Some(1.5)),
            OrderableItem::new("outro".to_string(), None),
        ],
        ReconcilerSettings::default(),
    )
    .await;

    let result = service.reorder(&request(&[])).await.unwrap();
    assert_eq!(result.get(&"intro".to_string()), Some(2.5));
    assert!(result.repaired.contains("intro"));
    assert_eq!(result.get(&"outro".to_string()), Some(3.5));

    let header = read_header(&collection_path(temp_dir.path(), "sections"))
        .await
        .unwrap();
    assert_eq!(header.order_kind, "float64");
    assert_eq!(header.id_kind, "string");
}

#[tokio::test]
async fn test_uuid_ids_keep_values_unique() {
    let temp_dir = create_test_dir();
    let ids: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
    let service = create_collection(
        temp_dir.path(),
        "cards",
        ids.iter()
            .map(|id| OrderableItem::new(*id, None::<i32>))
            .collect(),
        ReconcilerSettings::default(),
    )
    .await;

    let first = ids[0].to_string();
    service.reorder(&request(&[(first.as_str(), 2.0)])).await.unwrap();

    let items = service.repository().load_items().await.unwrap();
    let values: BTreeSet<i32> = items.iter().filter_map(|i| i.order).collect();
    assert_eq!(values.len(), ids.len());
    let moved = items.iter().find(|i| i.id == ids[0]).unwrap();
    assert_eq!(moved.order, Some(2));
}

#[tokio::test]
async fn test_unknown_id_leaves_file_untouched() {
    let temp_dir = create_test_dir();
    let service = create_collection(
        temp_dir.path(),
        "menu",
        vec![OrderableItem::new(1_i64, None::<i32>)],
        ReconcilerSettings::default(),
    )
    .await;
    let path = collection_path(temp_dir.path(), "menu");
    let before = std::fs::read_to_string(&path).unwrap();

    let err = service.reorder(&request(&[("99", 1.0)])).await.unwrap_err();
    assert!(matches!(err, ServiceError::Reconcile(_)));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}

#[tokio::test]
async fn test_preview_leaves_file_untouched() {
    let temp_dir = create_test_dir();
    let service = create_collection(
        temp_dir.path(),
        "menu",
        vec![
            OrderableItem::new(1_i64, None::<i32>),
            OrderableItem::new(2, None),
        ],
        ReconcilerSettings::default(),
    )
    .await;
    let path = collection_path(temp_dir.path(), "menu");
    let before = std::fs::read_to_string(&path).unwrap();

    let result = service.preview(&request(&[])).await.unwrap();
    assert_eq!(result.get(&1), Some(1));
    assert_eq!(result.get(&2), Some(2));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}

#[tokio::test]
async fn test_deleted_file_surfaces_io_error() {
    let temp_dir = create_test_dir();
    let service = create_collection(
        temp_dir.path(),
        "menu",
        vec![OrderableItem::new(1_i64, None::<i32>)],
        ReconcilerSettings::default(),
    )
    .await;
    std::fs::remove_file(collection_path(temp_dir.path(), "menu")).unwrap();

    let err = service.reorder(&request(&[])).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Repository(RepositoryError::IoError(_))
    ));
}
