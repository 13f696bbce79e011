use chrono::{DateTime, Utc};
use photoshare_kiosk::photos::{PhotoList, PhotoRecord, ReconcileOutcome};

fn photo(id: &str, url: &str, created_at: &str) -> PhotoRecord {
    PhotoRecord {
        id: id.to_string(),
        url: url.to_string(),
        created_at: created_at.parse::<DateTime<Utc>>().expect("valid rfc3339"),
    }
}

#[test]
fn arrivals_are_appended_and_sorted_by_created_at() {
    let mut list = PhotoList::new();
    let outcome = list.reconcile(vec![
        photo("2", "/images/b.jpg", "2024-01-01T00:00:05Z"),
        photo("1", "/images/a.jpg", "2024-01-01T00:00:00Z"),
    ]);
    assert_eq!(outcome, ReconcileOutcome::Arrived(2));

    let ids: Vec<&str> = list.records().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["1", "2"], "list must sort ascending by createdAt");
}

#[test]
fn reconcile_is_idempotent_for_an_unchanged_snapshot() {
    let snapshot = vec![
        photo("1", "/images/a.jpg", "2024-01-01T00:00:00Z"),
        photo("2", "/images/b.jpg", "2024-01-01T00:00:01Z"),
    ];
    let mut list = PhotoList::new();
    assert_eq!(
        list.reconcile(snapshot.clone()),
        ReconcileOutcome::Arrived(2)
    );
    let before = list.records().to_vec();

    assert_eq!(list.reconcile(snapshot), ReconcileOutcome::NoChange);
    assert_eq!(list.records(), &before[..], "second merge must not mutate");
}

#[test]
fn empty_snapshot_over_non_empty_list_wipes_everything() {
    let mut list = PhotoList::new();
    list.reconcile(vec![
        photo("1", "/images/a.jpg", "2024-01-01T00:00:00Z"),
        photo("2", "/images/b.jpg", "2024-01-01T00:00:01Z"),
        photo("3", "/images/c.jpg", "2024-01-01T00:00:02Z"),
    ]);

    assert_eq!(list.reconcile(Vec::new()), ReconcileOutcome::WipedToEmpty);
    assert!(list.is_empty());
}

#[test]
fn empty_snapshot_over_empty_list_is_no_change() {
    let mut list = PhotoList::new();
    assert_eq!(list.reconcile(Vec::new()), ReconcileOutcome::NoChange);
    assert!(list.is_empty());
}

#[test]
fn equal_timestamps_keep_arrival_order() {
    let mut list = PhotoList::new();
    list.reconcile(vec![photo("first", "/images/f.jpg", "2024-06-01T12:00:00Z")]);
    list.reconcile(vec![
        photo("first", "/images/f.jpg", "2024-06-01T12:00:00Z"),
        photo("second", "/images/s.jpg", "2024-06-01T12:00:00Z"),
    ]);

    let ids: Vec<&str> = list.records().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["first", "second"], "stable sort keeps arrival order");
}

#[test]
fn duplicate_ids_within_one_snapshot_are_kept_once() {
    let mut list = PhotoList::new();
    let outcome = list.reconcile(vec![
        photo("1", "/images/a.jpg", "2024-01-01T00:00:00Z"),
        photo("1", "/images/a-again.jpg", "2024-01-01T00:00:09Z"),
    ]);
    assert_eq!(outcome, ReconcileOutcome::Arrived(1));
    assert_eq!(list.len(), 1);
    assert_eq!(list.get(0).unwrap().url, "/images/a.jpg");
}

#[test]
fn records_deserialize_from_the_backend_wire_format() {
    let payload = r#"[
        {"id": "abc", "url": "/images/party.jpg", "createdAt": "2024-06-01T12:00:00+00:00"}
    ]"#;
    let fetched: Vec<PhotoRecord> = serde_json::from_str(payload).expect("valid payload");
    assert_eq!(fetched.len(), 1);
    assert_eq!(fetched[0].id, "abc");
    assert_eq!(
        fetched[0].created_at,
        "2024-06-01T12:00:00Z".parse::<DateTime<Utc>>().unwrap()
    );
}

#[test]
fn interleaved_merges_never_break_the_sort_invariant() {
    let mut list = PhotoList::new();
    list.reconcile(vec![photo("3", "/images/c.jpg", "2024-01-01T00:00:30Z")]);
    list.reconcile(vec![
        photo("3", "/images/c.jpg", "2024-01-01T00:00:30Z"),
        photo("1", "/images/a.jpg", "2024-01-01T00:00:10Z"),
    ]);
    list.reconcile(vec![
        photo("3", "/images/c.jpg", "2024-01-01T00:00:30Z"),
        photo("1", "/images/a.jpg", "2024-01-01T00:00:10Z"),
        photo("2", "/images/b.jpg", "2024-01-01T00:00:20Z"),
    ]);

    let ids: Vec<&str> = list.records().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3"]);
}
