// ==========================================
// Row transform integration tests
// ==========================================
// Dedup, coercion and strict validation over whole row sets
// ==========================================

mod test_helpers;

use chrono::NaiveDate;
use igm_loader::domain::{CellValue, ViolationKind};
use igm_loader::importer::RowTransform;
use igm_loader::logging;
use test_helpers::raw_row;

fn base(talent: &str) -> Vec<(&str, &str)> {
    vec![
        ("talent", talent),
        ("date", "2024-01-01"),
        ("campaign", "c1"),
        ("product", "p1"),
    ]
}

fn with<'a>(
    mut values: Vec<(&'a str, &'a str)>,
    extra: &[(&'a str, &'a str)],
) -> Vec<(&'a str, &'a str)> {
    values.extend_from_slice(extra);
    values
}

fn key<'a>(
    talent: &'a str,
    date: &'a str,
    campaign: &'a str,
    product: &'a str,
) -> [(&'static str, &'a str); 4] {
    [
        ("talent", talent),
        ("date", date),
        ("campaign", campaign),
        ("product", product),
    ]
}

#[test]
fn test_dedup_drops_every_member_of_a_colliding_group() {
    logging::init_test();
    let transform = RowTransform::default();

    let rows = vec![
        raw_row(2, &with(base("X"), &[("fee", "100")])),
        raw_row(3, &base("Y")),
        raw_row(4, &with(base("X"), &[("fee", "200")])),
        raw_row(5, &with(base("X"), &[("fee", "300")])),
    ];
    let (kept, violations) = transform.drop_ambiguous(rows);

    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].get("talent"), Some("Y"));
    assert_eq!(violations.len(), 3);
    assert!(violations
        .iter()
        .all(|v| v.kind == ViolationKind::DuplicateKey));
}

#[test]
fn test_dedup_preserves_unique_rows_unchanged() {
    let transform = RowTransform::default();

    let unique = raw_row(2, &with(base("X"), &[("fee", " not a number ")]));
    let other = raw_row(3, &base("Z"));
    let (kept, violations) = transform.drop_ambiguous(vec![unique.clone(), other.clone()]);

    assert!(violations.is_empty());
    assert_eq!(kept, vec![unique, other]);
}

#[test]
fn test_key_differs_on_any_single_field() {
    let transform = RowTransform::default();

    let rows = vec![
        raw_row(2, &base("X")),
        raw_row(3, &key("X", "2024-01-02", "c1", "p1")),
        raw_row(4, &key("X", "2024-01-01", "c2", "p1")),
        raw_row(5, &key("X", "2024-01-01", "c1", "p2")),
        raw_row(6, &key("x", "2024-01-01", "c1", "p1")),
    ];
    let (kept, _) = transform.drop_ambiguous(rows);

    assert_eq!(kept.len(), 5);
}

#[test]
fn test_non_numeric_fee_rejects_row() {
    let transform = RowTransform::default();

    let rows = vec![
        raw_row(2, &with(base("X"), &[("fee", "abc")])),
        raw_row(3, &with(base("Y"), &[("order_nr", "twelve")])),
        raw_row(4, &with(base("Z"), &[("fee", "99.5"), ("order_nr", "12")])),
    ];
    let (clean, report) = transform.transform(rows);

    assert_eq!(clean.len(), 1);
    assert_eq!(clean[0].get("fee"), Some(&CellValue::Float(99.5)));
    assert_eq!(clean[0].get("order_nr"), Some(&CellValue::Integer(12)));
    assert_eq!(report.input_rows, 3);
    assert_eq!(report.rejected_rows, 2);
    assert_eq!(report.output_rows, 1);

    let fields: Vec<&str> = report.violations.iter().map(|v| v.field.as_str()).collect();
    assert!(fields.contains(&"fee"));
    assert!(fields.contains(&"order_nr"));
    assert!(report
        .violations
        .iter()
        .all(|v| v.kind == ViolationKind::ValueConversion));
}

#[test]
fn test_boolean_literals_normalize() {
    let transform = RowTransform::default();

    let truthy = ["TRUE", "1", "Yes"];
    let falsy = ["false", "0", ""];
    let mut rows = Vec::new();
    for (i, token) in truthy.iter().chain(falsy.iter()).enumerate() {
        let talent = format!("T{}", i);
        rows.push(raw_row(
            i + 2,
            &[
                ("talent", talent.as_str()),
                ("date", "2024-01-01"),
                ("received", *token),
            ],
        ));
    }
    let (clean, report) = transform.transform(rows);

    assert_eq!(report.rejected_rows, 0);
    assert_eq!(clean.len(), 6);
    for row in &clean[..3] {
        assert_eq!(row.get("received"), Some(&CellValue::Boolean(true)));
    }
    for row in &clean[3..] {
        assert_eq!(row.get("received"), Some(&CellValue::Boolean(false)));
    }
}

#[test]
fn test_unrecognized_boolean_rejects_row() {
    let transform = RowTransform::default();

    let rows = vec![
        raw_row(2, &with(base("X"), &[("brief", "maybe")])),
        raw_row(3, &with(base("Y"), &[("brief", "no")])),
    ];
    let (clean, report) = transform.transform(rows);

    assert_eq!(clean.len(), 1);
    assert_eq!(clean[0].get("brief"), Some(&CellValue::Boolean(false)));
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].field, "brief");
    assert_eq!(report.violations[0].value, "maybe");
    assert_eq!(report.violations[0].row_number, 2);
}

#[test]
fn test_date_pattern_enforced() {
    let transform = RowTransform::default();

    let rows = vec![
        raw_row(2, &[("talent", "X"), ("date", "2024-03-05")]),
        raw_row(3, &[("talent", "Y"), ("date", "03/05/2024")]),
    ];
    let (clean, report) = transform.transform(rows);

    assert_eq!(clean.len(), 1);
    assert_eq!(
        clean[0].get("date"),
        Some(&CellValue::Date(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()))
    );
    assert_eq!(report.rejected_rows, 1);
    assert_eq!(report.violations[0].field, "date");
}

#[test]
fn test_string_fields_never_reject() {
    let transform = RowTransform::default();

    let rows = vec![raw_row(
        2,
        &with(
            base("X"),
            &[("link", "https://example.com/?a=1"), ("utm", "123"), ("content_type", "true")],
        ),
    )];
    let (clean, report) = transform.transform(rows);

    assert_eq!(report.rejected_rows, 0);
    assert_eq!(
        clean[0].get("utm"),
        Some(&CellValue::Text("123".to_string()))
    );
    assert_eq!(
        clean[0].get("content_type"),
        Some(&CellValue::Text("true".to_string()))
    );
}

#[test]
fn test_duplicates_and_rejections_counted_separately() {
    let transform = RowTransform::default();

    let rows = vec![
        raw_row(2, &base("X")),
        raw_row(3, &base("X")),
        raw_row(4, &with(base("Y"), &[("fee", "n/a")])),
        raw_row(5, &base("Z")),
    ];
    let (clean, report) = transform.transform(rows);

    assert_eq!(report.input_rows, 4);
    assert_eq!(report.duplicate_rows, 2);
    assert_eq!(report.rejected_rows, 1);
    assert_eq!(report.output_rows, 1);
    assert_eq!(clean.len(), 1);
}
