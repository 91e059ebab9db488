use chrono::NaiveDate;
use serde_json::{Value, json};
use timeslice::models::{Category, DbItem, TimeEntry};
use timeslice::repository::{Repository, SheetsRepository};
use timeslice::sheets::memory::{MemorySheets, Op};

const CATALOG: &str = "業務データベース";

fn row(cells: &[&str]) -> Vec<Value> {
    cells.iter().map(|c| json!(c)).collect()
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, 7).unwrap()
}

fn entry(time: &str, content: &str, client: &str) -> TimeEntry {
    TimeEntry {
        time: time.into(),
        content: content.into(),
        client: client.into(),
        ..Default::default()
    }
}

fn item(item_type: &str, value: &str) -> DbItem {
    DbItem {
        item_type: item_type.into(),
        value: value.into(),
        ..Default::default()
    }
}

fn pairs(items: &[DbItem]) -> Vec<(&str, &str)> {
    items
        .iter()
        .map(|i| (i.item_type.as_str(), i.value.as_str()))
        .collect()
}

#[test]
fn test_missing_catalog_sheet_is_empty() {
    let sheets = MemorySheets::new();
    let repo = SheetsRepository::new(&sheets, CATALOG);
    assert!(repo.get_db_items().unwrap().is_empty());
}

#[test]
fn test_saved_items_are_normalized_and_numbered() {
    let sheets = MemorySheets::new();
    let repo = SheetsRepository::new(&sheets, CATALOG);

    repo.save_db_items(&[item("task", "会議"), item("bogus", "x")])
        .unwrap();

    let items = repo.get_db_items().unwrap();
    assert_eq!(pairs(&items), vec![("content", "会議")]);
    assert_eq!(items[0].id, Some(1));

    assert_eq!(
        sheets.snapshot(CATALOG).unwrap(),
        vec![row(&["項目種別", "項目名"]), row(&["content", "会議"])]
    );
}

#[test]
fn test_saving_twice_does_not_duplicate() {
    let sheets = MemorySheets::new();
    let repo = SheetsRepository::new(&sheets, CATALOG);

    let batch = [item("client", "A社"), item("content", "会議")];
    repo.save_db_items(&batch).unwrap();
    let first = repo.get_db_items().unwrap();
    repo.save_db_items(&batch).unwrap();
    repo.save_db_items(&[item("クライアント", "A社")]).unwrap();

    assert_eq!(repo.get_db_items().unwrap(), first);
    // grouped in category order
    assert_eq!(pairs(&first), vec![("content", "会議"), ("client", "A社")]);
}

#[test]
fn test_deleted_items_stay_deleted() {
    let sheets = MemorySheets::new().with_sheet(
        CATALOG,
        vec![
            row(&["項目種別", "項目名"]),
            row(&["content", "会議"]),
            row(&["client", "A社"]),
            row(&["client", "B社"]),
        ],
    );
    let repo = SheetsRepository::new(&sheets, CATALOG);

    repo.delete_db_items(&[item("client", "A社"), item("task", "会議")])
        .unwrap();

    assert_eq!(pairs(&repo.get_db_items().unwrap()), vec![("client", "B社")]);
    assert_eq!(sheets.snapshot(CATALOG).unwrap().len(), 2);
}

#[test]
fn test_column_per_category_catalog_is_converted_on_save() {
    let sheets = MemorySheets::new().with_sheet(
        CATALOG,
        vec![
            row(&["内容", "クライアント", "メモ"]),
            row(&["会議", "A社", "ignored"]),
            row(&["", "B社"]),
        ],
    );
    let repo = SheetsRepository::new(&sheets, CATALOG);

    let before = repo.get_db_items().unwrap();
    assert_eq!(
        pairs(&before),
        vec![("content", "会議"), ("client", "A社"), ("client", "B社")]
    );

    repo.save_db_items(&[DbItem::new(Category::Remark, "至急")])
        .unwrap();

    assert_eq!(
        sheets.snapshot(CATALOG).unwrap(),
        vec![
            row(&["項目種別", "項目名"]),
            row(&["content", "会議"]),
            row(&["client", "A社"]),
            row(&["client", "B社"]),
            row(&["remark", "至急"]),
        ]
    );
}

#[test]
fn test_missing_date_sheet_has_no_entries() {
    let sheets = MemorySheets::new();
    let repo = SheetsRepository::new(&sheets, CATALOG);
    assert!(repo.get_time_entries(day()).unwrap().is_empty());
    assert_eq!(sheets.calls(), vec![Op::Get]);
}

#[test]
fn test_rows_without_content_are_dropped() {
    let sheets = MemorySheets::new().with_sheet(
        "2025-04-07",
        vec![
            row(&["時間", "内容", "クライアント"]),
            row(&["09:00", "", "ClientA"]),
            row(&["10:00", "会議"]),
            vec![json!("11:00"), json!("資料作成"), Value::Null, json!(3.0)],
        ],
    );
    let repo = SheetsRepository::new(&sheets, CATALOG);

    let entries = repo.get_time_entries(day()).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0], entry("10:00", "会議", ""));
    assert_eq!(entries[1].content, "資料作成");
    assert_eq!(entries[1].purpose, "3");
}

#[test]
fn test_saved_entries_read_back_in_order() {
    let sheets = MemorySheets::new();
    let repo = SheetsRepository::new(&sheets, CATALOG);

    let entries = vec![
        entry("09:00", "会議", "A社"),
        entry("", "orphan", ""),
        entry("10:00", "資料作成", ""),
    ];
    repo.save_time_entries(day(), &entries).unwrap();

    assert_eq!(
        repo.get_time_entries(day()).unwrap(),
        vec![entries[0].clone(), entries[2].clone()]
    );

    let grid = sheets.snapshot("2025-04-07").unwrap();
    assert_eq!(
        grid[0],
        row(&["時間", "内容", "クライアント", "目的", "アクション", "誰と", "PC/CC", "備考"])
    );
    assert_eq!(grid.len(), 4);
}

#[test]
fn test_shorter_save_replaces_longer_day() {
    let sheets = MemorySheets::new();
    let repo = SheetsRepository::new(&sheets, CATALOG);

    repo.save_time_entries(
        day(),
        &[entry("09:00", "a", ""), entry("10:00", "b", ""), entry("11:00", "c", "")],
    )
    .unwrap();
    repo.save_time_entries(day(), &[entry("12:00", "z", "")])
        .unwrap();

    assert_eq!(
        repo.get_time_entries(day()).unwrap(),
        vec![entry("12:00", "z", "")]
    );
    assert_eq!(
        sheets
            .calls()
            .iter()
            .filter(|op| **op == Op::AddSheet)
            .count(),
        1
    );
}

#[test]
fn test_failed_write_after_clear_leaves_sheet_empty() {
    let sheets = MemorySheets::new();
    let repo = SheetsRepository::new(&sheets, CATALOG);
    repo.save_time_entries(day(), &[entry("09:00", "会議", "")])
        .unwrap();

    sheets.fail(Op::Update, 1);
    let err = repo
        .save_time_entries(day(), &[entry("10:00", "資料作成", "")])
        .unwrap_err();
    assert!(!err.is_missing_range());

    assert_eq!(sheets.snapshot("2025-04-07").unwrap(), Vec::<Vec<Value>>::new());
    assert!(repo.get_time_entries(day()).unwrap().is_empty());
}

#[test]
fn test_write_retry_recovers_after_clear() {
    let sheets = MemorySheets::new();
    let repo = SheetsRepository::new(&sheets, CATALOG).with_rewrite_attempts(2);

    sheets.fail(Op::Update, 1);
    repo.save_time_entries(day(), &[entry("09:00", "会議", "")])
        .unwrap();

    assert_eq!(
        repo.get_time_entries(day()).unwrap(),
        vec![entry("09:00", "会議", "")]
    );
}

#[test]
fn test_failed_clear_leaves_catalog_untouched() {
    let before = vec![row(&["項目種別", "項目名"]), row(&["content", "会議"])];
    let sheets = MemorySheets::new().with_sheet(CATALOG, before.clone());
    let repo = SheetsRepository::new(&sheets, CATALOG);

    sheets.fail(Op::Clear, 1);
    assert!(repo.save_db_items(&[item("client", "A社")]).is_err());
    assert_eq!(sheets.snapshot(CATALOG).unwrap(), before);
}

#[test]
fn test_transport_errors_are_not_hidden() {
    let sheets = MemorySheets::new();
    let repo = SheetsRepository::new(&sheets, CATALOG);

    sheets.fail(Op::Get, 1);
    assert!(repo.get_time_entries(day()).is_err());
    sheets.fail(Op::Get, 1);
    assert!(repo.get_db_items().is_err());
}
