use std::fs;

use relalg_engine::persistence::{Error, FileList, PersistenceError, Schema};
use relalg_engine::row;
use tempfile::TempDir;

fn _every_domain() -> Schema {
    Schema::parse(
        "b s i l f d c name",
        "Byte Short Integer Long Float Double Character String",
    )
    .unwrap()
}

#[test]
fn file_list_reads_back_every_domain() {
    let dir = TempDir::new().unwrap();
    let schema = _every_domain();
    let mut file_list = FileList::create(dir.path(), "all", &schema, 12).unwrap();

    let rows = vec![
        row![i8::MIN, i16::MAX, -42, i64::MIN, 1.5f32, -0.1, 'x', "Rocky"],
        row![127i8, -1i16, i32::MAX, 7i64, f32::MIN, f64::MAX, 'ß', "Ångström"],
        row![0i8, 0i16, 0, 0i64, 0.0f32, 0.0, '🎬', ""],
    ];
    for row in rows.iter() {
        file_list.append(row).unwrap();
    }

    assert_eq!(file_list.len(), 3);
    for (index, row) in rows.iter().enumerate() {
        assert_eq!(&file_list.get(index).unwrap(), row);
    }
}

#[test]
fn file_list_records_have_fixed_size() {
    let dir = TempDir::new().unwrap();
    let schema = _every_domain();
    let mut file_list = FileList::create(dir.path(), "all", &schema, 12).unwrap();
    file_list
        .append(&row![1i8, 2i16, 3, 4i64, 5.0f32, 6.0, 'a', "abc"])
        .unwrap();
    file_list
        .append(&row![1i8, 2i16, 3, 4i64, 5.0f32, 6.0, 'a', "abcdefghijkl"])
        .unwrap();

    assert_eq!(file_list.record_size(), 1 + 2 + 4 + 8 + 4 + 8 + 4 + 2 + 12);

    let path = file_list.path().to_path_buf();
    file_list.close().unwrap();
    assert_eq!(fs::metadata(path).unwrap().len(), 2 * 45);
}

#[test]
fn file_list_rejects_too_wide_strings() {
    let dir = TempDir::new().unwrap();
    let schema = Schema::parse("id name", "Integer String").unwrap();
    let mut file_list = FileList::create(dir.path(), "people", &schema, 4).unwrap();

    let err = file_list.append(&row![1, "Maharashtra"]).unwrap_err();
    assert!(matches!(
        err,
        Error::Persistence(PersistenceError::FieldTooWide { width: 4, actual: 11, .. })
    ));
    assert!(file_list.is_empty());
}

#[test]
fn file_list_rejects_rows_of_another_schema() {
    let dir = TempDir::new().unwrap();
    let schema = Schema::parse("id name", "Integer String").unwrap();
    let mut file_list = FileList::create(dir.path(), "people", &schema, 8).unwrap();

    assert!(matches!(
        file_list.append(&row!["one", "Jansen"]),
        Err(Error::TypeMismatch { .. })
    ));
    assert!(file_list.is_empty());
}

#[test]
fn file_list_get_out_of_bounds() {
    let dir = TempDir::new().unwrap();
    let schema = Schema::parse("id", "Integer").unwrap();
    let mut file_list = FileList::create(dir.path(), "ids", &schema, 8).unwrap();
    file_list.append(&row![1]).unwrap();

    let err = file_list.get(1).unwrap_err();
    assert!(matches!(
        err,
        Error::Persistence(PersistenceError::RecordOutOfBounds { index: 1, len: 1 })
    ));
}

#[test]
fn file_list_reopens_existing_records() {
    let dir = TempDir::new().unwrap();
    let schema = Schema::parse("id name", "Integer String").unwrap();
    let mut file_list = FileList::create(dir.path(), "people", &schema, 8).unwrap();
    file_list.append(&row![1, "Jansen"]).unwrap();
    file_list.append(&row![2, "Bonega"]).unwrap();
    file_list.close().unwrap();

    let mut reopened = FileList::open(dir.path(), "people", &schema, 8).unwrap();
    assert_eq!(reopened.len(), 2);
    assert_eq!(reopened.get(1).unwrap(), row![2, "Bonega"]);

    reopened.append(&row![3, "Lorem"]).unwrap();
    assert_eq!(reopened.rows().unwrap().len(), 3);
}

#[test]
fn file_list_open_detects_mismatched_layout() {
    let dir = TempDir::new().unwrap();
    let schema = Schema::parse("id", "Integer").unwrap();
    let mut file_list = FileList::create(dir.path(), "ids", &schema, 8).unwrap();
    file_list.append(&row![1]).unwrap();
    file_list.close().unwrap();

    let wider = Schema::parse("id", "Long").unwrap();
    let err = FileList::open(dir.path(), "ids", &wider, 8).unwrap_err();
    assert!(matches!(
        err,
        Error::Persistence(PersistenceError::Corrupted(_))
    ));
}
