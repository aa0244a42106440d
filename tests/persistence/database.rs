use std::fs;

use relalg_engine::persistence::{
    Database, Error, IndexKind, KeyType, PersistenceError, Table, Value,
};
use relalg_engine::row;
use tempfile::TempDir;

fn _prepare_database(store: &TempDir) -> Database {
    Database::new("test_db", store.path())
}

fn _create_movie(database: &mut Database) -> &mut Table {
    let movie = database
        .create_table(
            "movie",
            "title year length genre studioName",
            "String Integer Integer String String",
            "title year",
        )
        .unwrap();
    movie
        .insert_many(vec![
            row!["StarWars", 1977, 124, "scifi", "Fox"],
            row!["Rocky", 1976, 119, "drama", "United"],
        ])
        .unwrap();
    movie
}

#[test]
fn database_create_table_registers_it() {
    let store = TempDir::new().unwrap();
    let mut database = _prepare_database(&store);
    _create_movie(&mut database);

    assert!(database.contains_table("movie"));
    assert_eq!(database.get_table("movie").unwrap().len(), 2);
    assert_eq!(database.table_names(), vec!["movie".to_string()]);
}

#[test]
fn database_table_names_keep_registration_order() {
    let store = TempDir::new().unwrap();
    let mut database = _prepare_database(&store);
    for name in ["studio", "movie", "cinema"] {
        database.create_table(name, "id", "Integer", "id").unwrap();
    }

    assert_eq!(database.table_names(), vec!["studio", "movie", "cinema"]);

    database.drop_table("movie");
    assert_eq!(database.table_names(), vec!["studio", "cinema"]);
}

#[test]
fn database_register_replaces_same_name() {
    let store = TempDir::new().unwrap();
    let mut database = _prepare_database(&store);
    _create_movie(&mut database);

    let empty = Table::define("movie", "title", "String", "title").unwrap();
    let previous = database.register(empty).unwrap();

    assert_eq!(previous.len(), 2);
    assert!(database.get_table("movie").unwrap().is_empty());
}

#[test]
fn database_save_then_load_reproduces_table() {
    let store = TempDir::new().unwrap();
    let mut database = _prepare_database(&store);
    _create_movie(&mut database);

    let movie = database.get_table("movie").unwrap();
    let path = database.save(movie).unwrap();
    assert_eq!(path, store.path().join("movie.dbf"));

    let loaded = database.load("movie").unwrap();
    assert_eq!(loaded.name(), "movie");
    assert_eq!(loaded.schema(), movie.schema());
    assert_eq!(loaded.key(), movie.key());
    assert_eq!(loaded.rows(), movie.rows());

    let key = KeyType::from(row!["Rocky", 1976]);
    assert_eq!(loaded.get(&key), movie.get(&key));
}

#[test]
fn database_load_keeps_floats_and_characters() {
    let store = TempDir::new().unwrap();
    let mut database = _prepare_database(&store);
    database
        .create_table("exec", "cert grade fee ratio", "Long Character Double Float", "cert")
        .unwrap()
        .insert(row![9999i64, 'é', 10000.25, 0.1f32])
        .unwrap();

    database.save_all().unwrap();
    let loaded = database.load("exec").unwrap();

    assert_eq!(loaded.rows(), database.get_table("exec").unwrap().rows());
}

#[test]
fn database_load_keeps_non_finite_floats() {
    let store = TempDir::new().unwrap();
    let mut database = _prepare_database(&store);
    database
        .create_table("exec", "cert fee ratio", "Integer Double Float", "cert")
        .unwrap()
        .insert_many(vec![
            row![1, f64::NAN, f32::INFINITY],
            row![2, f64::INFINITY, f32::NAN],
            row![3, f64::NEG_INFINITY, f32::NEG_INFINITY],
        ])
        .unwrap();

    database.save_all().unwrap();
    let loaded = database.load("exec").unwrap();

    assert_eq!(loaded.rows(), database.get_table("exec").unwrap().rows());
    assert!(matches!(loaded.rows()[0][1], Value::Double(fee) if fee.is_nan()));
}

#[test]
fn database_load_uses_its_index_kind() {
    let store = TempDir::new().unwrap();
    let mut database = _prepare_database(&store);
    _create_movie(&mut database);
    database.save_all().unwrap();

    let unindexed = Database::new("test_db", store.path()).with_index_kind(IndexKind::NoIndex);
    let loaded = unindexed.load("movie").unwrap();

    assert_eq!(loaded.len(), 2);
    assert!(!loaded.is_indexed());
}

#[test]
fn database_load_missing_table_is_not_found() {
    let store = TempDir::new().unwrap();
    let database = _prepare_database(&store);

    let err = database.load("ghost").unwrap_err();
    assert!(matches!(
        err,
        Error::Persistence(PersistenceError::NotFound { name, .. }) if name == "ghost"
    ));
}

#[test]
fn database_load_reports_corrupted_snapshot() {
    let store = TempDir::new().unwrap();
    let database = _prepare_database(&store);
    fs::write(store.path().join("movie.dbf"), "{ not json").unwrap();

    let err = database.load("movie").unwrap_err();
    assert!(matches!(
        err,
        Error::Persistence(PersistenceError::Serialization(_))
    ));
}

#[test]
fn database_save_all_counts_tables() {
    let store = TempDir::new().unwrap();
    let mut database = _prepare_database(&store);
    _create_movie(&mut database);
    database
        .create_table("studio", "name address", "String String", "name")
        .unwrap();

    assert_eq!(database.save_all().unwrap(), 2);
    assert!(store.path().join("movie.dbf").is_file());
    assert!(store.path().join("studio.dbf").is_file());
}

#[test]
fn database_open_registers_loaded_table() {
    let store = TempDir::new().unwrap();
    let mut database = _prepare_database(&store);
    _create_movie(&mut database);
    database.save_all().unwrap();

    let mut reopened = _prepare_database(&store);
    assert_eq!(reopened.open("movie").unwrap().len(), 2);
    assert!(reopened.contains_table("movie"));
}

#[test]
fn database_open_registers_under_snapshot_name() {
    let store = TempDir::new().unwrap();
    let mut database = _prepare_database(&store);
    _create_movie(&mut database);
    database.save_all().unwrap();
    fs::copy(store.path().join("movie.dbf"), store.path().join("classic.dbf")).unwrap();

    let mut reopened = _prepare_database(&store);
    assert_eq!(reopened.open("classic").unwrap().name(), "movie");
    assert!(reopened.contains_table("movie"));
    assert!(!reopened.contains_table("classic"));
    assert_eq!(reopened.table_names(), vec!["movie"]);
}

#[test]
fn database_spill_writes_every_row() {
    let store = TempDir::new().unwrap();
    let mut database = _prepare_database(&store);
    _create_movie(&mut database);

    let movie = database.get_table("movie").unwrap();
    let file_list = database.spill(movie, 16).unwrap();

    assert_eq!(file_list.len(), movie.len());
    assert_eq!(file_list.rows().unwrap(), movie.rows());
    assert_eq!(file_list.path(), store.path().join("movie.dat"));
    file_list.close().unwrap();
}
