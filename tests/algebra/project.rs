use relalg_engine::persistence::{Error, Table};
use relalg_engine::row;

use crate::fixtures::movie;

#[test]
fn project_keeps_named_columns_in_order() {
    let movie = movie();
    let projected = movie.project(&["title", "year"]).unwrap();

    assert_eq!(
        projected.rows(),
        &[row!["StarWars", 1977], row!["Rocky", 1976]]
    );
    assert_eq!(projected.schema().names(), vec!["title", "year"]);
    assert_eq!(projected.key(), &["title".to_string(), "year".to_string()]);
}

#[test]
fn project_reorders_columns() {
    let projected = movie().project(&["studioName", "title"]).unwrap();

    assert_eq!(projected.rows()[0], row!["Fox", "StarWars"]);
}

#[test]
fn project_keeps_row_count_with_duplicates() {
    let mut movie = movie();
    movie
        .insert(row!["Alien", 1979, 117, "scifi", "Fox"])
        .unwrap();

    let genres = movie.project(&["genre"]).unwrap();

    assert_eq!(genres.len(), movie.len());
    assert_eq!(genres.key(), &["genre".to_string()]);
    // scifi appears twice but is indexed once
    assert_eq!(genres.index_entries().len(), 2);
}

#[test]
fn project_without_key_makes_projected_attributes_the_key() {
    let projected = movie().project(&["genre", "length"]).unwrap();

    assert_eq!(projected.key(), &["genre".to_string(), "length".to_string()]);
}

#[test]
fn project_rejects_unknown_and_repeated_attributes() {
    let movie = movie();

    assert!(matches!(
        movie.project(&["title", "rating"]),
        Err(Error::AttributeNotFound(name)) if name == "rating"
    ));
    assert!(matches!(
        movie.project(&["title", "title"]),
        Err(Error::DuplicateAttribute(name)) if name == "title"
    ));
}

#[test]
fn project_leaves_source_untouched_and_names_result() {
    let movie = movie();
    let projected: Table = movie.project(&["title"]).unwrap();

    assert_eq!(movie.schema().len(), 5);
    assert_eq!(movie.len(), 2);
    assert!(projected.name().starts_with("movie"));
    assert_ne!(projected.name(), "movie");
}
