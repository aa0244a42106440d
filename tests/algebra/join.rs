use relalg_engine::persistence::{Error, IndexKind, Schema, Table, Value};
use relalg_engine::row;

use crate::fixtures::{cinema, movie, movie_with, sorted, studio, studio_with};

#[test]
fn equi_join_movie_with_studio() {
    let joined = movie()
        .equi_join(&["studioName"], &["name"], &studio())
        .unwrap();

    assert_eq!(
        joined.rows(),
        &[row!["StarWars", 1977, 124, "scifi", "Fox", "Fox", "LA"]]
    );
    assert_eq!(
        joined.schema().names(),
        vec!["title", "year", "length", "genre", "studioName", "name", "address"]
    );
    assert_eq!(joined.key(), &["title".to_string(), "year".to_string()]);
}

#[test]
fn equi_join_renames_clashing_columns() {
    let joined = movie()
        .equi_join(&["title", "year"], &["title", "year"], &cinema())
        .unwrap();

    assert_eq!(joined.len(), 1);
    assert_eq!(
        joined.schema().names(),
        vec![
            "title", "year", "length", "genre", "studioName",
            "title2", "year2", "length2", "genre2", "studioName2",
        ]
    );
}

#[test]
fn equi_join_rejects_bad_attribute_lists() {
    let (movie, studio) = (movie(), studio());

    assert!(matches!(
        movie.equi_join(&["studioName", "title"], &["name"], &studio),
        Err(Error::InvalidJoin(_))
    ));
    assert!(matches!(
        movie.equi_join(&[], &[], &studio),
        Err(Error::InvalidJoin(_))
    ));
    assert!(matches!(
        movie.equi_join(&["studio"], &["name"], &studio),
        Err(Error::AttributeNotFound(_))
    ));
}

#[test]
fn theta_join_compares_columns() {
    let joined = movie().theta_join("year < year", &cinema()).unwrap();

    // only Alien is newer than either movie
    assert_eq!(joined.len(), 2);
    for row in joined.rows() {
        assert_eq!(row[5], Value::from("Alien"));
    }
}

#[test]
fn theta_join_requires_matching_domains() {
    let (movie, cinema) = (movie(), cinema());

    assert!(matches!(
        movie.theta_join("title == year", &cinema),
        Err(Error::SchemaMismatch(_))
    ));
    assert!(matches!(
        movie.theta_join("title LIKE title", &cinema),
        Err(Error::InvalidCondition { .. }) | Err(Error::UnsupportedOperator(_))
    ));
}

#[test]
fn indexed_join_matches_equi_join_on_the_key() {
    for kind in [IndexKind::TreeMap, IndexKind::HashMap] {
        let movie = movie_with(kind);
        let studio = studio_with(kind);

        let nested = movie.equi_join(&["studioName"], &["name"], &studio).unwrap();
        let indexed = movie.indexed_join(&["studioName"], &["name"], &studio).unwrap();

        assert_eq!(sorted(nested.rows()), sorted(indexed.rows()));
        assert_eq!(nested.schema(), indexed.schema());
    }
}

#[test]
fn indexed_join_builds_an_index_for_other_attributes() {
    let (movie, cinema) = (movie(), cinema());

    let nested = movie.equi_join(&["genre"], &["genre"], &cinema).unwrap();
    let indexed = movie.indexed_join(&["genre"], &["genre"], &cinema).unwrap();

    assert_eq!(indexed.len(), 2);
    assert_eq!(sorted(nested.rows()), sorted(indexed.rows()));
}

#[test]
fn indexed_join_keeps_one_right_row_per_repeated_value() {
    let movie = movie();
    let mut dramas = Table::new("dramas", movie.schema().clone(), &["title", "year"]).unwrap();
    dramas
        .insert_many(vec![
            row!["Rocky", 1976, 119, "drama", "United"],
            row!["Network", 1976, 121, "drama", "MGM"],
        ])
        .unwrap();

    let nested = movie.equi_join(&["genre"], &["genre"], &dramas).unwrap();
    let indexed = movie.indexed_join(&["genre"], &["genre"], &dramas).unwrap();

    assert_eq!(nested.len(), 2);
    // the temporary index over genre points at the last drama inserted
    assert_eq!(
        indexed.rows(),
        &[row![
            "Rocky", 1976, 119, "drama", "United",
            "Network", 1976, 121, "drama", "MGM"
        ]]
    );
}

#[test]
fn indexed_join_needs_an_index_on_both_sides() {
    let indexed_movie = movie();
    let unindexed_studio = studio_with(IndexKind::NoIndex);

    assert!(matches!(
        indexed_movie.indexed_join(&["studioName"], &["name"], &unindexed_studio),
        Err(Error::IndexUnavailable(name)) if name == "studio"
    ));

    let unindexed_movie = movie_with(IndexKind::NoIndex);
    assert!(matches!(
        unindexed_movie.indexed_join(&["studioName"], &["name"], &studio()),
        Err(Error::IndexUnavailable(name)) if name == "movie"
    ));
}

#[test]
fn natural_join_keeps_one_copy_of_shared_columns() {
    let joined = movie().natural_join(&cinema()).unwrap();

    assert_eq!(joined.rows(), &[row!["Rocky", 1976, 119, "drama", "United"]]);
    assert_eq!(joined.schema().len(), 5);
}

#[test]
fn natural_join_on_partially_shared_schema() {
    let schema = Schema::parse("studioName boss", "String String").unwrap();
    let mut bosses = Table::new("boss", schema, &["studioName"]).unwrap();
    bosses
        .insert_many(vec![row!["Fox", "Murdoch"], row!["MGM", "Mayer"]])
        .unwrap();

    let joined = movie().natural_join(&bosses).unwrap();

    assert_eq!(
        joined.schema().names(),
        vec!["title", "year", "length", "genre", "studioName", "boss"]
    );
    assert_eq!(
        joined.rows(),
        &[row!["StarWars", 1977, 124, "scifi", "Fox", "Murdoch"]]
    );
}

#[test]
fn natural_join_without_shared_attributes_fails() {
    let (movie, studio) = (movie(), studio());

    assert!(matches!(
        movie.natural_join(&studio),
        Err(Error::NoCommonAttributes { .. })
    ));
}
