use relalg_engine::persistence::{IndexKind, Row, Schema, Table};
use relalg_engine::row;

pub fn movie_schema() -> Schema {
    Schema::parse(
        "title year length genre studioName",
        "String Integer Integer String String",
    )
    .unwrap()
}

pub fn movie_with(kind: IndexKind) -> Table {
    let mut movie = Table::with_index("movie", movie_schema(), &["title", "year"], kind).unwrap();
    movie
        .insert_many(vec![
            row!["StarWars", 1977, 124, "scifi", "Fox"],
            row!["Rocky", 1976, 119, "drama", "United"],
        ])
        .unwrap();
    movie
}

pub fn movie() -> Table {
    movie_with(IndexKind::TreeMap)
}

pub fn cinema() -> Table {
    let mut cinema = Table::new("cinema", movie_schema(), &["title", "year"]).unwrap();
    cinema
        .insert_many(vec![
            row!["Rocky", 1976, 119, "drama", "United"],
            row!["Alien", 1979, 117, "scifi", "Paramount"],
        ])
        .unwrap();
    cinema
}

pub fn studio_with(kind: IndexKind) -> Table {
    let schema = Schema::parse("name address", "String String").unwrap();
    let mut studio = Table::with_index("studio", schema, &["name"], kind).unwrap();
    studio
        .insert_many(vec![row!["Fox", "LA"], row!["Paramount", "Hollywood"]])
        .unwrap();
    studio
}

pub fn studio() -> Table {
    studio_with(IndexKind::TreeMap)
}

pub fn sorted(rows: &[Row]) -> Vec<Row> {
    let mut rows = rows.to_vec();
    rows.sort();
    rows
}
