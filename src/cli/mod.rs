//! This module is where all the commands are run.
//!
//! Relalg command line syntax:
//!
//! - relalg --help          | Command Line Help
//! - relalg demo            | Build the movie database and run every operator.
//! - relalg show <table>    | Print a saved table.
//! - relalg index <table>   | Print the index of a saved table.
//! - relalg spill <table>   | Write a saved table into a tuple store.
//!
//! Every mode reads its settings from [`EngineConfig`]; `--store` and
//! `--index` override them.

use colored::Colorize;

use crate::{
    cli::{
        colors::RELALG_TEAL,
        messages::{highlight_argument, system_message},
    },
    config::EngineConfig,
    persistence::{Database, KeyType, PersistenceError, Result, Table, Value},
    row,
};

mod colors;
pub mod logger;
mod messages;
pub mod parsers;

const DEMO_DATABASE: &str = "movies";

pub fn build_movie_database(config: &EngineConfig) -> Result<Database> {
    //! The six tables of the movie database, filled with a few rows each.

    let mut database = open_database(config);

    let film0 = row!["Star_Wars", 1977, 124, "sciFi", "Fox", 12345];
    let film1 = row!["Star_Wars_2", 1980, 124, "sciFi", "Fox", 12345];
    let film2 = row!["Rocky", 1985, 200, "action", "Universal", 12125];
    let film3 = row!["Rambo", 1978, 100, "action", "Universal", 32355];
    let film4 = row!["Galaxy_Quest", 1999, 104, "comedy", "DreamWorks", 67890];

    database
        .create_table(
            "movie",
            "title year length genre studioName producerNo",
            "String Integer Integer String String Integer",
            "title year",
        )?
        .insert_many(vec![film0, film1, film2.clone(), film3.clone()])?;

    database
        .create_table(
            "cinema",
            "title year length genre studioName producerNo",
            "String Integer Integer String String Integer",
            "title year",
        )?
        .insert_many(vec![film2, film3, film4])?;

    database
        .create_table(
            "movieStar",
            "name address gender birthdate",
            "String String Character String",
            "name",
        )?
        .insert_many(vec![
            row!["Carrie_Fisher", "Hollywood", 'F', "9/9/99"],
            row!["Mark_Hamill", "Brentwood", 'M', "8/8/88"],
            row!["Harrison_Ford", "Beverly_Hills", 'M', "7/7/77"],
        ])?;

    database
        .create_table(
            "starsIn",
            "movieTitle movieYear starName",
            "String Integer String",
            "movieTitle movieYear starName",
        )?
        .insert_many(vec![
            row!["Star_Wars", 1977, "Carrie_Fisher"],
            row!["Star_Wars", 1977, "Mark_Hamill"],
            row!["Star_Wars_2", 1980, "Harrison_Ford"],
        ])?;

    database
        .create_table(
            "movieExec",
            "certNo name address fee",
            "Integer String String Double",
            "certNo",
        )?
        .insert_many(vec![
            row![9999, "S_Spielberg", "Hollywood", 10000.00],
            row![7777, "G_Lucas", "Marin_County", 12000.00],
        ])?;

    database
        .create_table("studio", "name address presNo", "String String Integer", "name")?
        .insert_many(vec![
            row!["Fox", "Los_Angeles", 7777],
            row!["Universal", "Universal_City", 8888],
            row!["DreamWorks", "Universal_City", 9999],
        ])?;

    Ok(database)
}

fn demo_table<'a>(database: &'a Database, name: &str) -> Result<&'a Table> {
    database.get_table(name).ok_or_else(|| {
        PersistenceError::NotFound {
            name: name.to_string(),
            path: database.snapshot_path(name),
        }
        .into()
    })
}

fn print_result(title: &str, table: &Table) {
    println!();
    println!(
        "{}",
        system_message("result", highlight_argument(title))
    );
    println!("{}", table);
}

pub fn run_demo(config: &EngineConfig) -> Result<()> {
    //! Build the movie database, exercise every operator on it and save the
    //! base tables to the store directory.

    let database = build_movie_database(config)?;
    let movie = demo_table(&database, "movie")?;
    let cinema = demo_table(&database, "cinema")?;
    let movie_star = demo_table(&database, "movieStar")?;
    let stars_in = demo_table(&database, "starsIn")?;
    let movie_exec = demo_table(&database, "movieExec")?;
    let studio = demo_table(&database, "studio")?;

    for name in database.table_names() {
        if let Some(table) = database.get_table(&name) {
            print_result(&name, table);
        }
    }

    print_result("project title year", &movie.project(&["title", "year"])?);
    print_result(
        "select year == 1977 (predicate)",
        &movie.select(|row| row[1] == Value::Integer(1977)),
    );
    print_result(
        "select year < 1980 AND genre == 'sciFi'",
        &movie.select_where("year < 1980 AND genre == 'sciFi'")?,
    );
    print_result(
        "select key (Rambo, 1978)",
        &movie.select_key(&KeyType::from(row!["Rambo", 1978])),
    );
    print_result("movie union cinema", &movie.union(cinema)?);
    print_result("movie minus cinema", &movie.minus(cinema)?);
    print_result(
        "movie join studio on studioName = name",
        &movie.equi_join(&["studioName"], &["name"], studio)?,
    );
    print_result(
        "studio join movieExec on presNo == certNo",
        &studio.theta_join("presNo == certNo", movie_exec)?,
    );
    print_result(
        "movie join movieExec on producerNo > certNo",
        &movie.theta_join("producerNo > certNo", movie_exec)?,
    );

    if movie.is_indexed() {
        print_result(
            "movie i_join studio on studioName = name",
            &movie.indexed_join(&["studioName"], &["name"], studio)?,
        );
        print_result(
            "starsIn i_join movieStar on starName = name",
            &stars_in.indexed_join(&["starName"], &["name"], movie_star)?,
        );
    }

    print_result("movie natural join cinema", &movie.natural_join(cinema)?);

    println!();
    print_index(movie);

    let n_saved = database.save_all()?;
    println!();
    println!(
        "{}",
        system_message(
            "relalg",
            format!(
                "{} tables saved to '{}'.",
                n_saved,
                highlight_argument(&database.store().display().to_string())
            )
        )
    );

    Ok(())
}

fn open_database(config: &EngineConfig) -> Database {
    Database::new(DEMO_DATABASE, config.store_dir.clone()).with_index_kind(config.index_kind)
}

fn print_index(table: &Table) {
    println!(
        "{}",
        system_message(
            "index",
            format!(
                "Index of {} ({})",
                highlight_argument(table.name()),
                table.index_kind()
            )
        )
    );

    for (key, row) in table.index_entries() {
        println!("{:30} {}", key.to_string().color(RELALG_TEAL), row);
    }
}

pub fn show_table(config: &EngineConfig, name: &str) -> Result<()> {
    let table = open_database(config).load(name)?;
    println!("{}", table);
    Ok(())
}

pub fn show_index(config: &EngineConfig, name: &str) -> Result<()> {
    let table = open_database(config).load(name)?;
    print_index(&table);
    Ok(())
}

pub fn spill_table(config: &EngineConfig, name: &str) -> Result<()> {
    //! Copy a saved table into `<store>/<name>.dat` and read the first
    //! record back as a check.

    let database = open_database(config);
    let table = database.load(name)?;
    let file_list = database.spill(&table, config.string_width)?;

    println!(
        "{}",
        system_message(
            "spill",
            format!(
                "{} records of {} bytes written to '{}'.",
                file_list.len(),
                file_list.record_size(),
                highlight_argument(&file_list.path().display().to_string())
            )
        )
    );
    if !file_list.is_empty() {
        println!("{}", system_message("spill", format!("record 0: {}", file_list.get(0)?)));
    }

    file_list.close()
}
