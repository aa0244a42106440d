use std::process;

use clap::{CommandFactory, Parser, error::ErrorKind};
use log::error;
use relalg_engine::cli::{
    self, logger,
    parsers::{CliMode, CliParser},
};
use relalg_engine::config::EngineConfig;

fn main() {
    let args = CliParser::parse();
    logger::init(args.verbose);

    let mut config = match EngineConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("err: {}", err);
            process::exit(2);
        }
    };
    args.apply(&mut config);

    let outcome = match (args.mode, args.table.as_deref()) {
        (Some(CliMode::Demo), _) => cli::run_demo(&config),
        (Some(CliMode::Show), Some(name)) => cli::show_table(&config, name),
        (Some(CliMode::Index), Some(name)) => cli::show_index(&config, name),
        (Some(CliMode::Spill), Some(name)) => cli::spill_table(&config, name),
        _ => CliParser::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "this mode needs a <TABLE> argument",
            )
            .exit(),
    };

    if let Err(err) = outcome {
        error!("err: {}", err);
        process::exit(1);
    }
}
