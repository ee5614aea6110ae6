pub mod app;
pub mod archive;
pub mod args;
pub mod files;
pub mod reader;

use clap::Parser;
use color_eyre::eyre::Error;
use tracing_subscriber::EnvFilter;

use crate::{
    app::App,
    args::Args,
    files::{
        AppFiles,
        Config,
    },
    reader::Input,
};

fn main() -> Result<(), Error> {
    let _ = dotenvy::dotenv();
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting psat-cli");
    let args = Args::parse();
    tracing::debug!(?args);

    let result = run(args);

    if let Err(error) = &result {
        tracing::error!(?error);
    }
    else {
        tracing::info!("Program exiting");
    }

    result
}

fn run(args: Args) -> Result<(), Error> {
    let config = match &args.config {
        Some(path) => Config::from_path(path)?,
        None => AppFiles::new()?.config()?,
    };
    tracing::debug!(?config);

    let input = Input::read(args.command.input())?;
    let mut app = App::new(&args, config)?;

    let mut stdout = std::io::stdout().lock();
    app.run(&args.command, &input, &mut stdout)
}
