use clap::Parser;
use rkc::{BuildError, Cli, Commands, Config, LogLevel, commands};
use tracing_subscriber::EnvFilter;

fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // an explicit builder makes the config file irrelevant
    let config = match cli.global.builder {
        Some(_) => Config::default(),
        None => Config::load()?,
    };

    match cli.command {
        Commands::Build(build_args) => commands::build(&cli.global, &build_args, &config)?,
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.global.log_level);

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:?}");
        let exit_code = err
            .downcast_ref::<BuildError>()
            .map_or(1, BuildError::exit_code);
        std::process::exit(exit_code);
    }
}
