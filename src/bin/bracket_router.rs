use bracket_router::cli::{run_cli, Cli};
use bracket_router::otel::{init_logging_with_config, LogConfig};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let _guard = match init_logging_with_config(&LogConfig::from_env()) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("error: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();
    match run_cli(cli, &mut stdout) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}
