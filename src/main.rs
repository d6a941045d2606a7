//! Entry point for the translation publisher.

use std::process::ExitCode;

use clap::Parser;
use lang_publisher::cli::{
    self,
    Cli,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[allow(clippy::print_stdout, clippy::print_stderr)]
fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = init_tracing(&cli);

    match cli::run(&cli) {
        Ok(output) => {
            for line in &output.lines {
                println!("{line}");
            }
            if output.success { ExitCode::SUCCESS } else { ExitCode::FAILURE }
        }
        Err(error) => {
            tracing::error!("Configuration error: {}", error);
            eprintln!("{error}");
            ExitCode::from(2)
        }
    }
}

/// `RUST_LOG` が設定されていればそれを優先し、なければ `-v` の回数でレベルを決める
fn init_tracing(cli: &Cli) -> Option<WorkerGuard> {
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let Some(log_file) = &cli.log_file else {
        tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
        return None;
    };

    let directory = log_file.parent().filter(|p| !p.as_os_str().is_empty());
    let file_name = log_file.file_name().map_or_else(
        || std::ffi::OsString::from("lang-publisher.log"),
        std::ffi::OsStr::to_os_string,
    );
    let appender = tracing_appender::rolling::never(
        directory.unwrap_or_else(|| std::path::Path::new(".")),
        file_name,
    );
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(writer).with_ansi(false).init();
    Some(guard)
}
