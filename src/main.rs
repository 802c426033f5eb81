use fastfetch::cli::{self, Action};
use fastfetch::{logo, Result};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_env("FASTFETCH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    init_logging();

    let args = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned());

    let options = match cli::parse_args(args) {
        Ok(Action::Run(options)) => options,
        Ok(action) => return finish(run_action(action).map_err(Into::into)),
        Err(err) => {
            println!("{}", err);
            return ExitCode::from(err.exit_code());
        }
    };

    let stdout = io::stdout();
    finish(fastfetch::run(&options, stdout.lock()))
}

/// Help and logo listing; these never touch the config or the system
fn run_action(action: Action) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match action {
        Action::Help(topic) => out.write_all(topic.text().as_bytes())?,
        Action::ListLogos => logo::list_logos(&mut out)?,
        Action::PrintLogos => logo::print_logos(&mut out)?,
        Action::Run(_) => {}
    }
    out.flush()
}

fn finish(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        // a closed pipe is not worth an error message
        Err(err) if err.is_broken_pipe() => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("fastfetch: {}", err);
            ExitCode::FAILURE
        }
    }
}
