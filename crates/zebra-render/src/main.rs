#![forbid(unsafe_code)]

use std::env;
use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::EnvFilter;
use zebra_render::cli::Opts;
use zebra_render::session;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = env::var("ZEBRA_LOG_JSON")
        .is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

fn main() -> ExitCode {
    init_tracing();
    let opts = Opts::parse();

    let config = match opts.config.as_deref() {
        Some(path) => session::load_config(path, |key| env::var(key).ok()),
        None => Ok(session::env_config()),
    };
    let result = config.and_then(|config| session::run(&opts, config));
    match result {
        Ok(report) => {
            println!("{}", report.to_json());
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
