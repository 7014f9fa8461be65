use std::path::PathBuf;
use std::process::ExitCode;

use sqlbench::console;
use sqlbench::error::user_friendly_message;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Optional positional argument: path to a TOML config file
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);

    match console::run(config_path.as_deref()).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            log::error!("{}", err);
            eprintln!("{}", user_friendly_message(&err));
            ExitCode::FAILURE
        }
    }
}
