use parking::error::ParkingError;
use parking::logger::initialize as LoggerInitialize;
use parking::session::Session;
use parking::ui::{LOADED_MESSAGE, LOADING_MESSAGE, Ui};

use parking_core::config::{AppConfig, detect_config_dir, load_dotenv, resolve_data_dir};
use parking_core::parser::parse_command;

use std::process::ExitCode;

use log::{error, info};

const LOG_DIR_NAME: &str = "logs";

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("parKING could not start: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ParkingError> {
    let dotenv_path = load_dotenv();

    let (config_dir, config_source) = detect_config_dir()?;
    let config = AppConfig::load(&config_dir)?;
    let data_dir = resolve_data_dir(&config.storage);

    // Logger FIRST, everything after this is recorded
    LoggerInitialize(&data_dir.join(LOG_DIR_NAME))?;

    info!("parKING starting");
    if let Some(path) = dotenv_path {
        info!("Environment loaded from {}", path.display());
    }
    info!("Config directory: {} ({config_source})", config_dir.display());
    info!("Data directory: {}", data_dir.display());

    let mut ui = Ui::stdio();
    ui.greet_user()?;

    let mut session = Session::new(&config, data_dir)?;
    ui.print(LOADING_MESSAGE)?;
    for note in session.start().await {
        ui.print(&note)?;
    }
    ui.print(LOADED_MESSAGE)?;

    while let Some(line) = ui.read_command()? {
        let outcome = session.execute(parse_command(&line)).await;
        ui.print(&outcome.message)?;
        if outcome.exit {
            break;
        }
    }

    info!("parKING stopped");
    Ok(())
}
