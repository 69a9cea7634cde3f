//! Executes parsed commands against the fetch engine and the loaded data.

use crate::error::ParkingError;

use models::{CarparkList, FavouriteChange, Favourites};
use parking_core::api::FetchEngine;
use parking_core::config::{AppConfig, StorageConfig};
use parking_core::error::{ApiError, StorageError};
use parking_core::parser::Command;
use parking_core::parser::grammar;
use parking_core::storage::{self, FileStorage};

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

pub const GOODBYE_MESSAGE: &str = "Goodbye.";
pub const NO_CARPARK_FOUND: &str = "No carpark was found!";
pub const SAVE_ERROR_MESSAGE: &str = "Something went wrong when saving data.";
const NO_DATA_MESSAGE: &str = "No carpark data loaded. Use `update` to fetch the latest data.";

/// What the console should print after a command, and whether to stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub message: String,
    pub exit: bool,
}

impl Outcome {
    pub fn reply(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit: false,
        }
    }

    pub fn exit(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit: true,
        }
    }
}

/// Everything one console run works on.
pub struct Session {
    engine: FetchEngine,
    carparks: CarparkList,
    favourites: Favourites,
    data_dir: PathBuf,
    files: StorageConfig,
}

impl Session {
    /// # Errors
    /// [`ParkingError::Core`] if the fetch engine cannot be built from `config`.
    pub fn new(config: &AppConfig, data_dir: impl Into<PathBuf>) -> Result<Self, ParkingError> {
        let data_dir = data_dir.into();
        let storage = FileStorage::new(&data_dir, config.storage.data_file.clone());
        let engine = FetchEngine::new(&config.api, storage)?;

        Ok(Self {
            engine,
            carparks: CarparkList::default(),
            favourites: Favourites::default(),
            data_dir,
            files: config.storage.clone(),
        })
    }

    pub fn engine(&self) -> &FetchEngine {
        &self.engine
    }

    pub fn carparks(&self) -> &CarparkList {
        &self.carparks
    }

    pub fn favourites(&self) -> &Favourites {
        &self.favourites
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load the key, fetch fresh data, then load carparks and favourites.
    ///
    /// Nothing here is fatal: every problem becomes a line for the user and
    /// the session carries on with whatever could be loaded.
    pub async fn start(&mut self) -> Vec<String> {
        let mut notes = Vec::new();

        self.load_api_key(&mut notes);

        if let Err(error) = self.engine.fetch_with_retry().await {
            notes.push(error.user_message());
        }

        match self.reload_carparks() {
            Ok(count) => info!("Loaded {count} carparks at startup"),
            Err(error) => {
                warn!("No carpark data at startup: {error}");
                notes.push(String::from(NO_DATA_MESSAGE));
            }
        }

        self.load_favourites(&mut notes);
        notes.push(self.engine.status_message());
        notes
    }

    fn load_api_key(&mut self, notes: &mut Vec<String>) {
        let secret_file = self.files.secret_file.clone();
        match self.engine.load_credential(&secret_file, &self.data_dir, true) {
            Ok(()) => {}
            Err(error @ ApiError::NoFileFound { .. }) => {
                notes.push(error.user_message());
                if let Err(e) = storage::write_string_to_text(&secret_file, &self.data_dir, "") {
                    warn!("Could not create secret file: {e}");
                    notes.push(String::from("Something wrong happened in file creation."));
                }
                self.engine.load_default_credential();
            }
            Err(error) => notes.push(error.user_message()),
        }
    }

    fn load_favourites(&mut self, notes: &mut Vec<String>) {
        match storage::read_string_from_text(&self.files.favourite_file, &self.data_dir) {
            Ok(text) => {
                self.favourites = Favourites::from_text(&text);
                debug!("Loaded {} favourites", self.favourites.ids().len());
            }
            Err(StorageError::NotFound { .. }) => {
                debug!("No favourites file yet");
            }
            Err(error) => {
                warn!("Could not read favourites: {error}");
                notes.push(String::from("Could not read your favourites."));
            }
        }
    }

    /// Reload carparks from the data file, falling back to the backup.
    ///
    /// A good data file is copied over the backup.
    ///
    /// # Errors
    /// The backup's error when neither file can be decoded.
    pub fn reload_carparks(&mut self) -> Result<usize, ParkingError> {
        let list = match self.read_carpark_file(&self.files.data_file) {
            Ok((list, raw)) => {
                if let Err(e) =
                    storage::write_string_to_text(&self.files.backup_file, &self.data_dir, &raw)
                {
                    warn!("Could not refresh backup: {e}");
                }
                list
            }
            Err(error) => {
                warn!("Data file unusable, trying backup: {error}");
                let (list, _) = self.read_carpark_file(&self.files.backup_file)?;
                list
            }
        };

        let count = list.len();
        self.carparks = list;
        Ok(count)
    }

    fn read_carpark_file(&self, file: &str) -> Result<(CarparkList, String), ParkingError> {
        let raw = storage::read_string_from_text(file, &self.data_dir)?;
        let list = CarparkList::from_lta_json(&raw)?;
        Ok((list, raw))
    }

    pub async fn execute(&mut self, command: Command) -> Outcome {
        debug!("Executing {command:?}");
        match command {
            Command::Authenticate { credential } => self.authenticate(&credential).await,
            Command::Refresh => self.refresh().await,
            Command::Find { carpark_id } => self.find(&carpark_id),
            Command::Filter { query } => self.filter(&query),
            Command::Favourite { carpark_id } => self.favourite(&carpark_id),
            Command::Unfavourite { carpark_id } => self.unfavourite(&carpark_id),
            Command::List => self.list(),
            Command::Help => Outcome::reply(grammar::help_text()),
            Command::Exit => Outcome::exit(GOODBYE_MESSAGE),
            Command::Invalid { message } => Outcome::reply(message),
        }
    }

    async fn authenticate(&mut self, credential: &str) -> Outcome {
        if let Err(error) = self.engine.try_authenticate(credential).await {
            return Outcome::reply(format!(
                "{}\n{}",
                error.user_message(),
                self.engine.status_message()
            ));
        }

        if let Err(e) =
            storage::write_string_to_text(&self.files.secret_file, &self.data_dir, credential)
        {
            warn!("Could not save API key: {e}");
        }

        let mut lines = vec![self.engine.status_message()];
        if let Err(e) = self.reload_carparks() {
            warn!("Fetched data could not be loaded: {e}");
            lines.push(String::from(NO_DATA_MESSAGE));
        }
        Outcome::reply(lines.join("\n"))
    }

    async fn refresh(&mut self) -> Outcome {
        if let Err(error) = self.engine.refresh().await {
            return Outcome::reply(error.user_message());
        }

        match self.reload_carparks() {
            Ok(count) => Outcome::reply(format!("Data updated: {count} carparks loaded.")),
            Err(e) => {
                warn!("Fetched data could not be loaded: {e}");
                Outcome::reply(NO_DATA_MESSAGE)
            }
        }
    }

    fn find(&self, carpark_id: &str) -> Outcome {
        match self.carparks.find(carpark_id) {
            Some(carpark) if self.favourites.contains(&carpark.id) => {
                Outcome::reply(format!("{carpark}\n(favourite)"))
            }
            Some(carpark) => Outcome::reply(carpark.to_string()),
            None => Outcome::reply(NO_CARPARK_FOUND),
        }
    }

    fn filter(&self, query: &str) -> Outcome {
        let matches = self.carparks.filter(query);
        if matches.is_empty() {
            return Outcome::reply(NO_CARPARK_FOUND);
        }
        Outcome::reply(
            matches
                .iter()
                .map(|carpark| carpark.summary())
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }

    fn list(&self) -> Outcome {
        if self.carparks.is_empty() {
            return Outcome::reply(NO_DATA_MESSAGE);
        }
        Outcome::reply(
            self.carparks
                .iter()
                .map(|carpark| carpark.summary())
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }

    fn favourite(&mut self, carpark_id: &str) -> Outcome {
        let Some(carpark) = self.carparks.find(carpark_id) else {
            return Outcome::reply(NO_CARPARK_FOUND);
        };
        let id = carpark.id.clone();

        match self.favourites.add(&id) {
            FavouriteChange::AlreadyPresent => {
                Outcome::reply(format!("Carpark {id} is already in your favourites."))
            }
            _ => self.save_favourites(format!("Added Carpark {id} to favourites!")),
        }
    }

    fn unfavourite(&mut self, carpark_id: &str) -> Outcome {
        match self.favourites.remove(carpark_id) {
            FavouriteChange::NotPresent => {
                Outcome::reply(format!("Carpark {carpark_id} is not in your favourites."))
            }
            _ => self.save_favourites(format!("Removed Carpark {carpark_id} from favourites!")),
        }
    }

    fn save_favourites(&self, confirmation: String) -> Outcome {
        match storage::write_string_to_text(
            &self.files.favourite_file,
            &self.data_dir,
            &self.favourites.to_text(),
        ) {
            Ok(()) => Outcome::reply(confirmation),
            Err(e) => {
                warn!("Could not save favourites: {e}");
                Outcome::reply(format!("{confirmation}\n{SAVE_ERROR_MESSAGE}"))
            }
        }
    }
}
