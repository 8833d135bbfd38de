pub mod browse;
pub mod clear;
pub mod config;
pub mod details;
pub mod prompts;
pub mod render;
pub mod search;
pub mod search_ui;
pub mod watched;

use color_eyre::Result;
use movie_log_config::{Config, CredentialStore, PathManager, API_KEY_ENV};
use movie_log_core::{FileStore, QueryController, SearchState, WatchedList};
use movie_log_sources::OmdbClient;
use search_ui::SearchUI;
use std::sync::Arc;

/// Watched list backed by `<storage dir>/<watched_key>.json`
pub fn open_watched(config: &Config, paths: &PathManager) -> Result<WatchedList<FileStore>> {
    let dir = config.storage_dir(paths);
    WatchedList::load(FileStore::new(&dir), config.storage.watched_key.clone())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load watched list from {}: {}", dir.display(), e))
}

/// OMDb client from config plus the stored (or environment) API key
pub fn omdb_client(config: &Config, paths: &PathManager) -> Result<OmdbClient> {
    let credentials_file = paths.credentials_file();
    let mut cred_store = CredentialStore::new(credentials_file.clone());
    cred_store.load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;

    let api_key = cred_store.omdb_api_key().ok_or_else(|| {
        color_eyre::eyre::eyre!(
            "No OMDb API key configured. Run 'lovie config set-key' or set {}",
            API_KEY_ENV
        )
    })?;

    OmdbClient::from_config(&config.omdb, api_key)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create OMDb client: {}", e))
}

/// Run one query through the controller and wait for its outcome.
///
/// Ctrl-C cancels the request in flight and yields `Idle`.
pub async fn run_query(controller: &mut QueryController<OmdbClient>, query: &str) -> SearchState {
    controller.set_query(query);
    if !controller.state().is_loading() {
        return controller.state();
    }

    let ui = SearchUI::new();
    ui.start(query);
    let settled = tokio::select! {
        state = controller.settled() => Some(state),
        _ = tokio::signal::ctrl_c() => None,
    };
    let state = match settled {
        Some(state) => state,
        None => {
            controller.cancel();
            controller.state()
        }
    };
    ui.finish(&state);
    state
}

pub fn new_controller(client: OmdbClient, config: &Config) -> QueryController<OmdbClient> {
    QueryController::new(Arc::new(client), config.search.min_query_len)
}
