use super::render;
use crate::output::Output;
use color_eyre::Result;
use movie_log_config::{Config, PathManager};
use movie_log_models::{MovieDetail, WatchedEntry};
use movie_log_sources::OmdbClient;
use serde_json::json;
use tokio_util::sync::CancellationToken;

pub async fn run_details(imdb_id: &str, config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    let client = super::omdb_client(config, paths)?;
    let detail = fetch_detail(&client, imdb_id).await?;
    let watched = super::open_watched(config, paths)?;

    show_detail(&detail, watched.get(&detail.imdb_id), output);
    Ok(())
}

/// Fetch one title; Ctrl-C aborts the request
pub(crate) async fn fetch_detail(client: &OmdbClient, imdb_id: &str) -> Result<MovieDetail> {
    let cancel = CancellationToken::new();
    let request = client.details(imdb_id, &cancel);
    tokio::pin!(request);

    let finished = tokio::select! {
        outcome = &mut request => Some(outcome),
        _ = tokio::signal::ctrl_c() => None,
    };
    let outcome = match finished {
        Some(outcome) => outcome,
        None => {
            cancel.cancel();
            request.await
        }
    };

    outcome.map_err(|e| color_eyre::eyre::eyre!("Failed to load details for {}: {}", imdb_id, e))
}

pub(crate) fn show_detail(detail: &MovieDetail, watched: Option<&WatchedEntry>, output: &Output) {
    if output.is_human() {
        println!("{}", render::detail_table(detail, watched));
    } else {
        output.json(&json!({
            "type": "details",
            "movie": detail,
            "watched": watched,
        }));
    }
}
