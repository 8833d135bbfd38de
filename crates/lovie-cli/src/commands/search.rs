use super::render;
use crate::output::Output;
use color_eyre::Result;
use movie_log_config::{Config, PathManager};
use movie_log_core::SearchState;
use serde_json::json;

pub async fn run_search(query: &str, config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    tracing::debug!(query = %query, "Search command started");

    let client = super::omdb_client(config, paths)?;
    let mut controller = super::new_controller(client, config);

    let state = super::run_query(&mut controller, query).await;
    report(&state, query, config, output)
}

/// Print a settled search state; an error state fails the command
pub(crate) fn report(state: &SearchState, query: &str, config: &Config, output: &Output) -> Result<()> {
    match state {
        SearchState::Idle if query.trim().chars().count() < config.search.min_query_len => {
            output.warn(format!(
                "Query too short: type at least {} characters",
                config.search.min_query_len
            ));
            Ok(())
        }
        SearchState::Idle | SearchState::Loading { .. } => {
            output.warn("Search canceled");
            Ok(())
        }
        SearchState::Success { query, movies } => {
            if output.is_human() {
                println!("{}", render::results_table(movies));
                output.info(format!("{} result(s) for \"{}\"", movies.len(), query));
            } else {
                output.json(&json!({
                    "type": "search",
                    "query": query,
                    "results": movies,
                }));
            }
            Ok(())
        }
        SearchState::Error { query, message } => {
            Err(color_eyre::eyre::eyre!("Search for \"{}\" failed: {}", query, message))
        }
    }
}
