use super::{details, prompts, render, search, watched};
use crate::output::Output;
use color_eyre::Result;
use movie_log_config::{Config, PathManager};
use movie_log_core::SearchState;
use owo_colors::OwoColorize;

/// Interactive loop: query, pick a result, view it, rate it.
///
/// A single controller lives for the whole session so each new query
/// supersedes whatever the previous one left running.
pub async fn run_browse(config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    if !output.is_human() {
        return Err(color_eyre::eyre::eyre!("browse is interactive; use --output human without --quiet"));
    }

    let client = super::omdb_client(config, paths)?;
    let mut controller = super::new_controller(client.clone(), config);
    let mut watched_list = super::open_watched(config, paths)?;

    output.println(format!("{}", "Lovie".bold().bright_cyan()));
    output.println("Type a title to search, or leave empty to quit.");

    loop {
        let query = prompts::prompt_string("Search", None)?;
        if query.trim().is_empty() {
            break;
        }

        let state = super::run_query(&mut controller, &query).await;
        let movies = match &state {
            SearchState::Success { movies, .. } if !movies.is_empty() => movies.clone(),
            SearchState::Error { message, .. } => {
                output.error(message);
                continue;
            }
            _ => {
                // Short query or Ctrl-C
                search::report(&state, &query, config, output)?;
                continue;
            }
        };

        println!("{}", render::results_table(&movies));
        let labels: Vec<String> = movies
            .iter()
            .map(|m| format!("{} ({}) [{}]", m.title, m.year, m.imdb_id))
            .collect();
        let Some(picked) = prompts::prompt_select("Pick a title (Esc to search again)", &labels)? else {
            continue;
        };

        let detail = match details::fetch_detail(&client, &movies[picked].imdb_id).await {
            Ok(detail) => detail,
            Err(e) => {
                output.error(e.to_string());
                continue;
            }
        };
        details::show_detail(&detail, watched_list.get(&detail.imdb_id), output);

        if prompts::prompt_yes_no("Rate this title?", true)? {
            if let Err(e) = watched::rate_detail(&detail, None, &mut watched_list, output) {
                output.error(e.to_string());
            }
        }
    }

    let summary = watched_list.summary();
    if summary.count > 0 {
        println!("{}", render::summary_table(&summary));
    }
    Ok(())
}
