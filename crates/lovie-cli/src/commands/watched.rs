use super::{details, prompts, render};
use crate::output::Output;
use color_eyre::Result;
use movie_log_config::{Config, PathManager};
use movie_log_core::{FileStore, RatingSession, WatchedList};
use movie_log_models::MovieDetail;
use serde_json::json;

pub async fn run_rate(
    imdb_id: &str,
    rating: Option<u8>,
    config: &Config,
    paths: &PathManager,
    output: &Output,
) -> Result<()> {
    let client = super::omdb_client(config, paths)?;
    let detail = details::fetch_detail(&client, imdb_id).await?;
    let mut watched = super::open_watched(config, paths)?;

    if rating.is_none() {
        details::show_detail(&detail, watched.get(&detail.imdb_id), output);
    }
    rate_detail(&detail, rating, &mut watched, output)
}

/// Rate `detail` (prompting unless `preset` is given) and store it.
/// Returns without touching the list when the user skips.
pub(crate) fn rate_detail(
    detail: &MovieDetail,
    preset: Option<u8>,
    watched: &mut WatchedList<FileStore>,
    output: &Output,
) -> Result<()> {
    let mut session = RatingSession::new();
    match preset {
        Some(rating) => session
            .set_rating(rating)
            .map_err(|e| color_eyre::eyre::eyre!("{}", e))?,
        None => {
            if !output.is_human() {
                return Err(color_eyre::eyre::eyre!("--rating is required with --output json or --quiet"));
            }
            prompts::prompt_rating(&mut session, output)?;
        }
    }

    let Some(entry) = session.commit(detail) else {
        output.info("No rating given, nothing saved");
        return Ok(());
    };

    let updating = watched.contains(&entry.imdb_id);
    let user_rating = entry.user_rating;
    watched
        .add(entry)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save watched list: {}", e))?;

    if output.is_human() {
        let verb = if updating { "Updated" } else { "Added" };
        output.success(format!("{} {} ({}/10)", verb, detail.title, user_rating));
    } else {
        output.json(&json!({
            "type": "rated",
            "entry": watched.get(&detail.imdb_id),
            "updated": updating,
        }));
    }
    Ok(())
}

pub fn run_remove(imdb_id: &str, config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    let mut watched = super::open_watched(config, paths)?;

    let Some(title) = watched.get(imdb_id).map(|entry| entry.title.clone()) else {
        output.warn(format!("{} is not on the watched list", imdb_id));
        return Ok(());
    };

    watched
        .remove(imdb_id)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save watched list: {}", e))?;
    output.success(format!("Removed {} ({})", title, imdb_id));
    Ok(())
}

pub fn run_list(config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    let watched = super::open_watched(config, paths)?;
    let summary = watched.summary();

    if output.is_human() {
        if watched.is_empty() {
            output.info("Nothing watched yet. Rate a title with 'lovie rate <IMDB_ID>'.");
            return Ok(());
        }
        println!("{}", render::watched_table(watched.entries()));
        println!("{}", render::summary_table(&summary));
    } else {
        output.json(&json!({
            "type": "watched",
            "entries": watched.entries(),
            "summary": summary,
        }));
    }
    Ok(())
}

pub fn run_summary(config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    let watched = super::open_watched(config, paths)?;
    let summary = watched.summary();

    if output.is_human() {
        println!("{}", render::summary_table(&summary));
    } else {
        output.json(&json!({
            "type": "summary",
            "summary": summary,
        }));
    }
    Ok(())
}
