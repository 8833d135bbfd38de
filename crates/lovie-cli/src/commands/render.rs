use comfy_table::{Attribute, Cell, Color, Table};
use movie_log_models::{MovieDetail, SearchResult, WatchedEntry, WatchedSummary};

fn styled_table() -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn header(label: &str) -> Cell {
    Cell::new(label).fg(Color::Cyan).add_attribute(Attribute::Bold)
}

pub fn results_table(movies: &[SearchResult]) -> Table {
    let mut table = styled_table();
    table.set_header(vec![header("#"), header("Title"), header("Year"), header("Type"), header("IMDb ID")]);
    for (idx, movie) in movies.iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(&movie.title),
            Cell::new(&movie.year),
            Cell::new(movie.media_type),
            Cell::new(&movie.imdb_id),
        ]);
    }
    table
}

pub fn detail_table(detail: &MovieDetail, watched: Option<&WatchedEntry>) -> Table {
    let mut table = styled_table();
    table.set_header(vec![header(&detail.title)]);

    let released = detail
        .release_date()
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| detail.released.clone());

    let rows: Vec<(&str, String)> = vec![
        ("IMDb ID", detail.imdb_id.clone()),
        ("Released", released),
        ("Runtime", format!("{} min", detail.runtime_minutes)),
        ("IMDb rating", critics_rating(detail.imdb_rating, detail.imdb_votes)),
        ("Director", detail.director.clone()),
        ("Starring", detail.actors.join(", ")),
        ("Genre", detail.genres.join(", ")),
        ("Plot", detail.plot.clone()),
        ("Poster", detail.poster.clone().unwrap_or_else(|| "-".to_string())),
        ("Your rating", watched.map(|w| format!("{}/10", w.user_rating)).unwrap_or_else(|| "not watched".to_string())),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label).add_attribute(Attribute::Bold), Cell::new(value)]);
    }
    table
}

pub fn watched_table(entries: &[WatchedEntry]) -> Table {
    let mut table = styled_table();
    table.set_header(vec![
        header("Title"),
        header("IMDb"),
        header("Yours"),
        header("Runtime"),
        header("IMDb ID"),
    ]);
    for entry in entries {
        table.add_row(vec![
            Cell::new(&entry.title),
            Cell::new(critics_rating(entry.imdb_rating, None)),
            Cell::new(entry.user_rating),
            Cell::new(format!("{} min", entry.runtime_minutes)),
            Cell::new(&entry.imdb_id),
        ]);
    }
    table
}

pub fn summary_table(summary: &WatchedSummary) -> Table {
    let mut table = styled_table();
    table.set_header(vec![header("Watched"), header("Avg IMDb"), header("Avg yours"), header("Avg runtime")]);
    table.add_row(vec![
        Cell::new(summary.count),
        Cell::new(format!("{:.1}", summary.avg_imdb_rating)),
        Cell::new(format!("{:.1}", summary.avg_user_rating)),
        Cell::new(format!("{:.0} min", summary.avg_runtime)),
    ]);
    table
}

fn critics_rating(rating: Option<f64>, votes: Option<u64>) -> String {
    match (rating, votes) {
        (Some(rating), Some(votes)) => format!("{:.1} ({} votes)", rating, votes),
        (Some(rating), None) => format!("{:.1}", rating),
        (None, _) => "N/A".to_string(),
    }
}
