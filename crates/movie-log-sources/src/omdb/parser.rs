use crate::error::SourceError;

const NOT_AVAILABLE: &str = "N/A";

fn is_missing(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == NOT_AVAILABLE
}

/// Minutes from OMDb's runtime text ("148 min"): the leading number of the
/// first token.
pub fn parse_runtime(runtime: &str) -> Result<u32, SourceError> {
    let first = runtime.split_whitespace().next().unwrap_or("");
    let digits: String = first.chars().take_while(|c| c.is_ascii_digit()).collect();

    if digits.is_empty() {
        return Err(SourceError::Parse(format!("runtime '{}' has no numeric value", runtime.trim())));
    }

    digits
        .parse::<u32>()
        .map_err(|e| SourceError::Parse(format!("runtime '{}' is out of range: {}", runtime.trim(), e)))
}

/// Critics' rating ("8.7"); `None` when the API has none
pub fn parse_rating(rating: &str) -> Option<f64> {
    if is_missing(rating) {
        return None;
    }
    rating.trim().parse::<f64>().ok().filter(|r| r.is_finite())
}

/// Vote count with thousands separators ("2,081,403")
pub fn parse_votes(votes: &str) -> Option<u64> {
    if is_missing(votes) {
        return None;
    }
    votes.trim().replace(',', "").parse::<u64>().ok()
}

/// Comma separated names or genres
pub fn split_list(value: &str) -> Vec<String> {
    if is_missing(value) {
        return Vec::new();
    }
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
