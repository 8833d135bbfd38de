use crate::output::Output;
use color_eyre::Result;
use dialoguer::{Confirm, Input, Password, Select};
use movie_log_core::{RatingSession, MAX_RATING, MIN_RATING};

/// Prompt for a string value with optional default
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input_builder = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true);

    if let Some(default_value) = default {
        input_builder = input_builder.default(default_value.to_string());
    }

    input_builder.interact_text().map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

/// Prompt for a secret (masked input)
pub fn prompt_password(prompt: &str) -> Result<String> {
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read confirmation: {}", e))
}

/// Pick one of `items`; `None` when the user backs out with Esc or q
pub fn prompt_select(prompt: &str, items: &[String]) -> Result<Option<usize>> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact_opt()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read selection: {}", e))
}

/// Ask for a 1-10 rating until a valid one is given, recording every
/// change of mind in `session`.
///
/// An empty answer keeps the current choice; with no choice yet it means
/// the user skipped rating.
pub fn prompt_rating(session: &mut RatingSession, output: &Output) -> Result<Option<u8>> {
    loop {
        let current = session.rating().map(|r| r.to_string());
        let input = prompt_string(
            &format!("Your rating ({}-{}, empty to {})", MIN_RATING, MAX_RATING, if current.is_some() { "keep" } else { "skip" }),
            None,
        )?;

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(session.rating());
        }

        let parsed = match trimmed.parse::<u8>() {
            Ok(rating) => rating,
            Err(_) => {
                output.error("Invalid input. Please enter a whole number.");
                continue;
            }
        };

        if let Err(e) = session.set_rating(parsed) {
            output.error(e.to_string());
            continue;
        }

        if prompt_yes_no(&format!("Save {}/10?", parsed), true)? {
            return Ok(session.rating());
        }
    }
}
