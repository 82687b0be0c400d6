//! Plain-text rendering of orchestrator state.

use std::fmt::Write as _;

use client_core::{Status, ViewState};
use shared::domain::{Character, Episode, Quote};

pub fn render_view(view: &ViewState) -> String {
    match &view.status {
        Status::NotStarted => String::new(),
        Status::Fetching => "Fetching...".to_string(),
        Status::QuoteReady => {
            let mut out = render_quote(&view.quote);
            out.push('\n');
            out.push_str(&render_character(&view.character));
            out
        }
        Status::EpisodeReady => render_episode(&view.episode),
        Status::Failed(err) => format!("Error: {err}"),
    }
}

pub fn render_quote(quote: &Quote) -> String {
    format!("\"{}\"\n    - {}\n", quote.text, quote.character)
}

pub fn render_character(character: &Character) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", character.name);
    let _ = writeln!(out, "Portrayed by: {}", character.portrayed_by);
    let _ = writeln!(out, "Born: {}", character.birthday);
    if !character.occupations.is_empty() {
        let _ = writeln!(out, "Occupations:");
        for occupation in &character.occupations {
            let _ = writeln!(out, "  - {occupation}");
        }
    }
    if !character.aliases.is_empty() {
        let _ = writeln!(out, "Nicknames:");
        for alias in &character.aliases {
            let _ = writeln!(out, "  - {alias}");
        }
    }
    let _ = writeln!(out, "Status: {}", character.status);
    if let Some(death) = &character.death {
        let _ = writeln!(out, "Died: {}", death.details);
        let _ = writeln!(out, "Last words: \"{}\"", death.last_words);
    }
    out
}

pub fn render_episode(episode: &Episode) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", episode.title);
    let _ = writeln!(out, "{}", episode.season_episode());
    let _ = writeln!(out, "{}", episode.synopsis);
    let _ = writeln!(out, "Written by: {}", episode.written_by);
    let _ = writeln!(out, "Directed by: {}", episode.directed_by);
    let _ = writeln!(out, "Aired: {}", episode.air_date);
    out
}
