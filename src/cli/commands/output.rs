//! Text rendering shared by the menu and one-shot commands.
//!
//! Every writer takes a `color` flag; with it off the output is plain text.

use std::io::{self, Write};

use colored::{Color, Colorize};

use crate::constants::limits::MAX_ACTORS_WIDTH;
use crate::domain::YearBounds;
use crate::models::{Movie, QueryFrequency, SearchLogEntry};
use crate::services::Page;

/// Cuts `text` to `max` characters, marking the cut with `...`.
#[must_use]
pub fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max).collect();
    cut.push_str("...");
    cut
}

/// Human-readable form of a search signature.
#[must_use]
pub fn describe_signature(signature: &str) -> String {
    match signature.split_once(':') {
        Some(("title", keyword)) => format!("keyword={keyword}"),
        Some(("genre_year", rest)) => match rest.rsplit_once(':') {
            Some((genre, years)) => format!("genre={genre}, years={years}"),
            None => signature.to_string(),
        },
        _ => signature.to_string(),
    }
}

/// Terminal color for an MPAA rating; unknown ratings stay uncolored.
#[must_use]
pub fn rating_color(rating: &str) -> Option<Color> {
    match rating.trim().to_uppercase().as_str() {
        "G" => Some(Color::BrightGreen),
        "PG" | "PG-13" | "R" => Some(Color::BrightYellow),
        "NC-17" => Some(Color::BrightRed),
        _ => None,
    }
}

fn paint_rating(rating: &str, color: bool) -> String {
    match rating_color(rating) {
        Some(c) if color => rating.color(c).to_string(),
        _ => rating.to_string(),
    }
}

fn heading(text: &str, color: bool) -> String {
    if color {
        text.bright_cyan().bold().to_string()
    } else {
        text.to_string()
    }
}

fn separator(color: bool) -> String {
    let line = "-".repeat(70);
    if color { line.green().to_string() } else { line }
}

fn write_movie(out: &mut impl Write, movie: &Movie, color: bool) -> io::Result<()> {
    let year = movie
        .release_year
        .map_or_else(|| "?".to_string(), |y| y.to_string());
    let rating = paint_rating(movie.rating.as_deref().unwrap_or("-"), color);
    let genre = movie.genre.as_deref().unwrap_or("-");

    writeln!(out, "• {} ({year}) [{rating}] {genre}", movie.title)?;
    if !movie.actors.is_empty() {
        writeln!(
            out,
            "  Actors: {}",
            truncate_text(&movie.actors_joined(), MAX_ACTORS_WIDTH)
        )?;
    }
    Ok(())
}

pub fn write_page(out: &mut impl Write, page: &Page, color: bool) -> io::Result<()> {
    writeln!(out)?;
    let title = format!(
        "Page {} of {} ({} results)",
        page.number, page.total_pages, page.total_items
    );
    writeln!(out, "{}", heading(&title, color))?;
    writeln!(out, "{}", separator(color))?;

    for movie in &page.movies {
        write_movie(out, movie, color)?;
    }

    Ok(())
}

pub fn write_no_results(out: &mut impl Write, color: bool) -> io::Result<()> {
    let message = "No results found.";
    if color {
        writeln!(out, "{}", message.red())
    } else {
        writeln!(out, "{message}")
    }
}

pub fn write_genres(
    out: &mut impl Write,
    genres: &[String],
    bounds: Option<YearBounds>,
    color: bool,
) -> io::Result<()> {
    writeln!(out, "{}", heading("Available Genres:", color))?;
    writeln!(out, "{}", genres.join(", "))?;
    writeln!(out)?;
    match bounds {
        Some(bounds) => writeln!(out, "Available Year Range: {bounds}"),
        None => writeln!(out, "No release years in the catalog."),
    }
}

pub fn write_popular(
    out: &mut impl Write,
    ranked: &[QueryFrequency],
    color: bool,
) -> io::Result<()> {
    if ranked.is_empty() {
        return writeln!(out, "No popular queries found.");
    }

    writeln!(out, "{}", heading("Popular Queries:", color))?;
    writeln!(out, "{}", separator(color))?;
    for (i, frequency) in ranked.iter().enumerate() {
        writeln!(
            out,
            "{}. {} | {} searches | last {}",
            i + 1,
            describe_signature(&frequency.signature),
            frequency.count,
            frequency.last_seen.format("%Y-%m-%d %H:%M:%S")
        )?;
    }
    Ok(())
}

pub fn write_recent(
    out: &mut impl Write,
    entries: &[SearchLogEntry],
    color: bool,
) -> io::Result<()> {
    if entries.is_empty() {
        return writeln!(out, "No recent queries found.");
    }

    writeln!(out, "{}", heading("Recent Queries:", color))?;
    writeln!(out, "{}", separator(color))?;
    for entry in entries {
        writeln!(
            out,
            "• {} | {} | {} results",
            entry.executed_at.format("%Y-%m-%d %H:%M:%S"),
            entry.params.describe(),
            entry.results_count
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn rendered(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn truncate_text_keeps_short_strings() {
        assert_eq!(truncate_text("PENELOPE GUINESS", 85), "PENELOPE GUINESS");
        assert_eq!(truncate_text("", 85), "");
    }

    #[test]
    fn truncate_text_cuts_long_strings() {
        let long = "A".repeat(100);
        let cut = truncate_text(&long, 85);
        assert_eq!(cut.chars().count(), 88);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn truncate_text_counts_chars_not_bytes() {
        assert_eq!(truncate_text("ÉÉÉÉ", 2), "ÉÉ...");
    }

    #[test]
    fn describe_signature_variants() {
        assert_eq!(describe_signature("title:matrix"), "keyword=matrix");
        assert_eq!(
            describe_signature("genre_year:sci-fi:2000-2005"),
            "genre=sci-fi, years=2000-2005"
        );
        assert_eq!(describe_signature("unknown"), "unknown");
    }

    #[test]
    fn page_lists_movies_with_header() {
        let page = Page {
            number: 2,
            total_pages: 3,
            total_items: 23,
            movies: vec![Movie {
                id: 1,
                title: "MATRIX 11".to_string(),
                genre: Some("Sci-Fi".to_string()),
                release_year: None,
                description: None,
                rating: Some("R".to_string()),
                actors: vec!["A".repeat(90)],
            }],
        };

        let text = rendered(|out| write_page(out, &page, false));
        assert!(text.contains("Page 2 of 3 (23 results)"));
        assert!(text.contains("• MATRIX 11 (?) [R] Sci-Fi"));
        assert!(text.contains(&format!("Actors: {}...", "A".repeat(85))));
    }

    #[test]
    fn empty_statistics_say_so() {
        assert_eq!(
            rendered(|out| write_popular(out, &[], false)),
            "No popular queries found.\n"
        );
        assert_eq!(
            rendered(|out| write_recent(out, &[], false)),
            "No recent queries found.\n"
        );
    }

    #[test]
    fn popular_lines_are_numbered() {
        let ranked = vec![QueryFrequency {
            signature: "title:matrix".to_string(),
            count: 3,
            last_seen: Utc::now(),
        }];
        let text = rendered(|out| write_popular(out, &ranked, false));
        assert!(text.contains("1. keyword=matrix | 3 searches"));
    }

    #[test]
    fn ratings_map_to_colors() {
        assert_eq!(rating_color("G"), Some(Color::BrightGreen));
        assert_eq!(rating_color("PG"), Some(Color::BrightYellow));
        assert_eq!(rating_color("pg-13 "), Some(Color::BrightYellow));
        assert_eq!(rating_color("R"), Some(Color::BrightYellow));
        assert_eq!(rating_color("NC-17"), Some(Color::BrightRed));
        assert_eq!(rating_color("-"), None);
        assert_eq!(rating_color(""), None);
    }

    #[test]
    fn plain_output_has_no_escape_codes() {
        let page = Page {
            number: 1,
            total_pages: 1,
            total_items: 1,
            movies: vec![Movie {
                id: 7,
                title: "ACE GOLDFINGER".to_string(),
                genre: Some("Action".to_string()),
                release_year: Some(2001),
                description: None,
                rating: Some("NC-17".to_string()),
                actors: Vec::new(),
            }],
        };

        let text = rendered(|out| write_page(out, &page, false));
        assert!(!text.contains('\u{1b}'));
        assert!(text.contains("[NC-17]"));
        assert_eq!(rendered(|out| write_no_results(out, false)), "No results found.\n");
    }
}
