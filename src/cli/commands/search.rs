use std::io::{self, Write};

use super::output;
use crate::services::{LogOutcome, Page, SearchOutcome, SearchService};

pub async fn cmd_search_title(
    search: &SearchService,
    text: &str,
    page: u64,
    json: bool,
    color: bool,
) -> anyhow::Result<()> {
    let outcome = search.search_title(text).await?;
    print_outcome(search, outcome, page, json, color).await
}

pub async fn cmd_search_genre(
    search: &SearchService,
    genre: &str,
    from: i32,
    to: Option<i32>,
    page: u64,
    json: bool,
    color: bool,
) -> anyhow::Result<()> {
    let outcome = search
        .search_genre_year(genre, from, to.unwrap_or(from))
        .await?;
    print_outcome(search, outcome, page, json, color).await
}

/// An empty search still prints a page object so consumers see one shape.
fn page_json(page: Option<Page>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&page.unwrap_or_else(Page::empty))
}

async fn print_outcome(
    search: &SearchService,
    mut outcome: SearchOutcome,
    page: u64,
    json: bool,
    color: bool,
) -> anyhow::Result<()> {
    if let LogOutcome::Failed(reason) = &outcome.log {
        eprintln!("Warning: this search was not logged ({reason})");
    }

    let page = match outcome.first_page.take() {
        None => None,
        Some(first) if page <= 1 => Some(first),
        Some(_) => Some(outcome.cursor.goto_page(search.catalog(), page).await?),
    };

    let mut out = io::stdout().lock();
    if json {
        writeln!(out, "{}", page_json(page)?)?;
        return Ok(());
    }

    let Some(page) = page else {
        output::write_no_results(&mut out, color)?;
        return Ok(());
    };

    output::write_page(&mut out, &page, color)?;
    if !page.is_last() {
        writeln!(out)?;
        writeln!(out, "Use --page {} for more.", page.number + 1)?;
    }

    Ok(())
}
