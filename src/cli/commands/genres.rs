use std::io::{self, Write};

use super::output;
use crate::services::SearchService;

pub async fn cmd_genres(search: &SearchService, json: bool, color: bool) -> anyhow::Result<()> {
    let genres = search.genres().await?;
    let years = search.year_bounds().await?;

    let mut out = io::stdout().lock();
    if json {
        let listing = serde_json::json!({ "genres": genres, "years": years });
        writeln!(out, "{}", serde_json::to_string_pretty(&listing)?)?;
        return Ok(());
    }

    if genres.is_empty() {
        writeln!(out, "The catalog has no genres.")?;
        writeln!(out)?;
        writeln!(out, "Load a catalog or run: reelsearch bootstrap-catalog")?;
        return Ok(());
    }

    output::write_genres(&mut out, &genres, years, color)?;
    Ok(())
}
