use std::io::{self, Write};

use super::output;
use crate::services::StatisticsReporter;

pub async fn cmd_popular(
    reporter: &StatisticsReporter,
    limit: Option<usize>,
    json: bool,
    color: bool,
) -> anyhow::Result<()> {
    let ranked = reporter.popular_queries(limit).await?;

    let mut out = io::stdout().lock();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&ranked)?)?;
    } else {
        output::write_popular(&mut out, &ranked, color)?;
    }
    Ok(())
}

pub async fn cmd_recent(
    reporter: &StatisticsReporter,
    limit: Option<usize>,
    json: bool,
    color: bool,
) -> anyhow::Result<()> {
    let entries = reporter.recent_queries(limit).await?;

    let mut out = io::stdout().lock();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&entries)?)?;
    } else {
        output::write_recent(&mut out, &entries, color)?;
    }
    Ok(())
}
