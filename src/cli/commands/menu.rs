//! Interactive menu: numbered choices, guided search input and page
//! navigation.

use std::io::{self, BufRead, Write};

use tracing::debug;

use super::output;
use crate::domain::{YearBounds, YearRange};
use crate::services::{
    LogOutcome, SearchError, SearchOutcome, SearchService, StatisticsReporter,
};

/// Whether the session continues after a menu action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    /// Input ended.
    Exit,
}

pub struct Menu<'a, R, W> {
    search: &'a SearchService,
    statistics: &'a StatisticsReporter,
    input: R,
    out: W,
    color: bool,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub const fn new(
        search: &'a SearchService,
        statistics: &'a StatisticsReporter,
        input: R,
        out: W,
    ) -> Self {
        Self {
            search,
            statistics,
            input,
            out,
            color: false,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Runs until the user picks exit or input ends.
    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            self.write_menu()?;

            let Some(choice) = self.prompt("Your choice: ")? else {
                break;
            };

            let step = match choice.as_str() {
                "1" => self.title_search().await?,
                "2" => self.genre_year_search().await?,
                "3" => self.popular().await?,
                "4" => self.recent().await?,
                "5" => {
                    writeln!(self.out, "Goodbye!")?;
                    break;
                }
                _ => {
                    writeln!(self.out, "Invalid choice.")?;
                    Step::Continue
                }
            };

            if step == Step::Exit {
                break;
            }
        }

        self.out.flush()
    }

    fn write_menu(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Main Menu:")?;
        writeln!(self.out, "1. Search by title")?;
        writeln!(self.out, "2. Search by genre and release year")?;
        writeln!(self.out, "3. Show {} popular queries", self.statistics.top_n())?;
        writeln!(self.out, "4. Show {} most recent queries", self.statistics.top_n())?;
        writeln!(self.out, "5. Exit")
    }

    /// Reads one trimmed line; `None` at end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.out, "{label}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_year(&mut self, label: &str, bounds: YearBounds) -> io::Result<Option<i32>> {
        loop {
            let Some(raw) = self.prompt(&format!("{label} ({bounds}): "))? else {
                return Ok(None);
            };
            match raw.parse::<i32>() {
                Ok(year) if bounds.contains(year) => return Ok(Some(year)),
                Ok(_) => writeln!(
                    self.out,
                    "Year must be between {} and {}",
                    bounds.min, bounds.max
                )?,
                Err(_) => writeln!(self.out, "Please enter a valid year")?,
            }
        }
    }

    async fn title_search(&mut self) -> io::Result<Step> {
        loop {
            let Some(text) = self.prompt("Enter a keyword to search for films: ")? else {
                return Ok(Step::Exit);
            };

            match self.search.search_title(&text).await {
                Ok(outcome) => return self.browse(outcome).await,
                Err(SearchError::Validation(message)) => writeln!(self.out, "{message}")?,
                Err(e) => {
                    writeln!(self.out, "Search failed: {e}")?;
                    return Ok(Step::Continue);
                }
            }
        }
    }

    async fn genre_year_search(&mut self) -> io::Result<Step> {
        let search = self.search;
        let catalog_info = async {
            let genres = search.genres().await?;
            let bounds = search.year_bounds().await?;
            Ok::<_, SearchError>((genres, bounds))
        };
        let (genres, bounds) = match catalog_info.await {
            Ok(info) => info,
            Err(e) => {
                writeln!(self.out, "Search failed: {e}")?;
                return Ok(Step::Continue);
            }
        };

        writeln!(self.out)?;
        output::write_genres(&mut self.out, &genres, bounds, self.color)?;
        let Some(bounds) = bounds else {
            return Ok(Step::Continue);
        };
        writeln!(self.out)?;

        let genre = loop {
            let Some(genre) = self.prompt("Enter genre name: ")? else {
                return Ok(Step::Exit);
            };
            if genres.iter().any(|known| known.eq_ignore_ascii_case(&genre)) {
                break genre;
            }
            writeln!(self.out, "Unknown genre '{genre}'.")?;
        };

        let Some(years) = self.prompt_years(bounds)? else {
            return Ok(Step::Exit);
        };

        match self
            .search
            .search_genre_year(&genre, years.from(), years.to())
            .await
        {
            Ok(outcome) => self.browse(outcome).await,
            Err(e) => {
                writeln!(self.out, "Search failed: {e}")?;
                Ok(Step::Continue)
            }
        }
    }

    fn prompt_years(&mut self, bounds: YearBounds) -> io::Result<Option<YearRange>> {
        writeln!(self.out)?;
        writeln!(self.out, "Search by:")?;
        writeln!(self.out, "1. Specific year")?;
        writeln!(self.out, "2. Year range")?;

        loop {
            let Some(mode) = self.prompt("Your choice: ")? else {
                return Ok(None);
            };

            match mode.as_str() {
                "1" => {
                    return Ok(self
                        .prompt_year("Enter year", bounds)?
                        .map(YearRange::single));
                }
                "2" => loop {
                    let Some(from) = self.prompt_year("Enter start year", bounds)? else {
                        return Ok(None);
                    };
                    let Some(to) = self.prompt_year("Enter end year", bounds)? else {
                        return Ok(None);
                    };
                    match YearRange::within(from, to, bounds) {
                        Ok(range) => return Ok(Some(range)),
                        Err(e) => writeln!(self.out, "{e}")?,
                    }
                },
                _ => writeln!(self.out, "Invalid choice. Please select 1 or 2")?,
            }
        }
    }

    /// Shows the first page and handles previous/next until the user goes back.
    async fn browse(&mut self, mut outcome: SearchOutcome) -> io::Result<Step> {
        if let LogOutcome::Failed(reason) = &outcome.log {
            writeln!(self.out, "Note: this search was not logged ({reason})")?;
        }

        let Some(first) = outcome.first_page.take() else {
            output::write_no_results(&mut self.out, self.color)?;
            return Ok(Step::Continue);
        };
        output::write_page(&mut self.out, &first, self.color)?;

        let search = self.search;
        let catalog = search.catalog();
        loop {
            writeln!(self.out)?;
            writeln!(self.out, "Navigation: 1 - Previous | 2 - Next | 3 - Back to menu")?;
            let Some(nav) = self.prompt("Your choice: ")? else {
                return Ok(Step::Exit);
            };

            let page = match nav.as_str() {
                "1" => outcome.cursor.previous_page(catalog).await,
                "2" => outcome.cursor.next_page(catalog).await,
                "3" => return Ok(Step::Continue),
                _ => {
                    writeln!(self.out, "Invalid input.")?;
                    continue;
                }
            };

            match page {
                Ok(page) => output::write_page(&mut self.out, &page, self.color)?,
                Err(SearchError::StartOfResults) => {
                    writeln!(self.out, "You're already on the first page.")?;
                }
                Err(SearchError::EndOfResults) => writeln!(self.out, "No more results.")?,
                Err(e) => writeln!(self.out, "Failed to load page: {e}")?,
            }
            debug!(page = ?outcome.cursor.current_page(), "Navigated");
        }
    }

    async fn popular(&mut self) -> io::Result<Step> {
        match self.statistics.popular_queries(None).await {
            Ok(ranked) => output::write_popular(&mut self.out, &ranked, self.color)?,
            Err(e) => writeln!(self.out, "Statistics unavailable: {e}")?,
        }
        Ok(Step::Continue)
    }

    async fn recent(&mut self) -> io::Result<Step> {
        match self.statistics.recent_queries(None).await {
            Ok(entries) => output::write_recent(&mut self.out, &entries, self.color)?,
            Err(e) => writeln!(self.out, "Statistics unavailable: {e}")?,
        }
        Ok(Step::Continue)
    }
}

/// Interactive menu on stdin/stdout.
pub async fn cmd_menu(
    search: &SearchService,
    statistics: &StatisticsReporter,
    color: bool,
) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(search, statistics, stdin.lock(), stdout.lock())
        .with_color(color)
        .run()
        .await?;
    Ok(())
}
