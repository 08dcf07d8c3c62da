use std::collections::HashMap;

use crate::domain::YearBounds;
use crate::entities::{actor, category, film, film_actor, film_category, prelude::*};
use crate::models::{Movie, MovieQuery};
use anyhow::Result;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Select,
};
use tracing::debug;

pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn filtered(query: &MovieQuery) -> Select<Film> {
        match query {
            MovieQuery::Title { text } => {
                Film::find().filter(film::Column::Title.contains(text.as_str()))
            }
            MovieQuery::GenreYear { genre, years } => Film::find()
                .join(JoinType::InnerJoin, film::Relation::FilmCategory.def())
                .join(JoinType::InnerJoin, film_category::Relation::Category.def())
                .filter(category::Column::Name.eq(genre.as_str()))
                .filter(film::Column::ReleaseYear.between(years.from(), years.to())),
        }
    }

    /// Film id is the final sort key so equal titles keep a stable order
    /// across pages.
    fn ordered(query: &MovieQuery) -> Select<Film> {
        let select = Self::filtered(query);
        match query {
            MovieQuery::Title { .. } => select
                .order_by_asc(film::Column::Title)
                .order_by_asc(film::Column::FilmId),
            MovieQuery::GenreYear { .. } => select
                .order_by_asc(film::Column::ReleaseYear)
                .order_by_asc(film::Column::Title)
                .order_by_asc(film::Column::FilmId),
        }
    }

    pub async fn count(&self, query: &MovieQuery) -> Result<u64> {
        let total = Self::filtered(query).count(&self.conn).await?;
        debug!(%query, total, "Counted matching films");
        Ok(total)
    }

    pub async fn fetch(&self, query: &MovieQuery, offset: u64, limit: u64) -> Result<Vec<Movie>> {
        let films = Self::ordered(query)
            .offset(offset)
            .limit(limit)
            .all(&self.conn)
            .await?;

        if films.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<u16> = films.iter().map(|f| f.film_id).collect();
        // A genre search shows the matched genre even for multi-category films.
        let mut genres = match query {
            MovieQuery::GenreYear { genre, .. } => {
                ids.iter().map(|id| (*id, genre.clone())).collect()
            }
            MovieQuery::Title { .. } => self.genres_for(&ids).await?,
        };
        let mut casts = self.casts_for(&ids).await?;

        Ok(films
            .into_iter()
            .map(|f| Movie {
                id: i32::from(f.film_id),
                genre: genres.remove(&f.film_id),
                actors: casts.remove(&f.film_id).unwrap_or_default(),
                title: f.title,
                release_year: f.release_year.map(i32::from),
                description: f.description,
                rating: f.rating,
            })
            .collect())
    }

    /// First category name per film, alphabetically.
    async fn genres_for(&self, film_ids: &[u16]) -> Result<HashMap<u16, String>> {
        let rows: Vec<(u16, String)> = FilmCategory::find()
            .select_only()
            .column(film_category::Column::FilmId)
            .column(category::Column::Name)
            .join(JoinType::InnerJoin, film_category::Relation::Category.def())
            .filter(film_category::Column::FilmId.is_in(film_ids.iter().copied()))
            .order_by_asc(category::Column::Name)
            .into_tuple()
            .all(&self.conn)
            .await?;

        let mut genres = HashMap::new();
        for (film_id, name) in rows {
            genres.entry(film_id).or_insert(name);
        }
        Ok(genres)
    }

    async fn casts_for(&self, film_ids: &[u16]) -> Result<HashMap<u16, Vec<String>>> {
        let rows: Vec<(u16, u16, String, String)> = FilmActor::find()
            .select_only()
            .column(film_actor::Column::FilmId)
            .column(actor::Column::ActorId)
            .column(actor::Column::FirstName)
            .column(actor::Column::LastName)
            .join(JoinType::InnerJoin, film_actor::Relation::Actor.def())
            .filter(film_actor::Column::FilmId.is_in(film_ids.iter().copied()))
            .order_by_asc(actor::Column::LastName)
            .order_by_asc(actor::Column::FirstName)
            .into_tuple()
            .all(&self.conn)
            .await?;

        let mut casts: HashMap<u16, Vec<String>> = HashMap::new();
        for (film_id, _actor_id, first, last) in rows {
            let name = format!("{first} {last}");
            let cast = casts.entry(film_id).or_default();
            if !cast.contains(&name) {
                cast.push(name);
            }
        }
        Ok(casts)
    }

    pub async fn genres(&self) -> Result<Vec<String>> {
        let rows = Category::find()
            .order_by_asc(category::Column::Name)
            .all(&self.conn)
            .await?;
        Ok(rows.into_iter().map(|c| c.name).collect())
    }

    pub async fn year_bounds(&self) -> Result<Option<YearBounds>> {
        let row: Option<(Option<u16>, Option<u16>)> = Film::find()
            .select_only()
            .column_as(film::Column::ReleaseYear.min(), "min_year")
            .column_as(film::Column::ReleaseYear.max(), "max_year")
            .into_tuple()
            .one(&self.conn)
            .await?;

        Ok(match row {
            Some((Some(min), Some(max))) => Some(YearBounds {
                min: i32::from(min),
                max: i32::from(max),
            }),
            _ => None,
        })
    }
}
