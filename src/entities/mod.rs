pub mod prelude;

pub mod actor;
pub mod category;
pub mod film;
pub mod film_actor;
pub mod film_category;

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ColumnTrait;
    use sea_orm::sea_query::ColumnType;

    #[test]
    fn test_columns_match_sakila_unsigned_types() {
        assert_eq!(
            film::Column::FilmId.def().get_column_type(),
            &ColumnType::SmallUnsigned
        );
        assert_eq!(
            film::Column::ReleaseYear.def().get_column_type(),
            &ColumnType::SmallUnsigned
        );
        assert!(film::Column::ReleaseYear.def().is_null());
        assert_eq!(
            category::Column::CategoryId.def().get_column_type(),
            &ColumnType::TinyUnsigned
        );
        assert_eq!(
            actor::Column::ActorId.def().get_column_type(),
            &ColumnType::SmallUnsigned
        );
        assert_eq!(
            film_category::Column::CategoryId.def().get_column_type(),
            &ColumnType::TinyUnsigned
        );
        assert_eq!(
            film_actor::Column::FilmId.def().get_column_type(),
            &ColumnType::SmallUnsigned
        );
    }
}
