use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub genre: Option<String>,
    pub release_year: Option<i32>,
    pub description: Option<String>,
    pub rating: Option<String>,
    pub actors: Vec<String>,
}

impl Movie {
    #[must_use]
    pub fn actors_joined(&self) -> String {
        self.actors.join(", ")
    }
}
