use std::collections::BTreeSet;

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct SourceMovie {
    #[serde(rename = "movieId")]
    pub movie_id: i64,
    pub title: String,
    pub genres: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SourceRating {
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(rename = "movieId")]
    pub movie_id: i64,
    pub rating: f64,
    pub timestamp: i64,
}

/// A movie record as it moves through the pipeline. Enrichment fields live
/// behind one `Option`: they are either all absent or all taken from a
/// single successful lookup response.
#[derive(Clone, Debug)]
pub struct Movie {
    pub movie_id: i64,
    pub title: String,
    pub genres: Option<String>,
    pub release_year: Option<i32>,
    pub clean_title: String,
    pub decade: Option<i32>,
    pub metadata: Option<MovieMetadata>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MovieMetadata {
    pub imdb_id: Option<String>,
    pub director: Option<String>,
    pub plot: Option<String>,
    pub box_office: Option<String>,
    pub runtime: Option<String>,
    pub imdb_rating: Option<f64>,
}

#[derive(Clone, Debug)]
pub struct GenrePair {
    pub movie_id: i64,
    pub genre_name: String,
}

#[derive(Clone, Debug, Default)]
pub struct GenreBreakdown {
    pub vocabulary: BTreeSet<String>,
    pub pairs: Vec<GenrePair>,
}
