use std::path::Path;

use anyhow::Context;
use tracing::debug;

use crate::{
    error::AppResult,
    models::{SourceMovie, SourceRating},
};

pub fn read_movies(path: &Path) -> AppResult<Vec<SourceMovie>> {
    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("opening {}", path.display()))?;

    let mut movies = Vec::new();
    for row in reader.deserialize() {
        movies.push(row?);
    }

    debug!(path = %path.display(), rows = movies.len(), "read movies file");
    Ok(movies)
}

pub fn read_ratings(path: &Path) -> AppResult<Vec<SourceRating>> {
    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("opening {}", path.display()))?;

    let mut ratings = Vec::new();
    for row in reader.deserialize() {
        ratings.push(row?);
    }

    debug!(path = %path.display(), rows = ratings.len(), "read ratings file");
    Ok(ratings)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("cinesink-{}-{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn reads_movies_with_quoted_titles() {
        let path = write_temp(
            "movies-quoted.csv",
            "movieId,title,genres\n\
             1,Toy Story (1995),Adventure|Animation|Children|Comedy|Fantasy\n\
             11,\"American President, The (1995)\",Comedy|Drama|Romance\n",
        );

        let movies = read_movies(&path).unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].movie_id, 1);
        assert_eq!(movies[1].title, "American President, The (1995)");
        assert_eq!(movies[1].genres.as_deref(), Some("Comedy|Drama|Romance"));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn empty_genre_field_reads_as_none() {
        let path = write_temp("movies-empty-genre.csv", "movieId,title,genres\n5,Oddity,\n");

        let movies = read_movies(&path).unwrap();
        assert_eq!(movies[0].genres, None);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn reads_ratings() {
        let path = write_temp(
            "ratings.csv",
            "userId,movieId,rating,timestamp\n10,1,4.5,1000\n10,2,3.0,1005\n",
        );

        let ratings = read_ratings(&path).unwrap();
        assert_eq!(ratings.len(), 2);
        assert_eq!(ratings[0].user_id, 10);
        assert_eq!(ratings[0].rating, 4.5);
        assert_eq!(ratings[1].timestamp, 1005);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn malformed_row_is_an_error() {
        let path = write_temp(
            "ratings-bad.csv",
            "userId,movieId,rating,timestamp\n10,not-a-number,4.5,1000\n",
        );

        assert!(read_ratings(&path).is_err());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = PathBuf::from("/nonexistent/cinesink/movies.csv");
        assert!(read_movies(&path).is_err());
    }
}
