use crate::models::{GenreBreakdown, GenrePair, Movie, SourceMovie};

const GENRE_DELIMITER: char = '|';

/// Year of a trailing "(YYYY)" suffix, anchored to the end of the title.
pub fn extract_year(title: &str) -> Option<i32> {
    split_trailing_year(title).1
}

/// Title with the trailing "(YYYY)" suffix and preceding whitespace removed.
pub fn clean_title(title: &str) -> String {
    split_trailing_year(title).0.to_string()
}

pub fn decade(year: Option<i32>) -> Option<i32> {
    year.map(|y| y / 10 * 10)
}

fn split_trailing_year(title: &str) -> (&str, Option<i32>) {
    let s = title.trim();
    let Some(rest) = s.strip_suffix(')') else {
        return (s, None);
    };
    let Some(open) = rest.rfind('(') else {
        return (s, None);
    };
    let inside = &rest[open + 1..];
    if inside.len() != 4 || !inside.bytes().all(|b| b.is_ascii_digit()) {
        return (s, None);
    }
    match inside.parse() {
        Ok(year) => (s[..open].trim_end(), Some(year)),
        Err(_) => (s, None),
    }
}

pub fn normalize(movies: Vec<SourceMovie>) -> Vec<Movie> {
    movies
        .into_iter()
        .map(|movie| {
            let (clean, year) = split_trailing_year(&movie.title);
            let clean = clean.to_string();
            Movie {
                movie_id: movie.movie_id,
                clean_title: clean,
                release_year: year,
                decade: decade(year),
                title: movie.title,
                genres: movie.genres,
                metadata: None,
            }
        })
        .collect()
}

pub fn decompose_genres(movies: &[Movie]) -> GenreBreakdown {
    let mut breakdown = GenreBreakdown::default();

    for movie in movies {
        let Some(raw) = movie.genres.as_deref() else {
            continue;
        };
        for token in raw.split(GENRE_DELIMITER) {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            breakdown.vocabulary.insert(token.to_string());
            breakdown
                .pairs
                .push(GenrePair { movie_id: movie.movie_id, genre_name: token.to_string() });
        }
    }

    breakdown
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn movie(id: i64, title: &str, genres: Option<&str>) -> Movie {
        let source = SourceMovie {
            movie_id: id,
            title: title.to_string(),
            genres: genres.map(|g| g.to_string()),
        };
        normalize(vec![source]).remove(0)
    }

    #[test]
    fn extracts_trailing_year() {
        assert_eq!(extract_year("Toy Story (1995)"), Some(1995));
        assert_eq!(extract_year("Seven (a.k.a. Se7en) (1995)"), Some(1995));
        assert_eq!(extract_year("Movie (1995) "), Some(1995));
    }

    #[test]
    fn ignores_non_trailing_or_malformed_years() {
        assert_eq!(extract_year("No Year Movie"), None);
        assert_eq!(extract_year("2001: A Space Odyssey"), None);
        assert_eq!(extract_year("(1995) Backwards Title"), None);
        assert_eq!(extract_year("Movie (199)"), None);
        assert_eq!(extract_year("Movie (19955)"), None);
        assert_eq!(extract_year("Movie (19x5)"), None);
    }

    #[test]
    fn cleans_trailing_year() {
        assert_eq!(clean_title("Toy Story (1995)"), "Toy Story");
        assert_eq!(clean_title("Seven (a.k.a. Se7en) (1995)"), "Seven (a.k.a. Se7en)");
        assert_eq!(clean_title("  No Year Movie  "), "No Year Movie");
        assert_eq!(clean_title("Movie    (1995)"), "Movie");
    }

    #[test]
    fn decade_rounds_down() {
        assert_eq!(decade(Some(1994)), Some(1990));
        assert_eq!(decade(Some(1989)), Some(1980));
        assert_eq!(decade(Some(2000)), Some(2000));
        assert_eq!(decade(None), None);
    }

    #[test]
    fn normalize_derives_all_fields() {
        let m = movie(1, "Toy Story (1995)", Some("Animation|Comedy"));
        assert_eq!(m.title, "Toy Story (1995)");
        assert_eq!(m.clean_title, "Toy Story");
        assert_eq!(m.release_year, Some(1995));
        assert_eq!(m.decade, Some(1990));
        assert!(m.metadata.is_none());

        let m = movie(2, "No Year Movie", Some("Drama"));
        assert_eq!(m.clean_title, "No Year Movie");
        assert_eq!(m.release_year, None);
        assert_eq!(m.decade, None);
    }

    #[test]
    fn decomposes_into_vocabulary_and_pairs() {
        let movies = vec![
            movie(1, "Toy Story (1995)", Some("Animation|Comedy")),
            movie(2, "No Year Movie", Some("Drama")),
            movie(3, "Quiet One", None),
        ];

        let breakdown = decompose_genres(&movies);

        let expected: BTreeSet<String> =
            ["Animation", "Comedy", "Drama"].iter().map(|s| s.to_string()).collect();
        assert_eq!(breakdown.vocabulary, expected);

        assert_eq!(breakdown.pairs.len(), 3);
        assert_eq!(breakdown.pairs[0].movie_id, 1);
        assert_eq!(breakdown.pairs[0].genre_name, "Animation");
        assert_eq!(breakdown.pairs[2].movie_id, 2);
        assert_eq!(breakdown.pairs[2].genre_name, "Drama");
    }

    #[test]
    fn every_pair_references_a_vocabulary_name() {
        let movies = vec![
            movie(1, "A (1990)", Some(" Action | Thriller ")),
            movie(2, "B (1991)", Some("Action|Sci-Fi")),
        ];

        let breakdown = decompose_genres(&movies);

        for pair in &breakdown.pairs {
            assert!(breakdown.vocabulary.contains(&pair.genre_name));
        }
    }

    #[test]
    fn genre_tokens_are_trimmed_and_deduplicated_across_movies() {
        let movies = vec![
            movie(1, "A (1990)", Some("Action| Action")),
            movie(2, "B (1991)", Some("Action")),
        ];

        let breakdown = decompose_genres(&movies);

        assert_eq!(breakdown.vocabulary.len(), 1);
        // Duplicates within a movie survive as duplicate pairs.
        assert_eq!(breakdown.pairs.len(), 3);
    }

    #[test]
    fn decomposition_round_trips_per_movie() {
        let movies = vec![
            movie(1, "A (1990)", Some("Action|Comedy|Drama")),
            movie(2, "B (1991)", Some(" Horror |Comedy")),
        ];

        let breakdown = decompose_genres(&movies);

        for m in &movies {
            let original: BTreeSet<&str> = m
                .genres
                .as_deref()
                .unwrap()
                .split('|')
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .collect();
            let resolved: BTreeSet<&str> = breakdown
                .pairs
                .iter()
                .filter(|p| p.movie_id == m.movie_id)
                .map(|p| p.genre_name.as_str())
                .collect();
            assert_eq!(resolved, original);
        }
    }
}
