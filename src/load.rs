use std::collections::{BTreeMap, BTreeSet};

use sea_orm::{DatabaseConnection, EntityTrait, Set};
use tracing::info;

use crate::{
    entities::{genre, movie, movie_genre, rating},
    error::AppResult,
    models::{GenreBreakdown, GenrePair, Movie, SourceRating},
};

// Keeps each bulk INSERT under SQLite's bind parameter limit.
const INSERT_CHUNK: usize = 500;

pub async fn load(
    db: &DatabaseConnection,
    movies: &[Movie],
    ratings: &[SourceRating],
    genres: &GenreBreakdown,
) -> AppResult<()> {
    let mapping = assign_genre_ids(&genres.vocabulary);
    let associations = resolve_pairs(&genres.pairs, &mapping)?;

    insert_genres(db, &mapping).await?;
    insert_movies(db, movies).await?;
    insert_associations(db, associations).await?;
    insert_ratings(db, ratings).await?;

    Ok(())
}

/// Numbers the deduplicated vocabulary sequentially from 1, in its
/// deterministic order, so associations can be resolved before any insert.
pub fn assign_genre_ids(vocabulary: &BTreeSet<String>) -> BTreeMap<String, i64> {
    vocabulary.iter().cloned().zip(1..).collect()
}

fn resolve_pairs(
    pairs: &[GenrePair],
    mapping: &BTreeMap<String, i64>,
) -> AppResult<Vec<movie_genre::ActiveModel>> {
    let mut out = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let Some(genre_id) = mapping.get(&pair.genre_name) else {
            return Err(anyhow::anyhow!(
                "movie {} references genre {:?} absent from the vocabulary",
                pair.movie_id,
                pair.genre_name
            )
            .into());
        };
        out.push(movie_genre::ActiveModel {
            id: Default::default(),
            movie_id: Set(pair.movie_id),
            genre_id: Set(*genre_id),
        });
    }
    Ok(out)
}

async fn insert_genres(
    db: &DatabaseConnection,
    mapping: &BTreeMap<String, i64>,
) -> AppResult<()> {
    let rows: Vec<genre::ActiveModel> = mapping
        .iter()
        .map(|(name, id)| genre::ActiveModel {
            genre_id: Set(*id),
            genre_name: Set(name.clone()),
        })
        .collect();

    for chunk in rows.chunks(INSERT_CHUNK) {
        genre::Entity::insert_many(chunk.to_vec()).exec(db).await?;
    }

    info!(rows = rows.len(), "loaded genres");
    Ok(())
}

async fn insert_movies(db: &DatabaseConnection, movies: &[Movie]) -> AppResult<()> {
    let rows: Vec<movie::ActiveModel> = movies
        .iter()
        .map(|m| {
            let meta = m.metadata.as_ref();
            movie::ActiveModel {
                movie_id: Set(m.movie_id),
                title: Set(m.title.clone()),
                release_year: Set(m.release_year),
                imdb_id: Set(meta.and_then(|d| d.imdb_id.clone())),
                director: Set(meta.and_then(|d| d.director.clone())),
                plot: Set(meta.and_then(|d| d.plot.clone())),
                box_office: Set(meta.and_then(|d| d.box_office.clone())),
                runtime: Set(meta.and_then(|d| d.runtime.clone())),
                imdb_rating: Set(meta.and_then(|d| d.imdb_rating)),
                decade: Set(m.decade),
            }
        })
        .collect();

    for chunk in rows.chunks(INSERT_CHUNK) {
        movie::Entity::insert_many(chunk.to_vec()).exec(db).await?;
    }

    info!(rows = rows.len(), "loaded movies");
    Ok(())
}

async fn insert_associations(
    db: &DatabaseConnection,
    rows: Vec<movie_genre::ActiveModel>,
) -> AppResult<()> {
    let total = rows.len();
    for chunk in rows.chunks(INSERT_CHUNK) {
        movie_genre::Entity::insert_many(chunk.to_vec()).exec(db).await?;
    }

    info!(rows = total, "loaded movie-genre associations");
    Ok(())
}

async fn insert_ratings(db: &DatabaseConnection, ratings: &[SourceRating]) -> AppResult<()> {
    let rows: Vec<rating::ActiveModel> = ratings
        .iter()
        .map(|r| rating::ActiveModel {
            id: Default::default(),
            user_id: Set(r.user_id),
            movie_id: Set(r.movie_id),
            rating: Set(r.rating),
            timestamp: Set(r.timestamp),
        })
        .collect();

    for chunk in rows.chunks(INSERT_CHUNK) {
        rating::Entity::insert_many(chunk.to_vec()).exec(db).await?;
    }

    info!(rows = rows.len(), "loaded ratings");
    Ok(())
}
