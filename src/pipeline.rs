use std::time::Duration;

use tracing::{debug, info};

use crate::{
    config::Config,
    db,
    error::AppResult,
    load,
    models::Movie,
    omdb::OmdbClient,
    source, transform,
};

#[derive(Clone, Copy, Debug)]
pub struct RunSummary {
    pub movies: usize,
    pub ratings: usize,
    pub genres: usize,
    pub associations: usize,
    pub enriched: usize,
}

/// Runs the pipeline phases in order: schema init, extract, normalize,
/// enrich, decompose, load. A failing phase propagates immediately; the
/// store keeps whatever the last successful phase produced.
pub async fn run(config: &Config) -> AppResult<RunSummary> {
    info!("applying schema");
    let db = db::connect_and_init(&config.database_url).await?;

    info!("extracting source data");
    let movies = source::read_movies(&config.movies_path)?;
    let ratings = source::read_ratings(&config.ratings_path)?;
    info!(movies = movies.len(), ratings = ratings.len(), "extracted source data");

    info!("normalizing movie fields");
    let movies = transform::normalize(movies);

    let http = reqwest::Client::builder()
        .user_agent(concat!("cinesink/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(config.omdb_timeout_secs))
        .build()?;
    let omdb = OmdbClient::new(http, config.omdb_api_key.clone(), config.omdb_base_url.clone());
    let movies = enrich_movies(
        &omdb,
        movies,
        config.enrich_limit,
        Duration::from_millis(config.omdb_delay_ms),
    )
    .await;

    info!("decomposing genres");
    let breakdown = transform::decompose_genres(&movies);

    info!("loading into store");
    load::load(&db, &movies, &ratings, &breakdown).await?;

    let summary = RunSummary {
        movies: movies.len(),
        ratings: ratings.len(),
        genres: breakdown.vocabulary.len(),
        associations: breakdown.pairs.len(),
        enriched: movies.iter().filter(|m| m.metadata.is_some()).count(),
    };
    info!(
        movies = summary.movies,
        ratings = summary.ratings,
        genres = summary.genres,
        associations = summary.associations,
        enriched = summary.enriched,
        "pipeline completed"
    );
    Ok(summary)
}

/// Looks up the first `limit` movies against OMDb, one call at a time with
/// a fixed delay after each call. Per-movie failures leave that movie's
/// metadata absent and never abort the run.
async fn enrich_movies(
    client: &OmdbClient,
    mut movies: Vec<Movie>,
    limit: usize,
    delay: Duration,
) -> Vec<Movie> {
    if !client.is_enabled() {
        info!("skipping enrichment");
        return movies;
    }

    let total = movies.len().min(limit);
    info!(total = total, "enriching movies from OMDb");

    for (idx, movie) in movies.iter_mut().take(limit).enumerate() {
        if idx % 10 == 0 {
            info!(processed = idx, total = total, "enrichment progress");
        }

        match client.lookup(&movie.clean_title, movie.release_year).await {
            Ok(metadata) => movie.metadata = Some(metadata),
            Err(err) => {
                debug!(title = %movie.clean_title, error = %err, "lookup failed");
            },
        }

        tokio::time::sleep(delay).await;
    }

    movies
}
