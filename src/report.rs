use sea_orm::{ConnectionTrait, Database, DatabaseConnection, FromQueryResult, Statement};

use crate::{config::Config, error::AppResult};

#[derive(Debug, FromQueryResult)]
struct TopMovieRow {
    title: String,
    average_rating: f64,
    rating_count: i64,
}

#[derive(Debug, FromQueryResult)]
struct GenreRow {
    genre_name: String,
    average_rating: f64,
    movie_count: i64,
    rating_count: i64,
}

#[derive(Debug, FromQueryResult)]
struct DirectorRow {
    director: String,
    movie_count: i64,
}

#[derive(Debug, FromQueryResult)]
struct EnrichedRow {
    title: String,
    release_year: Option<i32>,
    director: Option<String>,
    imdb_rating: Option<f64>,
    plot_preview: Option<String>,
}

const TOP_MOVIE_SQL: &str = "\
    SELECT m.title AS title, \
           ROUND(AVG(r.rating), 2) AS average_rating, \
           COUNT(r.rating) AS rating_count \
    FROM movies m \
    JOIN ratings r ON m.movie_id = r.movie_id \
    GROUP BY m.movie_id, m.title \
    HAVING COUNT(r.rating) >= 10 \
    ORDER BY AVG(r.rating) DESC \
    LIMIT 1";

const TOP_GENRES_SQL: &str = "\
    SELECT g.genre_name AS genre_name, \
           ROUND(AVG(r.rating), 2) AS average_rating, \
           COUNT(DISTINCT m.movie_id) AS movie_count, \
           COUNT(r.rating) AS rating_count \
    FROM genres g \
    JOIN movie_genres mg ON g.genre_id = mg.genre_id \
    JOIN movies m ON mg.movie_id = m.movie_id \
    JOIN ratings r ON m.movie_id = r.movie_id \
    GROUP BY g.genre_name \
    HAVING COUNT(r.rating) >= 100 \
    ORDER BY AVG(r.rating) DESC \
    LIMIT 5";

const TOP_DIRECTOR_SQL: &str = "\
    SELECT director AS director, COUNT(*) AS movie_count \
    FROM movies \
    WHERE director IS NOT NULL AND director != '' AND director != 'N/A' \
    GROUP BY director \
    ORDER BY movie_count DESC \
    LIMIT 1";

const ENRICHED_SAMPLE_SQL: &str = "\
    SELECT title AS title, \
           release_year AS release_year, \
           director AS director, \
           imdb_rating AS imdb_rating, \
           SUBSTR(plot, 1, 50) AS plot_preview \
    FROM movies \
    WHERE director IS NOT NULL \
    LIMIT 5";

pub async fn run(config: &Config) -> AppResult<()> {
    let db = Database::connect(config.database_url.as_str()).await?;

    println!("1. Movie with highest average rating (at least 10 ratings):");
    for row in select::<TopMovieRow>(&db, TOP_MOVIE_SQL).await? {
        println!("   {} ({:.2} over {} ratings)", row.title, row.average_rating, row.rating_count);
    }

    println!("\n2. Top 5 genres by average rating (at least 100 ratings):");
    for row in select::<GenreRow>(&db, TOP_GENRES_SQL).await? {
        println!(
            "   {:<12} {:.2} across {} movies, {} ratings",
            row.genre_name, row.average_rating, row.movie_count, row.rating_count
        );
    }

    println!("\n3. Director with most movies:");
    for row in select::<DirectorRow>(&db, TOP_DIRECTOR_SQL).await? {
        println!("   {} ({} movies)", row.director, row.movie_count);
    }

    println!("\n4. Sample movies with OMDb metadata:");
    for row in select::<EnrichedRow>(&db, ENRICHED_SAMPLE_SQL).await? {
        println!(
            "   {} [{}] dir. {} imdb {} | {}...",
            row.title,
            row.release_year.map_or_else(|| "?".to_string(), |y| y.to_string()),
            row.director.as_deref().unwrap_or("?"),
            row.imdb_rating.map_or_else(|| "?".to_string(), |r| format!("{r:.1}")),
            row.plot_preview.as_deref().unwrap_or(""),
        );
    }

    Ok(())
}

async fn select<R: FromQueryResult>(db: &DatabaseConnection, sql: &str) -> AppResult<Vec<R>> {
    let stmt = Statement::from_string(db.get_database_backend(), sql.to_string());
    Ok(R::find_by_statement(stmt).all(db).await?)
}
