use std::time::Duration;

use sea_orm::{ConnectionTrait, Database, Statement};

use crate::{config::Config, error::AppResult, source};

/// Setup doctor: verifies the source files, the store and the API key
/// without touching any data. A missing key is reported, not fatal.
pub async fn run(config: &Config) -> AppResult<()> {
    match source::read_movies(&config.movies_path) {
        Ok(movies) => {
            println!("ok: {} movies in {}", movies.len(), config.movies_path.display());
        },
        Err(err) => println!("error: movies file: {err}"),
    }

    match source::read_ratings(&config.ratings_path) {
        Ok(ratings) => {
            println!("ok: {} ratings in {}", ratings.len(), config.ratings_path.display());
        },
        Err(err) => println!("error: ratings file: {err}"),
    }

    match sqlite_version(&config.database_url).await {
        Ok(version) => println!("ok: store reachable, sqlite {version}"),
        Err(err) => println!("error: store: {err}"),
    }

    if config.omdb_api_key.trim().is_empty() {
        println!("warning: no OMDb API key configured, enrichment will be skipped");
        println!("         get a free key at http://www.omdbapi.com/apikey.aspx");
        return Ok(());
    }

    match probe_omdb(config).await {
        Ok(Some(title)) => println!("ok: OMDb key works, probe returned {title:?}"),
        Ok(None) => println!("error: OMDb key rejected or probe title not found"),
        Err(err) => println!("error: OMDb probe failed: {err}"),
    }

    Ok(())
}

async fn sqlite_version(database_url: &str) -> AppResult<String> {
    let db = Database::connect(database_url).await?;
    let row = db
        .query_one(Statement::from_string(
            db.get_database_backend(),
            "SELECT sqlite_version() AS version".to_string(),
        ))
        .await?;

    let Some(row) = row else {
        return Err(anyhow::anyhow!("sqlite_version() returned no rows").into());
    };
    let version: String = row
        .try_get("", "version")
        .map_err(|err| anyhow::anyhow!("reading sqlite version: {err}"))?;
    Ok(version)
}

async fn probe_omdb(config: &Config) -> AppResult<Option<String>> {
    let http = reqwest::Client::builder()
        .user_agent(concat!("cinesink/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(config.omdb_timeout_secs))
        .build()?;

    let payload: serde_json::Value = http
        .get(config.omdb_base_url.clone())
        .query(&[
            ("apikey", config.omdb_api_key.as_str()),
            ("t", "The Matrix"),
            ("y", "1999"),
        ])
        .send()
        .await?
        .json()
        .await?;

    if payload.get("Response").and_then(|v| v.as_str()) != Some("True") {
        return Ok(None);
    }
    Ok(payload.get("Title").and_then(|v| v.as_str()).map(|s| s.to_string()))
}
