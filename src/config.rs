use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub movies_path: PathBuf,
    pub ratings_path: PathBuf,
    pub omdb_api_key: String,
    pub omdb_base_url: String,
    pub enrich_limit: usize,
    pub omdb_delay_ms: u64,
    pub omdb_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://movie_db.sqlite?mode=rwc".to_string());

        let movies_path: PathBuf = std::env::var("MOVIES_CSV")
            .unwrap_or_else(|_| "ml-latest-small/movies.csv".to_string())
            .into();

        let ratings_path: PathBuf = std::env::var("RATINGS_CSV")
            .unwrap_or_else(|_| "ml-latest-small/ratings.csv".to_string())
            .into();

        // The sign-up placeholder counts as no key at all.
        let omdb_api_key = match std::env::var("OMDB_API_KEY") {
            Ok(key) if key.trim() == "YOUR_API_KEY_HERE" => String::new(),
            Ok(key) => key,
            Err(_) => String::new(),
        };

        let omdb_base_url = std::env::var("OMDB_BASE_URL")
            .unwrap_or_else(|_| "http://www.omdbapi.com/".to_string());

        let enrich_limit: usize =
            std::env::var("OMDB_ENRICH_LIMIT").ok().and_then(|s| s.parse().ok()).unwrap_or(50);

        let omdb_delay_ms: u64 =
            std::env::var("OMDB_DELAY_MS").ok().and_then(|s| s.parse().ok()).unwrap_or(100);

        let omdb_timeout_secs: u64 =
            std::env::var("OMDB_TIMEOUT_SECS").ok().and_then(|s| s.parse().ok()).unwrap_or(5);

        Ok(Self {
            database_url,
            movies_path,
            ratings_path,
            omdb_api_key,
            omdb_base_url,
            enrich_limit,
            omdb_delay_ms,
            omdb_timeout_secs,
        })
    }
}
