use serde::Deserialize;
use tracing::warn;

use crate::models::MovieMetadata;

/// Per-movie lookup failure. Never escalated past the enrichment loop.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("movie not found")]
    NotFound,
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("malformed response: {0}")]
    Malformed(#[source] reqwest::Error),
}

pub struct OmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OmdbClient {
    pub fn new(client: reqwest::Client, api_key: String, base_url: String) -> Self {
        // Warn once on startup when enrichment will be skipped
        if api_key.trim().is_empty() {
            warn!("no OMDb API key configured, metadata enrichment is disabled");
        }
        Self { client, api_key, base_url }
    }

    pub fn is_enabled(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    pub async fn lookup(
        &self,
        title: &str,
        year: Option<i32>,
    ) -> Result<MovieMetadata, LookupError> {
        let mut req = self
            .client
            .get(self.base_url.clone())
            .query(&[("apikey", self.api_key.as_str()), ("t", title), ("type", "movie")]);
        if let Some(year) = year {
            req = req.query(&[("y", year)]);
        }

        let resp = req
            .send()
            .await
            .map_err(LookupError::Transport)?
            .error_for_status()
            .map_err(LookupError::Transport)?;

        let payload: OmdbResponse = resp.json().await.map_err(LookupError::Malformed)?;
        interpret(payload)
    }
}

#[derive(Debug, Deserialize)]
struct OmdbResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "Director")]
    director: Option<String>,
    #[serde(rename = "Plot")]
    plot: Option<String>,
    #[serde(rename = "BoxOffice")]
    box_office: Option<String>,
    #[serde(rename = "Runtime")]
    runtime: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
}

// All other payload fields are gated on Response == "True".
fn interpret(payload: OmdbResponse) -> Result<MovieMetadata, LookupError> {
    if payload.response != "True" {
        return Err(LookupError::NotFound);
    }

    Ok(MovieMetadata {
        imdb_id: payload.imdb_id,
        director: payload.director,
        plot: payload.plot,
        box_office: payload.box_office,
        runtime: payload.runtime,
        imdb_rating: parse_rating(payload.imdb_rating.as_deref()),
    })
}

fn parse_rating(raw: Option<&str>) -> Option<f64> {
    let raw = raw?.trim();
    if raw.is_empty() || raw == "N/A" {
        return None;
    }
    raw.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found_response() -> OmdbResponse {
        OmdbResponse {
            response: "True".to_string(),
            imdb_id: Some("tt0114709".to_string()),
            director: Some("John Lasseter".to_string()),
            plot: Some("A cowboy doll is profoundly threatened.".to_string()),
            box_office: Some("$223,225,679".to_string()),
            runtime: Some("81 min".to_string()),
            imdb_rating: Some("8.3".to_string()),
        }
    }

    #[test]
    fn parses_numeric_ratings() {
        assert_eq!(parse_rating(Some("8.3")), Some(8.3));
        assert_eq!(parse_rating(Some(" 7.0 ")), Some(7.0));
        assert_eq!(parse_rating(Some("N/A")), None);
        assert_eq!(parse_rating(Some("")), None);
        assert_eq!(parse_rating(Some("eight")), None);
        assert_eq!(parse_rating(None), None);
    }

    #[test]
    fn found_response_yields_full_metadata() {
        let metadata = interpret(found_response()).unwrap();
        assert_eq!(metadata.imdb_id.as_deref(), Some("tt0114709"));
        assert_eq!(metadata.director.as_deref(), Some("John Lasseter"));
        assert_eq!(metadata.imdb_rating, Some(8.3));
    }

    #[test]
    fn not_found_response_is_an_error() {
        let payload = OmdbResponse {
            response: "False".to_string(),
            imdb_id: None,
            director: None,
            plot: None,
            box_office: None,
            runtime: None,
            imdb_rating: None,
        };
        assert!(matches!(interpret(payload), Err(LookupError::NotFound)));
    }

    #[test]
    fn na_rating_is_absent() {
        let mut payload = found_response();
        payload.imdb_rating = Some("N/A".to_string());
        let metadata = interpret(payload).unwrap();
        assert_eq!(metadata.imdb_rating, None);
        // The rest of the record still comes from the same response.
        assert!(metadata.director.is_some());
    }
}
