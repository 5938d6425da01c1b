use serde::Deserialize;

pub const PLACEHOLDER_POSTER: &str =
    "https://via.placeholder.com/500x750?text=No+Image+Available";
pub const UNKNOWN_GENRE: &str = "Unknown Genre";
pub const UNKNOWN_CAST: &str = "Unknown Cast";
pub const UNKNOWN_DIRECTOR: &str = "Unknown Director";
pub const UNKNOWN_RELEASE_DATE: &str = "Unknown Release Date";
pub const NO_OVERVIEW: &str = "No description available.";

/// Display details for one movie. Every field carries a named default
/// instead of being optional; a failed or partial fetch degrades field
/// by field and never propagates an error to the page.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MovieDetails {
    pub poster: String,
    pub genres: String,
    pub cast: String,
    pub director: String,
    pub release_date: String,
    pub overview: String,
}

impl MovieDetails {
    /// The full default set, used when the fetch itself failed.
    pub fn unavailable() -> Self {
        Self {
            poster: PLACEHOLDER_POSTER.to_string(),
            genres: UNKNOWN_GENRE.to_string(),
            cast: UNKNOWN_CAST.to_string(),
            director: UNKNOWN_DIRECTOR.to_string(),
            release_date: UNKNOWN_RELEASE_DATE.to_string(),
            overview: NO_OVERVIEW.to_string(),
        }
    }

    pub fn from_response(resp: MovieResponse, image_base_url: &str) -> Self {
        let poster = match resp.poster_path.as_deref() {
            Some(path) if !path.is_empty() => poster_url(image_base_url, path),
            _ => PLACEHOLDER_POSTER.to_string(),
        };

        let genres = join_names(resp.genres.iter().map(|g| g.name.as_str()));
        let genres = if genres.is_empty() {
            UNKNOWN_GENRE.to_string()
        } else {
            genres
        };

        let credits = resp.credits.unwrap_or_default();

        let cast = join_names(credits.cast.iter().take(5).map(|c| c.name.as_str()));
        let cast = if cast.is_empty() {
            UNKNOWN_CAST.to_string()
        } else {
            cast
        };

        let director = join_names(
            credits
                .crew
                .iter()
                .filter(|c| c.job.as_deref() == Some("Director"))
                .map(|c| c.name.as_str()),
        );
        let director = if director.is_empty() {
            UNKNOWN_DIRECTOR.to_string()
        } else {
            director
        };

        let release_date = match resp.release_date {
            Some(d) if !d.is_empty() => d,
            _ => UNKNOWN_RELEASE_DATE.to_string(),
        };

        let overview = match resp.overview {
            Some(o) if !o.is_empty() => o,
            _ => NO_OVERVIEW.to_string(),
        };

        Self {
            poster,
            genres,
            cast,
            director,
            release_date,
            overview,
        }
    }
}

fn poster_url(image_base_url: &str, path: &str) -> String {
    let base = image_base_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}/w500{}", base, path)
    } else {
        format!("{}/w500/{}", base, path)
    }
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}

/// Subset of the TMDB movie response this service consumes. Everything
/// is optional so a partial payload still deserializes.
#[derive(Debug, Default, Deserialize)]
pub struct MovieResponse {
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub credits: Option<Credits>,
}

#[derive(Debug, Deserialize)]
pub struct Genre {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Deserialize)]
pub struct CastMember {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CrewMember {
    pub name: String,
    #[serde(default)]
    pub job: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TrendingResponse {
    #[serde(default)]
    pub results: Vec<TrendingMovie>,
}

#[derive(Debug, Deserialize)]
pub struct TrendingMovie {
    pub id: i64,
}
