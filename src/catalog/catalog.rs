use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of the movie table. The positional index of a record in the
/// catalog is also its row/column index in the similarity matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieRecord {
    #[serde(alias = "movie_id")]
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// Immutable movie table, loaded once at startup.
///
/// Titles are not guaranteed unique; exact-match lookup resolves to the
/// first occurrence in catalog order.
#[derive(Debug)]
pub struct Catalog {
    movies: Vec<MovieRecord>,
    by_title: HashMap<String, usize>,
    by_id: HashMap<i64, usize>,
}

impl Catalog {
    pub fn new(movies: Vec<MovieRecord>) -> Self {
        let mut by_title = HashMap::with_capacity(movies.len());
        let mut by_id = HashMap::with_capacity(movies.len());

        for (index, movie) in movies.iter().enumerate() {
            by_title.entry(movie.title.clone()).or_insert(index);
            by_id.entry(movie.id).or_insert(index);
        }

        Self {
            movies,
            by_title,
            by_id,
        }
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MovieRecord> {
        self.movies.get(index)
    }

    pub fn index_of_title(&self, title: &str) -> Option<usize> {
        self.by_title.get(title).copied()
    }

    pub fn index_of_id(&self, id: i64) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    pub fn contains_id(&self, id: i64) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }
}

/// Square matrix of pairwise similarity scores. Entry (i, j) scores the
/// similarity between catalog movie i and movie j; the diagonal is
/// self-similarity and is never surfaced in results.
#[derive(Debug)]
pub struct SimilarityMatrix {
    rows: Vec<Vec<f32>>,
}

impl SimilarityMatrix {
    pub fn new(rows: Vec<Vec<f32>>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&[f32]> {
        self.rows.get(index).map(|r| r.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, title: &str) -> MovieRecord {
        MovieRecord {
            id,
            title: title.to_string(),
            overview: None,
            genres: Vec::new(),
        }
    }

    #[test]
    fn test_title_lookup() {
        let catalog = Catalog::new(vec![
            record(1, "Alpha"),
            record(2, "Beta"),
            record(3, "Gamma"),
        ]);
        assert_eq!(catalog.index_of_title("Beta"), Some(1));
        assert_eq!(catalog.index_of_title("beta"), None);
        assert_eq!(catalog.index_of_title("Delta"), None);
    }

    #[test]
    fn test_duplicate_title_resolves_to_first() {
        let catalog = Catalog::new(vec![
            record(1, "Remake"),
            record(2, "Remake"),
        ]);
        assert_eq!(catalog.index_of_title("Remake"), Some(0));
    }

    #[test]
    fn test_id_lookup() {
        let catalog = Catalog::new(vec![record(42, "Alpha"), record(7, "Beta")]);
        assert_eq!(catalog.index_of_id(7), Some(1));
        assert!(catalog.contains_id(42));
        assert!(!catalog.contains_id(99));
    }
}
