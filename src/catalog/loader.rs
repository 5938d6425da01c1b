use tracing::info;

use super::catalog::{Catalog, MovieRecord, SimilarityMatrix};

/// Load both model artifacts and check that they line up: the matrix
/// must be square with one row per catalog record.
pub fn load_artifacts(
    catalog_path: &str,
    similarity_path: &str,
) -> Result<(Catalog, SimilarityMatrix), CatalogError> {
    let catalog = load_catalog(catalog_path)?;
    info!("Loaded catalog with {} movies from {}", catalog.len(), catalog_path);

    let similarity = load_similarity(similarity_path, catalog.len())?;
    info!("Loaded {}x{} similarity matrix from {}", similarity.len(), similarity.len(), similarity_path);

    Ok((catalog, similarity))
}

fn load_catalog(path: &str) -> Result<Catalog, CatalogError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CatalogError::ReadError(path.to_string(), e))?;

    let movies: Vec<MovieRecord> = serde_json::from_str(&content)
        .map_err(|e| CatalogError::ParseError(path.to_string(), e))?;

    if movies.is_empty() {
        return Err(CatalogError::EmptyCatalog(path.to_string()));
    }

    Ok(Catalog::new(movies))
}

fn load_similarity(path: &str, expected: usize) -> Result<SimilarityMatrix, CatalogError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CatalogError::ReadError(path.to_string(), e))?;

    let rows: Vec<Vec<f32>> = serde_json::from_str(&content)
        .map_err(|e| CatalogError::ParseError(path.to_string(), e))?;

    if rows.len() != expected {
        return Err(CatalogError::Dimension(format!(
            "similarity matrix has {} rows, catalog has {} movies",
            rows.len(),
            expected
        )));
    }

    for (i, row) in rows.iter().enumerate() {
        if row.len() != expected {
            return Err(CatalogError::Dimension(format!(
                "similarity matrix row {} has {} columns, expected {}",
                i,
                row.len(),
                expected
            )));
        }
    }

    Ok(SimilarityMatrix::new(rows))
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read artifact {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse artifact {0}: {1}")]
    ParseError(String, serde_json::Error),
    #[error("Catalog {0} contains no movies")]
    EmptyCatalog(String),
    #[error("Artifact dimension mismatch: {0}")]
    Dimension(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("cinerec-test-{}-{}", std::process::id(), name));
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_artifacts() {
        let catalog_path = write_temp(
            "catalog.json",
            r#"[{"id": 1, "title": "Alpha"}, {"id": 2, "title": "Beta"}]"#,
        );
        let similarity_path = write_temp(
            "similarity.json",
            "[[1.0, 0.5], [0.5, 1.0]]",
        );

        let (catalog, similarity) = load_artifacts(
            catalog_path.to_str().unwrap(),
            similarity_path.to_str().unwrap(),
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(similarity.len(), 2);
        assert_eq!(similarity.row(0), Some(&[1.0f32, 0.5][..]));

        std::fs::remove_file(catalog_path).ok();
        std::fs::remove_file(similarity_path).ok();
    }

    #[test]
    fn test_row_count_mismatch_rejected() {
        let catalog_path = write_temp(
            "catalog-mismatch.json",
            r#"[{"id": 1, "title": "Alpha"}, {"id": 2, "title": "Beta"}]"#,
        );
        let similarity_path = write_temp("similarity-mismatch.json", "[[1.0, 0.5]]");

        let err = load_artifacts(
            catalog_path.to_str().unwrap(),
            similarity_path.to_str().unwrap(),
        )
        .unwrap_err();

        assert!(matches!(err, CatalogError::Dimension(_)));

        std::fs::remove_file(catalog_path).ok();
        std::fs::remove_file(similarity_path).ok();
    }

    #[test]
    fn test_ragged_matrix_rejected() {
        let catalog_path = write_temp(
            "catalog-ragged.json",
            r#"[{"id": 1, "title": "Alpha"}, {"id": 2, "title": "Beta"}]"#,
        );
        let similarity_path = write_temp("similarity-ragged.json", "[[1.0, 0.5], [0.5]]");

        let err = load_artifacts(
            catalog_path.to_str().unwrap(),
            similarity_path.to_str().unwrap(),
        )
        .unwrap_err();

        assert!(matches!(err, CatalogError::Dimension(_)));

        std::fs::remove_file(catalog_path).ok();
        std::fs::remove_file(similarity_path).ok();
    }
}
