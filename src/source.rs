//! Article sources feeding the memory store.

use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::info;

use crate::article::Article;
use crate::errors::Error;

/// Produces normalized articles, e.g. from RSS feeds.
pub trait ArticleSource {
    fn fetch(&mut self) -> Result<Vec<Article>, Error>;
}

impl ArticleSource for Vec<Article> {
    fn fetch(&mut self) -> Result<Vec<Article>, Error> {
        Ok(std::mem::take(self))
    }
}

/// Reads a JSON array of articles from a file.
///
/// ```json
/// [{"title": "...", "summary": "...", "url": "...", "source": "...",
///   "published_at": "2024-05-01T12:30:00+00:00"}]
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ArticleSource for JsonFileSource {
    fn fetch(&mut self) -> Result<Vec<Article>, Error> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::NotFound(self.path.display().to_string()),
            _ => Error::Io(e),
        })?;
        let articles: Vec<Article> = serde_json::from_str(&content)?;

        info!(
            path = %self.path.display(),
            count = articles.len(),
            "articles loaded"
        );
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_json_file_source_reads_articles() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"title": "A", "summary": "first", "url": "https://a", "source": "Feed",
                  "published_at": "2024-05-01T12:30:00+00:00"}},
                {{"title": "B", "summary": null, "url": "https://b", "source": "Feed"}}
            ]"#
        )
        .unwrap();

        let mut source = JsonFileSource::new(file.path());
        let articles = source.fetch().unwrap();

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title, "A");
        assert!(articles[0].published_at.is_some());
        assert!(articles[1].summary.is_none());
    }

    #[test]
    fn test_json_file_source_missing_file() {
        let mut source = JsonFileSource::new("/nonexistent/newsmem/articles.json");
        assert!(matches!(source.fetch(), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_json_file_source_directory_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut source = JsonFileSource::new(dir.path());
        assert!(matches!(source.fetch(), Err(Error::Io(_))));
    }

    #[test]
    fn test_json_file_source_malformed() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let mut source = JsonFileSource::new(file.path());
        assert!(matches!(source.fetch(), Err(Error::Json(_))));
    }

    #[test]
    fn test_vec_source_drains() {
        let mut source = vec![Article {
            title: "A".to_string(),
            summary: Some("s".to_string()),
            url: "https://a".to_string(),
            source: "Feed".to_string(),
            published_at: None,
        }];
        assert_eq!(source.fetch().unwrap().len(), 1);
        assert!(source.fetch().unwrap().is_empty());
    }
}
