use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmotextError {
    // 输入错误
    #[error("No usable input text")]
    EmptyInput,

    // 词典来源错误
    #[error("Lexicon file unavailable: {path} - {reason}")]
    LexiconFile { path: String, reason: String },

    #[error("Lexicon parse error at line {line}: {reason}")]
    LexiconParse { line: usize, reason: String },

    #[error("Lexicon cache error: {0}")]
    Cache(String),

    // 远程扩充错误
    #[error("Enrichment request failed: {0}")]
    EnrichmentTransport(String),

    #[error("Enrichment service returned {status} for {url}")]
    EnrichmentStatus { status: u16, url: String },

    #[error("Enrichment timed out after {millis}ms")]
    EnrichmentTimeout { millis: u64 },

    #[error("Enrichment service returned no emotion words")]
    EnrichmentEmpty,

    // 配置错误
    #[error("Config parse error: {path} - {reason}")]
    ConfigParse { path: String, reason: String },

    #[error("Config directory unavailable")]
    ConfigDirUnavailable,

    // 其他错误
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for EmotextError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => EmotextError::EnrichmentStatus {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            },
            None => EmotextError::EnrichmentTransport(err.to_string()),
        }
    }
}

pub type EmotextResult<T> = Result<T, EmotextError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(EmotextError::EmptyInput.to_string(), "No usable input text");

        let err = EmotextError::EnrichmentTimeout { millis: 250 };
        assert_eq!(err.to_string(), "Enrichment timed out after 250ms");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: EmotextError = io.into();
        assert!(matches!(err, EmotextError::Io(_)));
    }
}
