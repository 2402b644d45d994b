use std::fmt;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Debug)]
pub enum SearchError {
    /// 查詢文字為空，或在沒有查詢時導航
    InvalidQuery,
    /// 轉義後的模式仍無法編譯（例如超出大小限制）
    Pattern(regex::Error),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::InvalidQuery => write!(f, "Invalid query: search text is empty"),
            SearchError::Pattern(e) => write!(f, "Failed to build search pattern: {}", e),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SearchError::InvalidQuery => None,
            SearchError::Pattern(e) => Some(e),
        }
    }
}

impl From<regex::Error> for SearchError {
    fn from(e: regex::Error) -> Self {
        SearchError::Pattern(e)
    }
}
