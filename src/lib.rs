//! notefind - 純文字筆記的編輯核心與文件內搜索

pub mod buffer;
pub mod config;
pub mod editor;
pub mod notes;
pub mod search;
pub mod utils;

// 重新導出常用類型
pub use buffer::Document;
pub use config::{Config, SearchDefaults};
pub use editor::Editor;
pub use search::{
    find_matches, find_next, find_previous, Highlight, Match, MatchSet, Query, SearchError,
};
