//! 文件內搜索
//!
//! - `finder`：字面查詢 -> 匹配集合（大小寫、全字）
//! - `navigator`：依光標位置選取下一個/上一個匹配，可循環
//! - `highlight`：匹配總數與目前索引（僅供顯示）
//! - `session`：搜索狀態機，串起以上三者

mod error;
mod finder;
mod highlight;
mod navigator;
mod query;
mod session;

pub use error::SearchError;
pub use finder::find_matches;
pub use highlight::Highlight;
pub use navigator::{find_next, find_previous};
pub use query::{Match, MatchSet, Query};
pub use session::{SearchHost, SearchSession, SearchState};
