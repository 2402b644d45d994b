use super::error::{Result, SearchError};
use super::finder::find_matches;
use super::highlight::Highlight;
use super::navigator::{find_next, find_previous};
use super::query::{Match, MatchSet, Query};

/// 搜索的宿主（編輯會話）：每次搜索前重新提供文字與光標
pub trait SearchHost {
    fn document_text(&self) -> String;
    /// 0-based 字符偏移
    fn caret_offset(&self) -> usize;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// 沒有查詢
    Idle,
    /// 有查詢，尚未選取匹配
    Searching,
    /// 有查詢，已選取某個匹配
    Selected(usize),
}

pub struct SearchSession {
    query: Option<Query>,
    matches: MatchSet,
    state: SearchState,
}

impl SearchSession {
    pub fn new() -> Self {
        Self {
            query: None,
            matches: MatchSet::new(),
            state: SearchState::Idle,
        }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn current_match(&self) -> Option<Match> {
        match self.state {
            SearchState::Selected(idx) => self.matches.get(idx).copied(),
            _ => None,
        }
    }

    /// 提交查詢（文字或選項改變、或即時搜索時每次按鍵）
    ///
    /// 空文字等同清除搜索。匹配集合一律重新計算，選取重置。
    pub fn set_query(&mut self, query: Query, text: &str) -> Result<Highlight> {
        if query.is_empty() {
            self.clear();
            return Ok(self.highlight());
        }

        let matches = find_matches(text, &query)?;
        self.matches = matches;
        self.query = Some(query);
        self.state = SearchState::Searching;
        Ok(self.highlight())
    }

    /// 文件內容在查詢之下改變
    pub fn document_changed(&mut self, text: &str) -> Result<Highlight> {
        if let Some(query) = &self.query {
            let matches = find_matches(text, query)?;
            self.matches = matches;
            self.state = SearchState::Searching;
        }
        Ok(self.highlight())
    }

    pub fn clear(&mut self) {
        self.query = None;
        self.matches.clear();
        self.state = SearchState::Idle;
    }

    /// 選取光標之後的匹配；`Ok(None)` 表示該方向沒有更多匹配
    pub fn find_next<H: SearchHost + ?Sized>(
        &mut self,
        host: &H,
        wrap: bool,
    ) -> Result<Option<Match>> {
        self.navigate(host, wrap, find_next)
    }

    /// 選取光標之前的匹配
    pub fn find_previous<H: SearchHost + ?Sized>(
        &mut self,
        host: &H,
        wrap: bool,
    ) -> Result<Option<Match>> {
        self.navigate(host, wrap, find_previous)
    }

    fn navigate<H: SearchHost + ?Sized>(
        &mut self,
        host: &H,
        wrap: bool,
        step: fn(&[Match], usize, bool) -> Option<usize>,
    ) -> Result<Option<Match>> {
        let query = self.query.as_ref().ok_or(SearchError::InvalidQuery)?;

        // 不信任舊的匹配集合：文字可能已在未通知的情況下改變
        let fresh = find_matches(&host.document_text(), query)?;
        if fresh != self.matches {
            log::debug!("navigate: document changed under query, recomputed matches");
            self.matches = fresh;
            self.state = SearchState::Searching;
        }

        let caret = host.caret_offset();
        match step(&self.matches, caret, wrap) {
            Some(idx) => {
                log::debug!(
                    "navigate: caret {} -> match {}/{}",
                    caret,
                    idx + 1,
                    self.matches.len()
                );
                self.state = SearchState::Selected(idx);
                Ok(Some(self.matches[idx]))
            }
            None => Ok(None),
        }
    }

    pub fn highlight(&self) -> Highlight {
        match self.state {
            SearchState::Idle => Highlight::idle(),
            SearchState::Searching => Highlight::new(self.matches.len(), None),
            SearchState::Selected(idx) => Highlight::new(self.matches.len(), Some(idx)),
        }
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}
