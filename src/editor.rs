use crate::buffer::Document;
use crate::search::{Highlight, Match, Query, SearchHost, SearchSession};
use anyhow::Result;
use std::path::Path;

/// 一個分頁的編輯會話：文件、光標、選取與搜索狀態
pub struct Editor {
    document: Document,
    caret: usize,             // 字符偏移
    selection: Option<Match>, // 目前選取（搜索命中時設定）
    search: SearchSession,
    message: Option<String>,
}

/// 交給搜索的宿主視圖（與 `search` 欄位分開借用）
struct HostView<'a> {
    document: &'a Document,
    caret: usize,
}

impl SearchHost for HostView<'_> {
    fn document_text(&self) -> String {
        self.document.text()
    }

    fn caret_offset(&self) -> usize {
        self.caret
    }
}

impl Editor {
    pub fn new(file_path: Option<&Path>) -> Result<Self> {
        let document = match file_path {
            Some(path) => Document::from_file(path)?,
            None => Document::new(),
        };
        Ok(Self::with_document(document))
    }

    pub fn with_document(document: Document) -> Self {
        Self {
            document,
            caret: 0,
            selection: None,
            search: SearchSession::new(),
            message: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn selection(&self) -> Option<Match> {
        self.selection
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn set_caret(&mut self, pos: usize) {
        self.caret = pos.min(self.document.len_chars());
        self.selection = None;
    }

    /// 在光標處插入文字，光標移到插入內容之後
    pub fn insert(&mut self, text: &str) -> Result<()> {
        self.document.insert(self.caret, text);
        self.caret = (self.caret + text.chars().count()).min(self.document.len_chars());
        self.selection = None;
        self.document_changed()
    }

    pub fn delete_range(&mut self, start: usize, end: usize) -> Result<()> {
        self.document.delete_range(start, end);
        if self.caret > start {
            self.caret = start.max(self.caret.saturating_sub(end.saturating_sub(start)));
        }
        self.caret = self.caret.min(self.document.len_chars());
        self.selection = None;
        self.document_changed()
    }

    fn document_changed(&mut self) -> Result<()> {
        let highlight = self.search.document_changed(&self.document.text())?;
        if highlight.active {
            self.message = Some(highlight.to_string());
        }
        Ok(())
    }

    /// 即時搜索：提交查詢並高亮所有匹配（不移動光標）
    pub fn search(&mut self, query: Query) -> Result<Highlight> {
        let highlight = self.search.set_query(query, &self.document.text())?;
        self.message = Some(highlight.to_string());
        Ok(highlight)
    }

    pub fn find_next(&mut self, wrap: bool) -> Result<Option<Match>> {
        let host = HostView {
            document: &self.document,
            caret: self.search_caret(),
        };
        let found = self.search.find_next(&host, wrap)?;
        self.after_navigate(found);
        Ok(found)
    }

    pub fn find_previous(&mut self, wrap: bool) -> Result<Option<Match>> {
        let host = HostView {
            document: &self.document,
            caret: self.search_caret(),
        };
        let found = self.search.find_previous(&host, wrap)?;
        self.after_navigate(found);
        Ok(found)
    }

    /// 有選取時以選取起點作為搜索位置，逐個前後移動
    fn search_caret(&self) -> usize {
        self.selection.map_or(self.caret, |m| m.start)
    }

    fn after_navigate(&mut self, found: Option<Match>) {
        match found {
            Some(m) => {
                self.caret = m.start;
                self.selection = Some(m);
                self.message = Some(self.search.highlight().to_string());
            }
            None => {
                let highlight = self.search.highlight();
                self.message = Some(if highlight.total == 0 {
                    highlight.to_string()
                } else {
                    "No more matches".to_string()
                });
            }
        }
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
        self.message = None;
    }

    pub fn highlight(&self) -> Highlight {
        self.search.highlight()
    }

    /// 所有匹配（供高亮顯示）
    pub fn matches(&self) -> &[Match] {
        self.search.matches()
    }

    /// 字符偏移 -> (行, 列)，皆為 0-based
    pub fn position_of(&self, offset: usize) -> (usize, usize) {
        let row = self.document.char_to_line(offset);
        (row, offset.saturating_sub(self.document.line_to_char(row)))
    }

    pub fn save(&mut self) -> Result<()> {
        self.document.save()?;
        self.message = Some(format!("Saved {}", self.document.file_name()));
        log::debug!("saved {}", self.document.file_name());
        Ok(())
    }
}
