//! 筆記目錄與最近開啟的筆記

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// 視為文字筆記的副檔名（不分大小寫）
const NOTE_EXTENSIONS: &[&str] = &[
    "txt", "md", "py", "js", "html", "css", "json", "xml", "yaml", "yml", "ini", "log",
];

pub fn is_note_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            NOTE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// 列出目錄中的筆記文件（排序後）；目錄不存在時回傳空列表
pub fn list_notes(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::debug!("list_notes: cannot read {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut notes: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_note_file(path))
        .collect();
    notes.sort();
    notes
}

/// 最近開啟的筆記（最新的在前）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentNotes {
    paths: Vec<PathBuf>,
    max: usize,
}

impl RecentNotes {
    pub fn new(max: usize) -> Self {
        Self {
            paths: Vec::new(),
            max,
        }
    }

    pub fn from_paths(paths: Vec<PathBuf>, max: usize) -> Self {
        let mut recent = Self::new(max);
        for path in paths.into_iter().rev() {
            recent.add(path);
        }
        recent
    }

    /// 移到最前面，超出上限的舊項目被丟棄
    pub fn add(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.paths.retain(|p| p != &path);
        self.paths.insert(0, path);
        self.paths.truncate(self.max);
    }

    pub fn remove(&mut self, path: &Path) {
        self.paths.retain(|p| p != path);
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl Default for RecentNotes {
    fn default() -> Self {
        Self::new(10)
    }
}

fn normalize(path: &Path) -> PathBuf {
    path.components().collect()
}

/// 首頁列表：仍存在的最近筆記（保持順序），再接上目錄中其餘的筆記
pub fn hub_listing(recent: &RecentNotes, notes: &[PathBuf]) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    let mut listing = Vec::new();

    for path in recent.paths().iter().filter(|p| p.exists()) {
        if seen.insert(normalize(path)) {
            listing.push(path.clone());
        }
    }

    for path in notes {
        if seen.insert(normalize(path)) {
            listing.push(path.clone());
        }
    }

    listing
}
