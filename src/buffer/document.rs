use anyhow::{Context, Result};
use ropey::Rope;
use std::fs;
use std::path::{Path, PathBuf};

/// 一份筆記的文字內容
pub struct Document {
    rope: Rope,
    file_path: Option<PathBuf>,
    modified: bool,
    encoding: &'static encoding_rs::Encoding, // 文件編碼
    has_bom: bool,                            // 存檔時寫回 BOM
}

impl Document {
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            file_path: None,
            modified: false,
            encoding: encoding_rs::UTF_8,
            has_bom: false,
        }
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            ..Self::new()
        }
    }

    /// 檢測文件編碼，基於 BOM
    fn detect_encoding(bytes: &[u8]) -> (&'static encoding_rs::Encoding, usize) {
        if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
            (encoding_rs::UTF_8, 3)
        } else if bytes.starts_with(&[0xFF, 0xFE]) {
            (encoding_rs::UTF_16LE, 2)
        } else if bytes.starts_with(&[0xFE, 0xFF]) {
            (encoding_rs::UTF_16BE, 2)
        } else {
            // 無 BOM，預設 UTF-8
            (encoding_rs::UTF_8, 0)
        }
    }

    /// 打開筆記；文件不存在時視為新筆記（空內容、已修改）
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self {
                file_path: Some(path.to_path_buf()),
                modified: true,
                ..Self::new()
            });
        }

        let bytes =
            fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;

        let (encoding, bom_length) = Self::detect_encoding(&bytes);
        let (decoded, _, had_errors) = encoding.decode(&bytes[bom_length..]);
        if had_errors {
            log::warn!("Encoding errors detected in file: {}", path.display());
        }

        Ok(Self {
            rope: Rope::from_str(&decoded),
            file_path: Some(path.to_path_buf()),
            modified: false,
            encoding,
            has_bom: bom_length > 0,
        })
    }

    pub fn insert(&mut self, pos: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        let pos = pos.min(self.rope.len_chars());
        self.rope.insert(pos, text);
        self.touch();
    }

    pub fn delete_range(&mut self, start: usize, end: usize) {
        let end = end.min(self.rope.len_chars());
        if start < end {
            self.rope.remove(start..end);
            self.touch();
        }
    }

    /// 以新內容取代全部文字
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.touch();
    }

    fn touch(&mut self) {
        self.modified = true;
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// 從 `start` 起取 `len` 個字符（超出範圍時截斷）
    pub fn slice(&self, start: usize, len: usize) -> String {
        let total = self.rope.len_chars();
        let start = start.min(total);
        let end = start.saturating_add(len).min(total);
        self.rope.slice(start..end).to_string()
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    pub fn line_to_char(&self, line_idx: usize) -> usize {
        self.rope.line_to_char(line_idx.min(self.line_count()))
    }

    pub fn char_to_line(&self, char_idx: usize) -> usize {
        self.rope.char_to_line(char_idx.min(self.rope.len_chars()))
    }

    /// 指定行的內容（不含換行符）
    pub fn line_content(&self, line_idx: usize) -> String {
        if line_idx >= self.line_count() {
            return String::new();
        }
        let line = self.rope.line(line_idx).to_string();
        line.trim_end_matches(['\n', '\r']).to_string()
    }

    pub fn save(&mut self) -> Result<()> {
        let Some(path) = self.file_path.clone() else {
            anyhow::bail!("No file path set");
        };
        self.write_to(&path)?;
        self.modified = false;
        Ok(())
    }

    pub fn save_as(&mut self, path: &Path) -> Result<()> {
        self.write_to(path)?;
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }

    fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.encode())
            .with_context(|| format!("Failed to write file: {}", path.display()))
    }

    /// 依讀入時的編碼編碼內容
    ///
    /// `Encoding::encode` 對 UTF-16 會改用 UTF-8 輸出，所以 UTF-16 自行處理。
    fn encode(&self) -> Vec<u8> {
        let contents = self.rope.to_string();

        if self.encoding == encoding_rs::UTF_16LE {
            let mut bytes = vec![0xFF, 0xFE];
            bytes.extend(contents.encode_utf16().flat_map(|c| c.to_le_bytes()));
            return bytes;
        }
        if self.encoding == encoding_rs::UTF_16BE {
            let mut bytes = vec![0xFE, 0xFF];
            bytes.extend(contents.encode_utf16().flat_map(|c| c.to_be_bytes()));
            return bytes;
        }

        let (encoded, _, had_errors) = self.encoding.encode(&contents);
        if had_errors {
            log::warn!("Encoding errors occurred while encoding as {}", self.encoding.name());
        }

        let mut bytes = Vec::with_capacity(encoded.len() + 3);
        if self.has_bom && self.encoding == encoding_rs::UTF_8 {
            bytes.extend_from_slice(&[0xEF, 0xBB, 0xBF]);
        }
        bytes.extend_from_slice(&encoded);
        bytes
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn file_name(&self) -> String {
        self.file_path
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("Untitled")
            .to_string()
    }

    /// 獲取當前編碼
    pub fn encoding(&self) -> &'static encoding_rs::Encoding {
        self.encoding
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_utf8_file_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("note.txt");
        fs::write(&file_path, "Hello, 世界!").unwrap();

        let mut doc = Document::from_file(&file_path).unwrap();
        assert_eq!(doc.encoding().name(), "UTF-8");
        assert_eq!(doc.len_chars(), 10);
        assert!(!doc.is_modified());

        doc.insert(doc.len_chars(), "\nmore");
        doc.save().unwrap();
        assert!(!doc.is_modified());
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "Hello, 世界!\nmore");
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("bom.txt");

        let mut content = vec![0xEF, 0xBB, 0xBF];
        content.extend_from_slice("cat".as_bytes());
        fs::write(&file_path, content).unwrap();

        let doc = Document::from_file(&file_path).unwrap();
        assert_eq!(doc.text(), "cat");
    }

    #[test]
    fn test_utf16le_bom_detection() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("utf16le.txt");

        let mut content = vec![0xFF, 0xFE];
        let utf16_bytes: Vec<u8> = "Hello"
            .encode_utf16()
            .flat_map(|c| c.to_le_bytes())
            .collect();
        content.extend_from_slice(&utf16_bytes);
        fs::write(&file_path, content).unwrap();

        let doc = Document::from_file(&file_path).unwrap();
        assert_eq!(doc.encoding().name(), "UTF-16LE");
        assert_eq!(doc.text(), "Hello");
    }

    #[test]
    fn test_utf16le_save_keeps_encoding() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("utf16le.txt");

        let content = vec![0xFF, 0xFE, 0x48, 0x00, 0x69, 0x00];
        fs::write(&file_path, &content).unwrap();

        let mut doc = Document::from_file(&file_path).unwrap();
        assert_eq!(doc.text(), "Hi");
        doc.save().unwrap();
        assert_eq!(fs::read(&file_path).unwrap(), content);

        let reopened = Document::from_file(&file_path).unwrap();
        assert_eq!(reopened.encoding().name(), "UTF-16LE");
    }

    #[test]
    fn test_utf16be_bom_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("utf16be.txt");

        let mut content = vec![0xFE, 0xFF];
        content.extend("貓 cat".encode_utf16().flat_map(|c| c.to_be_bytes()));
        fs::write(&file_path, &content).unwrap();

        let mut doc = Document::from_file(&file_path).unwrap();
        assert_eq!(doc.encoding().name(), "UTF-16BE");
        assert_eq!(doc.text(), "貓 cat");

        doc.save().unwrap();
        assert_eq!(fs::read(&file_path).unwrap(), content);
    }

    #[test]
    fn test_utf8_bom_is_written_back() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("bom.txt");

        let mut content = vec![0xEF, 0xBB, 0xBF];
        content.extend_from_slice("cat".as_bytes());
        fs::write(&file_path, &content).unwrap();

        let mut doc = Document::from_file(&file_path).unwrap();
        doc.insert(3, "s");
        doc.save().unwrap();

        let mut expected = vec![0xEF, 0xBB, 0xBF];
        expected.extend_from_slice("cats".as_bytes());
        assert_eq!(fs::read(&file_path).unwrap(), expected);
    }

    #[test]
    fn test_save_as_moves_path_and_clears_modified() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("renamed.md");

        let mut doc = Document::from_text("draft");
        doc.set_text("final text");
        assert!(doc.is_modified());
        assert!(doc.file_path().is_none());

        doc.save_as(&file_path).unwrap();
        assert!(!doc.is_modified());
        assert_eq!(doc.file_path(), Some(file_path.as_path()));
        assert_eq!(doc.file_name(), "renamed.md");
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "final text");
    }

    #[test]
    fn test_set_text_replaces_content() {
        let mut doc = Document::from_text("old");
        assert!(!doc.is_modified());
        doc.set_text("new\nlines");
        assert!(doc.is_modified());
        assert_eq!(doc.line_count(), 2);
        assert_eq!(doc.text(), "new\nlines");
    }

    #[test]
    fn test_missing_file_opens_as_new_note() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("new.md");

        let doc = Document::from_file(&file_path).unwrap();
        assert!(doc.is_empty());
        assert!(doc.is_modified());
        assert_eq!(doc.file_name(), "new.md");
    }

    #[test]
    fn test_save_without_path_fails() {
        let mut doc = Document::from_text("text");
        assert!(doc.save().is_err());
        assert_eq!(doc.file_name(), "Untitled");
    }

    #[test]
    fn test_edits_mark_modified() {
        let mut doc = Document::from_text("abc");
        // 空操作不算修改
        doc.insert(0, "");
        doc.delete_range(5, 9);
        assert!(!doc.is_modified());

        doc.insert(1, "X");
        assert_eq!(doc.text(), "aXbc");
        doc.delete_range(0, 2);
        assert_eq!(doc.text(), "bc");
        assert!(doc.is_modified());
    }

    #[test]
    fn test_slice_and_lines() {
        let doc = Document::from_text("first\r\nsecond line\nthird");
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.line_content(1), "second line");
        assert_eq!(doc.char_to_line(8), 1);
        assert_eq!(doc.line_to_char(2), 19);
        assert_eq!(doc.slice(7, 6), "second");
        assert_eq!(doc.slice(20, 100), "hird");
    }
}
