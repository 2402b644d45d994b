// 配置管理

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 搜索選項的預設值（命令列參數可覆蓋）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchDefaults {
    pub case_sensitive: bool,
    pub whole_word: bool,
    pub wrap: bool,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            whole_word: false,
            wrap: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search: SearchDefaults,
    pub max_recent_files: usize,
    pub notes_dir: Option<PathBuf>,
}

impl Config {
    pub fn new() -> Self {
        Self {
            search: SearchDefaults::default(),
            max_recent_files: 10,
            notes_dir: None,
        }
    }

    /// 讀取 JSON 配置，缺少的欄位使用預設值
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
