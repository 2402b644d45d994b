use std::fmt;

/// 搜索狀態的顯示用快照：匹配總數與目前選取的索引
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Highlight {
    pub total: usize,
    pub current: Option<usize>,
    /// 沒有查詢時為 false
    pub active: bool,
}

impl Highlight {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn new(total: usize, current: Option<usize>) -> Self {
        Self {
            total,
            current,
            active: true,
        }
    }
}

/// 狀態列文字："0 matches" / "No matches" / "2/5" / "5 matches"
impl fmt::Display for Highlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.active {
            return write!(f, "0 matches");
        }
        match (self.total, self.current) {
            (0, _) => write!(f, "No matches"),
            (total, Some(idx)) => write!(f, "{}/{}", idx + 1, total),
            (total, None) => write!(f, "{} matches", total),
        }
    }
}
