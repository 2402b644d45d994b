use regex::RegexBuilder;

use super::error::{Result, SearchError};
use super::query::{Match, MatchSet, Query};

/// 在整段文字中找出所有匹配
///
/// 查詢文字一律視為字面值（先轉義再匹配），因此 `.`、`(` 等字符不會報錯。
/// 匹配後從匹配結尾繼續掃描（不產生重疊匹配，`"aa"` 在 `"aaaa"` 中為 0 和 2）；
/// 被全字規則拒絕的候選則從其起點的下一個字符繼續，避免漏掉合法的匹配。
pub fn find_matches(text: &str, query: &Query) -> Result<MatchSet> {
    if query.is_empty() {
        return Err(SearchError::InvalidQuery);
    }

    let regex = RegexBuilder::new(&regex::escape(&query.text))
        .case_insensitive(!query.case_sensitive)
        .build()?;

    let mut matches = MatchSet::new();
    let mut pos = 0;

    // 字節偏移 -> 字符偏移的增量換算（匹配按順序產生）
    let mut counted_bytes = 0;
    let mut counted_chars = 0;

    while pos <= text.len() {
        let Some(m) = regex.find_at(text, pos) else {
            break;
        };

        if query.whole_word && !is_word_bounded(text, m.start(), m.end()) {
            pos = next_char_start(text, m.start());
            continue;
        }

        counted_chars += text[counted_bytes..m.start()].chars().count();
        counted_bytes = m.start();

        // 忽略大小寫時匹配到的字節長度可能和查詢不同，長度以字符計
        let len = text[m.start()..m.end()].chars().count();
        matches.push(Match::new(counted_chars, len));

        pos = m.end();
    }

    log::debug!(
        "find_matches: {:?} (case_sensitive={}, whole_word={}) -> {} matches",
        query.text,
        query.case_sensitive,
        query.whole_word,
        matches.len()
    );

    Ok(matches)
}

/// 字母、數字或底線
pub(crate) fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// 匹配前後（若存在）都不是單詞字符
fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

fn next_char_start(text: &str, byte_pos: usize) -> usize {
    byte_pos + text[byte_pos..].chars().next().map_or(1, char::len_utf8)
}
