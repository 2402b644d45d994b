use super::query::Match;

/// 選取起點嚴格大於光標的第一個匹配
///
/// 比較只看匹配起點，不看結尾：光標落在匹配中間時，該匹配視為已經過。
/// 找不到時若 `wrap` 則回到第一個匹配，否則回傳 `None`。
pub fn find_next(matches: &[Match], caret: usize, wrap: bool) -> Option<usize> {
    let idx = matches.partition_point(|m| m.start <= caret);
    if idx < matches.len() {
        Some(idx)
    } else if wrap && !matches.is_empty() {
        Some(0)
    } else {
        None
    }
}

/// 選取起點嚴格小於光標的最後一個匹配，`wrap` 時回到最後一個匹配
pub fn find_previous(matches: &[Match], caret: usize, wrap: bool) -> Option<usize> {
    let idx = matches.partition_point(|m| m.start < caret);
    if idx > 0 {
        Some(idx - 1)
    } else if wrap && !matches.is_empty() {
        Some(matches.len() - 1)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Match> {
        vec![Match::new(5, 2), Match::new(9, 2), Match::new(20, 2)]
    }

    #[test]
    fn test_next_selects_first_start_after_caret() {
        let matches = sample();
        assert_eq!(find_next(&matches, 0, false), Some(0));
        assert_eq!(find_next(&matches, 5, false), Some(1));
        assert_eq!(find_next(&matches, 10, false), Some(2));
    }

    #[test]
    fn test_next_uses_start_not_span() {
        // 光標在第一個匹配內部（5..7），下一個是起點 9
        let matches = sample();
        assert_eq!(find_next(&matches, 6, false), Some(1));
        assert_eq!(find_next(&matches, 4, false), Some(0));
    }

    #[test]
    fn test_next_wraps_to_first() {
        let matches = sample();
        assert_eq!(find_next(&matches, 20, true), Some(0));
        assert_eq!(find_next(&matches, 100, true), Some(0));
    }

    #[test]
    fn test_next_without_wrap_at_end() {
        let matches = sample();
        assert_eq!(find_next(&matches, 20, false), None);
        assert_eq!(find_next(&matches, 21, false), None);
    }

    #[test]
    fn test_previous_at_start_wraps_to_last() {
        let matches = sample();
        assert_eq!(find_previous(&matches, 0, true), Some(2));
        assert_eq!(find_previous(&matches, 5, true), Some(2));
    }

    #[test]
    fn test_previous_selects_last_start_before_caret() {
        let matches = sample();
        assert_eq!(find_previous(&matches, 6, false), Some(0));
        assert_eq!(find_previous(&matches, 20, false), Some(1));
        assert_eq!(find_previous(&matches, 50, false), Some(2));
        assert_eq!(find_previous(&matches, 5, false), None);
    }

    #[test]
    fn test_empty_set_is_never_found() {
        assert_eq!(find_next(&[], 0, true), None);
        assert_eq!(find_previous(&[], 0, true), None);
    }

    #[test]
    fn test_wrap_never_misses_on_non_empty_set() {
        let matches = sample();
        for caret in 0..30 {
            assert!(find_next(&matches, caret, true).is_some());
            assert!(find_previous(&matches, caret, true).is_some());
        }
    }
}
