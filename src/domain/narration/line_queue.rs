//! 行队列
//!
//! 将文本按换行拆分为待朗读的行（支持 \n 和 \r\n），去除首尾空白并丢弃空行

/// 有序的待朗读行
///
/// 不变量:
/// - 每一行都非空且已 trim
/// - 顺序与原文一致
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineQueue {
    lines: Vec<String>,
}

impl LineQueue {
    /// 从文本构建行队列
    pub fn from_text(text: &str) -> Self {
        let lines = text
            .lines()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines_are_dropped() {
        let queue = LineQueue::from_text("Hello.\n\nWorld.");
        assert_eq!(queue.as_slice(), ["Hello.", "World."]);
    }

    #[test]
    fn test_lines_are_trimmed_and_crlf_handled() {
        let queue = LineQueue::from_text("  - first point  \r\n\t\r\n- second point\r\n   ");
        assert_eq!(queue.as_slice(), ["- first point", "- second point"]);
    }

    #[test]
    fn test_empty_text_yields_empty_queue() {
        assert!(LineQueue::from_text("").is_empty());
        assert!(LineQueue::from_text(" \n \n").is_empty());
    }

    #[test]
    fn test_order_is_preserved() {
        let text = "c\nb\na\nb";
        let queue = LineQueue::from_text(text);
        let collected: Vec<&str> = queue.iter().collect();
        assert_eq!(collected, vec!["c", "b", "a", "b"]);
        assert_eq!(queue.get(3), Some("b"));
        assert_eq!(queue.get(4), None);
    }

    #[test]
    fn test_matches_split_trim_filter_for_mixed_input() {
        let text = "• पहला बिंदु\n\n   • दूसरा बिंदु   \n\n\n• third";
        let expected: Vec<String> = text
            .split('\n')
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();
        assert_eq!(LineQueue::from_text(text).as_slice(), expected.as_slice());
    }
}
