//! 直近の記憶ブロックの整形
//!
//! 記憶の保存・検索・ランキングは外部の記憶サブシステムの責務。
//! ここでは受け取ったエントリを `{recent_memory}` に入れるテキストにするだけ。

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use tracing::{debug, info};

/// 記憶エントリ 1 件
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemoryEntry {
    /// 記憶された時刻（RFC 3339）
    pub timestamp: DateTime<FixedOffset>,
    pub content: String,
}

/// エントリ群を記憶ブロックに整形する。
///
/// 入力順（古い順）を保ったまま新しい `max_entries` 件を残し、
/// `- [YYYY-MM-DD HH:MM] content` の形式で 1 行ずつ並べる。
/// 複数行の content は 2 スペースでインデントする。空の content は無視する。
/// 対象がなければ空文字列（初対面扱い）を返す。
pub fn format_recent_memory(
    entries: &[MemoryEntry],
    offset: FixedOffset,
    max_entries: usize,
) -> String {
    let usable: Vec<&MemoryEntry> = entries
        .iter()
        .filter(|entry| !entry.content.trim().is_empty())
        .collect();
    let skip = usable.len().saturating_sub(max_entries);

    let lines: Vec<String> = usable
        .into_iter()
        .skip(skip)
        .map(|entry| {
            let stamp = entry
                .timestamp
                .with_timezone(&offset)
                .format("%Y-%m-%d %H:%M");
            let body = entry
                .content
                .trim()
                .lines()
                .enumerate()
                .map(|(i, line)| indent_continuation(i, line))
                .collect::<Vec<_>>()
                .join("\n");
            format!("- [{stamp}] {body}")
        })
        .collect();

    debug!(
        total = entries.len(),
        kept = lines.len(),
        max_entries,
        "Recent memory formatted"
    );
    lines.join("\n")
}

/// 2 行目以降を 2 スペースでインデントする。空行には末尾の空白を残さない。
fn indent_continuation(index: usize, line: &str) -> String {
    let line = line.trim_end();
    if index == 0 || line.is_empty() {
        line.to_string()
    } else {
        format!("  {line}")
    }
}

/// 記憶ファイルを読み込んで記憶ブロックを返す。
///
/// - 拡張子 `.json`: `MemoryEntry` の配列として読み、[`format_recent_memory`] で整形
/// - それ以外: ファイル内容をそのまま使う（末尾の空白は除去）
pub fn load_memory_file(path: &Path, offset: FixedOffset, max_entries: usize) -> Result<String> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read memory file {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let block = if is_json {
        let entries: Vec<MemoryEntry> = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse memory entries in {}", path.display()))?;
        format_recent_memory(&entries, offset, max_entries)
    } else {
        content.trim_end().to_string()
    };

    info!(
        path = %path.display(),
        json = is_json,
        block_length = block.len(),
        "Memory file loaded"
    );
    Ok(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn jst() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).unwrap()
    }

    fn entry(ts: &str, content: &str) -> MemoryEntry {
        MemoryEntry {
            timestamp: DateTime::parse_from_rfc3339(ts).unwrap(),
            content: content.to_string(),
        }
    }

    #[test]
    fn empty_entries_give_empty_block() {
        assert_eq!(format_recent_memory(&[], jst(), 20), "");
    }

    #[test]
    fn entries_are_bulleted_in_offset() {
        let entries = vec![
            entry("2026-10-18T12:10:00Z", "talked about a stuck project"),
            entry("2026-10-19T08:00:00+09:00", "said \"never mind\" about the sister"),
        ];
        assert_eq!(
            format_recent_memory(&entries, jst(), 20),
            "- [2026-10-18 21:10] talked about a stuck project\n\
             - [2026-10-19 08:00] said \"never mind\" about the sister"
        );
    }

    #[test]
    fn keeps_newest_entries_only() {
        let entries = vec![
            entry("2026-10-17T00:00:00Z", "one"),
            entry("2026-10-18T00:00:00Z", "two"),
            entry("2026-10-19T00:00:00Z", "three"),
        ];
        let block = format_recent_memory(&entries, jst(), 2);
        assert!(!block.contains("one"));
        assert!(block.starts_with("- [2026-10-18 09:00] two"));
        assert!(block.ends_with("three"));
    }

    #[test]
    fn zero_max_entries_is_fresh_start() {
        let entries = vec![entry("2026-10-17T00:00:00Z", "one")];
        assert_eq!(format_recent_memory(&entries, jst(), 0), "");
    }

    #[test]
    fn multiline_content_is_indented_and_blank_skipped() {
        let entries = vec![
            entry("2026-10-18T00:00:00Z", "   "),
            entry("2026-10-19T00:00:00Z", "Rust compiled\nborrow checker finally agreed\n"),
        ];
        assert_eq!(
            format_recent_memory(&entries, jst(), 20),
            "- [2026-10-19 09:00] Rust compiled\n  borrow checker finally agreed"
        );
    }

    #[test]
    fn blank_lines_inside_content_have_no_trailing_spaces() {
        let entries = vec![entry(
            "2026-10-19T00:00:00Z",
            "first paragraph\n\n   \nsecond paragraph  ",
        )];
        let block = format_recent_memory(&entries, jst(), 20);
        assert_eq!(block, "- [2026-10-19 09:00] first paragraph\n\n\n  second paragraph");
        assert!(block.lines().all(|line| line == line.trim_end()));
    }

    #[test]
    fn load_json_memory_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("memory.json");
        std::fs::write(
            &path,
            r#"[{"timestamp": "2026-10-18T13:00:00Z", "content": "writing Go today"}]"#,
        )
        .unwrap();

        let block = load_memory_file(&path, jst(), 20).unwrap();
        assert_eq!(block, "- [2026-10-18 22:00] writing Go today");
    }

    #[test]
    fn load_text_memory_file_verbatim() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("memory.txt");
        std::fs::write(&path, "yesterday: coffee\n  (trivial)\n\n").unwrap();

        let block = load_memory_file(&path, jst(), 20).unwrap();
        assert_eq!(block, "yesterday: coffee\n  (trivial)");
    }

    #[test]
    fn load_invalid_json_reports_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.JSON");
        std::fs::write(&path, "{not json").unwrap();

        let err = load_memory_file(&path, jst(), 20).unwrap_err();
        assert!(format!("{err:#}").contains("broken.JSON"));
    }

    #[test]
    fn load_missing_file_fails() {
        let tmp = TempDir::new().unwrap();
        assert!(load_memory_file(&tmp.path().join("none.json"), jst(), 20).is_err());
    }
}
