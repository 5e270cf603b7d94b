//! プロンプトテンプレートのパースと展開
//!
//! `{identifier}` 形式のプレースホルダーを検出し、既知のスロットとして
//! 保持する。展開は 1 パスで行い、埋め込んだ値を再走査しない。

use std::fmt;
use std::sync::OnceLock;

use anyhow::{bail, Result};
use regex::Regex;
use tracing::debug;

use super::context::PromptContext;

/// テンプレートに埋め込めるスロット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// 直近の記憶ブロック（空の場合は初対面として扱う）
    RecentMemory,
    /// 現在時刻
    Time,
    /// セッション開始時刻
    SessionStartTime,
    /// セッション開始からの経過時間
    ElapsedTime,
}

impl Slot {
    pub const ALL: [Slot; 4] = [
        Slot::RecentMemory,
        Slot::Time,
        Slot::SessionStartTime,
        Slot::ElapsedTime,
    ];

    /// 波括弧を除いたプレースホルダー名
    pub fn name(self) -> &'static str {
        match self {
            Slot::RecentMemory => "recent_memory",
            Slot::Time => "time",
            Slot::SessionStartTime => "session_start_time",
            Slot::ElapsedTime => "elapsed_time",
        }
    }

    pub fn from_name(name: &str) -> Option<Slot> {
        Slot::ALL.into_iter().find(|slot| slot.name() == name)
    }

    /// このスロットを埋める外部コンポーネントの説明
    pub fn filled_by(self) -> &'static str {
        match self {
            Slot::RecentMemory => "memory subsystem (may be empty)",
            Slot::Time => "clock source",
            Slot::SessionStartTime => "session tracker",
            Slot::ElapsedTime => "session tracker",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot(Slot),
}

/// パース済みのプロンプトテンプレート
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    segments: Vec<Segment>,
}

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{([a-z_][a-z0-9_]*)\}").expect("invalid placeholder regex"))
}

impl PromptTemplate {
    /// テンプレート文字列をパースする。
    ///
    /// 小文字の識別子を波括弧で囲んだものをプレースホルダーとみなす。
    /// 未知の名前はエラー（名前と行番号を含む）。それ以外の波括弧はリテラル。
    pub fn parse(text: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut cursor = 0;

        for caps in placeholder_regex().captures_iter(text) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };

            let Some(slot) = Slot::from_name(name.as_str()) else {
                let line = text[..whole.start()].matches('\n').count() + 1;
                bail!(
                    "unknown placeholder `{}` on line {line} (expected one of: {})",
                    whole.as_str(),
                    Slot::ALL
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            };

            if whole.start() > cursor {
                segments.push(Segment::Literal(text[cursor..whole.start()].to_string()));
            }
            segments.push(Segment::Slot(slot));
            cursor = whole.end();
        }

        if cursor < text.len() {
            segments.push(Segment::Literal(text[cursor..].to_string()));
        }

        debug!(segment_count = segments.len(), "Prompt template parsed");
        Ok(Self { segments })
    }

    /// 出現順のスロット（重複を含む）
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Slot(slot) => Some(*slot),
            Segment::Literal(_) => None,
        })
    }

    /// テンプレート中に一度も現れないスロット
    pub fn missing_slots(&self) -> Vec<Slot> {
        Slot::ALL
            .into_iter()
            .filter(|slot| !self.slots().any(|s| s == *slot))
            .collect()
    }

    /// コンテキストの値でスロットを埋めた文字列を返す。
    pub fn render(&self, context: &PromptContext) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot(slot) => out.push_str(context.get(*slot)),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> PromptContext {
        PromptContext {
            recent_memory: "- [2026-10-18 21:00] talked about Rust".to_string(),
            time: "2026-10-19 09:00:00 +09:00".to_string(),
            session_start_time: "2026-10-19 08:30:00 +09:00".to_string(),
            elapsed_time: "30 minutes ago".to_string(),
        }
    }

    #[test]
    fn slot_names_round_trip() {
        for slot in Slot::ALL {
            assert_eq!(Slot::from_name(slot.name()), Some(slot));
        }
        assert_eq!(Slot::from_name("memory"), None);
    }

    #[test]
    fn slot_display_has_braces() {
        assert_eq!(Slot::ElapsedTime.to_string(), "{elapsed_time}");
    }

    #[test]
    fn render_replaces_all_slots() {
        let text = "Now: {time}\nStart: {session_start_time} ({elapsed_time})\n{recent_memory}";
        let template = PromptTemplate::parse(text).unwrap();
        let out = template.render(&context());
        assert_eq!(
            out,
            "Now: 2026-10-19 09:00:00 +09:00\n\
             Start: 2026-10-19 08:30:00 +09:00 (30 minutes ago)\n\
             - [2026-10-18 21:00] talked about Rust"
        );
    }

    #[test]
    fn render_keeps_time_value_verbatim() {
        let template = PromptTemplate::parse("Current time: {time}").unwrap();
        for value in ["x", "昨日の夜", "{not a slot}", "  padded  "] {
            let ctx = PromptContext {
                time: value.to_string(),
                ..context()
            };
            assert!(template.render(&ctx).contains(value));
        }
    }

    #[test]
    fn render_does_not_rescan_values() {
        let template = PromptTemplate::parse("[{recent_memory}] {time}").unwrap();
        let ctx = PromptContext {
            recent_memory: "{time}".to_string(),
            ..context()
        };
        assert_eq!(template.render(&ctx), "[{time}] 2026-10-19 09:00:00 +09:00");
    }

    #[test]
    fn empty_memory_keeps_literal_text() {
        let text = "## Recent Memory\n\n{recent_memory}\n\nIf empty, treat it as a fresh start.";
        let template = PromptTemplate::parse(text).unwrap();
        let ctx = PromptContext {
            recent_memory: String::new(),
            ..context()
        };
        assert_eq!(
            template.render(&ctx),
            "## Recent Memory\n\n\n\nIf empty, treat it as a fresh start."
        );
    }

    #[test]
    fn unknown_placeholder_is_rejected_with_line() {
        let err = PromptTemplate::parse("line one\nline two {mood}\n").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("{mood}"));
        assert!(msg.contains("line 2"));
    }

    #[test]
    fn non_identifier_braces_are_literal() {
        let text = r#"{ "json": true } {Time} {} {1st}"#;
        let template = PromptTemplate::parse(text).unwrap();
        assert_eq!(template.slots().count(), 0);
        assert_eq!(template.render(&context()), text);
    }

    #[test]
    fn duplicate_slots_are_kept() {
        let template = PromptTemplate::parse("{time} and again {time}").unwrap();
        assert_eq!(template.slots().collect::<Vec<_>>(), vec![Slot::Time, Slot::Time]);
        assert_eq!(
            template.render(&context()),
            "2026-10-19 09:00:00 +09:00 and again 2026-10-19 09:00:00 +09:00"
        );
    }

    #[test]
    fn missing_slots_are_reported() {
        let template = PromptTemplate::parse("only {time}").unwrap();
        assert_eq!(
            template.missing_slots(),
            vec![Slot::RecentMemory, Slot::SessionStartTime, Slot::ElapsedTime]
        );
    }

    #[test]
    fn empty_template_renders_empty() {
        let template = PromptTemplate::parse("").unwrap();
        assert_eq!(template.render(&context()), "");
        assert_eq!(template.missing_slots().len(), 4);
    }
}
