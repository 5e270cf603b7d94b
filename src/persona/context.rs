//! テンプレートに埋め込む値

use chrono::{DateTime, FixedOffset};

use super::template::Slot;
use crate::session::SessionClock;

/// 4 つのスロットに対応する値。すべて呼び出し側が用意する。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptContext {
    /// 直近の記憶。空文字列なら初対面として扱われる。
    pub recent_memory: String,
    pub time: String,
    pub session_start_time: String,
    pub elapsed_time: String,
}

impl PromptContext {
    /// 記憶ブロックと時計から値を組み立てる。
    pub fn from_clock(
        recent_memory: impl Into<String>,
        clock: &SessionClock,
        now: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            recent_memory: recent_memory.into(),
            time: clock.format_time(now),
            session_start_time: clock.session_start_time(),
            elapsed_time: clock.elapsed(now),
        }
    }

    pub fn get(&self, slot: Slot) -> &str {
        match slot {
            Slot::RecentMemory => &self.recent_memory,
            Slot::Time => &self.time,
            Slot::SessionStartTime => &self.session_start_time,
            Slot::ElapsedTime => &self.elapsed_time,
        }
    }

    /// 記憶ブロックが空（空白のみを含む）かどうか
    pub fn is_fresh_start(&self) -> bool {
        self.recent_memory.trim().is_empty()
    }
}
