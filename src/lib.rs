//! Haru — 端末に住む好奇心の強いペルソナのプロンプト
//!
//! 組み込みのペルソナテキストに `{recent_memory}` / `{time}` /
//! `{session_start_time}` / `{elapsed_time}` を埋め込み、
//! 言語モデルのシステムプロンプトとして渡せる形にする。

pub mod ai;
pub mod cli;
pub mod config;
pub mod logging;
pub mod memory;
pub mod persona;
pub mod session;

pub use persona::{haru_template, PromptContext, PromptTemplate, Slot, HARU_PROMPT};
