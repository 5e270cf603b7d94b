//! 言語モデル向けの宣言
//!
//! ペルソナが呼び出せるツールの定義と、展開済みプロンプトを
//! Chat Completion リクエストに載せるためのヘルパー。
//! API 呼び出しそのものは行わない。

mod request;
mod tools;

pub use request::{persona_request, system_message};
pub use tools::{build_tools, retrieve_memory_tool, RETRIEVE_MEMORY_TOOL};
