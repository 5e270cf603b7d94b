//! ペルソナプロンプト
//!
//! 組み込みの Haru テンプレートと、スロット展開の型を提供する。

pub mod context;
pub mod haru;
pub mod template;

pub use context::PromptContext;
pub use haru::{haru_template, HARU_PROMPT, PERSONA_NAME};
pub use template::{PromptTemplate, Slot};
