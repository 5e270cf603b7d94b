//! AI ツールの JSON スキーマ定義
//!
//! OpenAI Function Calling 形式で、ペルソナが参照するツールを宣言する。
//! 実行は呼び出し側のエージェントが担う。

use async_openai::types::{ChatCompletionTool, ChatCompletionToolType, FunctionObject};

/// プロンプト本文から参照されるツール名
pub const RETRIEVE_MEMORY_TOOL: &str = "retrieve_memory";

/// retrieve_memory ツールの定義
pub fn retrieve_memory_tool() -> ChatCompletionTool {
    ChatCompletionTool {
        r#type: ChatCompletionToolType::Function,
        function: FunctionObject {
            name: RETRIEVE_MEMORY_TOOL.to_string(),
            description: Some(
                "Search long-term memory for past conversations or stories the user mentions that are not in the recent memory block. Call it silently; do not tell the user you are searching."
                    .to_string(),
            ),
            parameters: Some(serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "What to look for, in the user's own words"
                    },
                    "limit": {
                        "type": "integer",
                        "minimum": 1,
                        "description": "Maximum number of memories to return"
                    }
                },
                "required": ["query"]
            })),
            strict: None,
        },
    }
}

/// ペルソナが使うすべてのツール定義を構築する
pub fn build_tools() -> Vec<ChatCompletionTool> {
    vec![retrieve_memory_tool()]
}
