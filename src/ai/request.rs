//! Chat Completion リクエストの組み立て

use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, CreateChatCompletionRequest,
};
use tracing::debug;

use super::tools::build_tools;

/// 展開済みプロンプトをシステムメッセージにする。
pub fn system_message(content: &str) -> ChatCompletionRequestMessage {
    ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
        content: ChatCompletionRequestSystemMessageContent::Text(content.to_string()),
        name: None,
    })
}

/// システムメッセージとツール定義だけを含むリクエストの雛形。
/// ユーザー発話の追加と送信は呼び出し側で行う。
pub fn persona_request(model: &str, rendered_prompt: &str) -> CreateChatCompletionRequest {
    let tools = build_tools();
    debug!(
        model,
        system_prompt_length = rendered_prompt.len(),
        tools_count = tools.len(),
        "Persona request assembled"
    );

    CreateChatCompletionRequest {
        model: model.to_string(),
        messages: vec![system_message(rendered_prompt)],
        tools: Some(tools),
        ..Default::default()
    }
}
