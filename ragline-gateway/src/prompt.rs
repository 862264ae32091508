//! Message lists for the two answer branches.

use ragline_core::{ChatMessage, PromptSettings};

/// `[system(rag_instruction), system(header + "\n" + context), user(query)]`
pub fn retrieval_messages(prompts: &PromptSettings, context: &str, query: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(&prompts.rag_instruction),
        ChatMessage::system(format!("{}\n{}", prompts.context_header, context)),
        ChatMessage::user(query),
    ]
}

/// `[system(chat_instruction), user(query)]`
pub fn direct_messages(prompts: &PromptSettings, query: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(&prompts.chat_instruction),
        ChatMessage::user(query),
    ]
}
