//! Prompt construction for the generation call.
//!
//! The prompt constrains the model to the matched document: strict rules,
//! the document content, a transcript of recent conversation history, and
//! the question.

use sprig_core::Message;
use sprig_docs::Document;

use crate::handlers::chat::FALLBACK_REPLY;

/// Build the full prompt for one chat turn.
pub fn build_prompt(doc: &Document, history: &[Message], question: &str) -> String {
    let transcript = history
        .iter()
        .map(|m| format!("{}: {}", m.role, m.content))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a support assistant.\n\
         \n\
         STRICT RULES:\n\
         1. Answer ONLY using the documentation provided below.\n\
         2. Do NOT use external knowledge.\n\
         3. If answer not found, reply exactly:\n\
         \"{FALLBACK_REPLY}\"\n\
         \n\
         Documentation:\n\
         {content}\n\
         \n\
         Conversation History:\n\
         {transcript}\n\
         \n\
         User Question:\n\
         {question}\n",
        content = doc.content,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        Document {
            title: "Password Reset".into(),
            content: "Use the forgot-password link.".into(),
        }
    }

    #[test]
    fn prompt_embeds_document_and_question() {
        let prompt = build_prompt(&doc(), &[], "how do I reset?");
        assert!(prompt.contains("Use the forgot-password link."));
        assert!(prompt.contains("how do I reset?"));
        assert!(prompt.contains("STRICT RULES"));
        assert!(prompt.contains(FALLBACK_REPLY));
    }

    #[test]
    fn prompt_renders_history_as_role_prefixed_lines() {
        let history = vec![Message::user("hi"), Message::assistant("hello")];
        let prompt = build_prompt(&doc(), &history, "next question");
        assert!(prompt.contains("user: hi\nassistant: hello"));
    }
}
