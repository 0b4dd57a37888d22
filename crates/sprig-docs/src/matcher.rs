//! Relevance matcher: keyword/substring overlap between a question and
//! document titles.
//!
//! Both sides are normalized by lowercasing and mapping every
//! non-alphanumeric character to a space. A document matches when its
//! normalized title appears as a substring of the normalized question, or
//! when any word of the title appears as a whole token of the question.
//! The first match in file order wins; there is no scoring.

use std::collections::HashSet;

use crate::Document;

/// Lowercase and replace punctuation with spaces.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect()
}

/// Return the first relevant document, if any.
pub fn find_relevant<'a>(question: &str, docs: &'a [Document]) -> Option<&'a Document> {
    let question = normalize(question);
    let tokens: HashSet<&str> = question.split_whitespace().collect();

    docs.iter().find(|doc| {
        let title = normalize(&doc.title);
        if title.is_empty() {
            return false;
        }
        question.contains(title.trim())
            || title.split_whitespace().any(|word| tokens.contains(word))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(title: &str) -> Document {
        Document {
            title: title.into(),
            content: String::new(),
        }
    }

    #[test]
    fn normalize_strips_punctuation_and_case() {
        assert_eq!(normalize("Hello, World!"), "hello  world ");
    }

    #[test]
    fn full_title_substring_matches() {
        let docs = vec![doc("account deletion")];
        assert!(find_relevant("What is account deletion?", &docs).is_some());
    }

    #[test]
    fn single_title_word_matches() {
        let docs = vec![doc("Billing and Invoices")];
        assert!(find_relevant("where can I see my invoices", &docs).is_some());
    }

    #[test]
    fn punctuation_in_question_does_not_block_match() {
        let docs = vec![doc("Password Reset")];
        assert!(find_relevant("password... reset??", &docs).is_some());
    }

    #[test]
    fn no_shared_token_yields_none() {
        let docs = vec![doc("Password Reset"), doc("Billing")];
        assert!(find_relevant("weather forecast", &docs).is_none());
    }

    #[test]
    fn first_match_in_list_order_wins() {
        let docs = vec![doc("Shipping Rates"), doc("Shipping Times")];
        let hit = find_relevant("tell me about shipping", &docs).unwrap();
        assert_eq!(hit.title, "Shipping Rates");
    }

    #[test]
    fn empty_title_never_matches() {
        let docs = vec![doc("")];
        assert!(find_relevant("anything at all", &docs).is_none());
    }
}
