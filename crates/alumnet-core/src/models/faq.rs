use serde::{Deserialize, Serialize};

/// A canned question/answer pair matched by keyword
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqEntry {
    pub keywords: Vec<String>,
    pub question: String,
    pub answer: String,
}

impl FaqEntry {
    pub fn new(keywords: &[&str], question: &str, answer: &str) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            question: question.to_string(),
            answer: answer.to_string(),
        }
    }

    /// Number of keywords that occur in an already lower-cased question
    pub fn score(&self, normalized_question: &str) -> usize {
        self.keywords
            .iter()
            .filter(|k| normalized_question.contains(k.as_str()))
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqAnswer {
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_question: Option<String>,
}
