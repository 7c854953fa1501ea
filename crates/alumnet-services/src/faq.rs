use alumnet_core::models::{FaqAnswer, FaqEntry};
use alumnet_core::AppError;

pub const FALLBACK_ANSWER: &str = "I'm not sure about that one. Please message the alumni \
     office admin and they will get back to you.";

/// Keyword-matching FAQ assistant
pub struct FaqAssistant {
    entries: Vec<FaqEntry>,
}

impl FaqAssistant {
    pub fn new(entries: Vec<FaqEntry>) -> Self {
        Self { entries }
    }

    /// Answer with the entry matching the most keywords. Ties go to the earlier entry.
    pub fn answer(&self, question: &str) -> Result<FaqAnswer, AppError> {
        let normalized = question.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(AppError::Validation("Question must not be empty".to_string()));
        }

        let mut best: Option<(&FaqEntry, usize)> = None;
        for entry in &self.entries {
            let score = entry.score(&normalized);
            if score > best.map_or(0, |(_, s)| s) {
                best = Some((entry, score));
            }
        }

        Ok(match best {
            Some((entry, score)) => {
                tracing::debug!(score, matched = %entry.question, "FAQ matched");
                FaqAnswer {
                    answer: entry.answer.clone(),
                    matched_question: Some(entry.question.clone()),
                }
            }
            None => FaqAnswer {
                answer: FALLBACK_ANSWER.to_string(),
                matched_question: None,
            },
        })
    }
}
