use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle status of a tracked deliverable.
///
/// The declaration order is the canonical display order used by every
/// aggregate view, and `status as usize` indexes per-status counters.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
)]
pub enum DocumentStatus {
    #[default]
    ToStart,
    InProgress,
    Finished,
}

const TO_START_TOKENS: &[&str] = &[
    "to start",
    "tostart",
    "to_start",
    "not started",
    "pending",
    "a iniciar",
    "à iniciar",
    "nao iniciado",
    "não iniciado",
    "pendente",
];

const IN_PROGRESS_TOKENS: &[&str] = &[
    "in progress",
    "inprogress",
    "in_progress",
    "ongoing",
    "em andamento",
    "andamento",
    "em progresso",
    "em execução",
    "em execucao",
];

const FINISHED_TOKENS: &[&str] = &[
    "finished",
    "done",
    "completed",
    "complete",
    "finalizado",
    "finalizada",
    "concluído",
    "concluido",
    "concluída",
    "concluida",
];

const COMPLETION_KEYWORDS: &[&str] = &["finaliz", "conclu", "complet", "finish", "done"];
const PROGRESS_KEYWORDS: &[&str] = &["andamento", "progress", "execu"];
// A keyword preceded by any of these words states the opposite.
const NEGATION_WORDS: &[&str] = &[
    "not",
    "no",
    "não",
    "nao",
    "sem",
    "without",
    "aguardando",
    "awaiting",
    "pendente",
    "pending",
];

impl DocumentStatus {
    pub const ALL: [DocumentStatus; 3] = [
        DocumentStatus::ToStart,
        DocumentStatus::InProgress,
        DocumentStatus::Finished,
    ];

    /// Maps free text onto the closed vocabulary. Never fails: text that
    /// matches no token falls back to keyword containment and finally to
    /// `ToStart`.
    pub fn from_raw(raw: &str) -> Self {
        let needle = raw.trim().to_lowercase();
        if needle.is_empty() {
            return DocumentStatus::ToStart;
        }
        for status in Self::ALL {
            if status.tokens().contains(&needle.as_str()) {
                return status;
            }
        }
        let words: Vec<&str> = needle
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        if let Some(pos) = keyword_position(&words, COMPLETION_KEYWORDS) {
            return if negated(&words[..pos]) {
                DocumentStatus::ToStart
            } else {
                DocumentStatus::Finished
            };
        }
        if let Some(pos) = keyword_position(&words, PROGRESS_KEYWORDS) {
            return if negated(&words[..pos]) {
                DocumentStatus::ToStart
            } else {
                DocumentStatus::InProgress
            };
        }
        DocumentStatus::ToStart
    }

    fn tokens(&self) -> &'static [&'static str] {
        match self {
            DocumentStatus::ToStart => TO_START_TOKENS,
            DocumentStatus::InProgress => IN_PROGRESS_TOKENS,
            DocumentStatus::Finished => FINISHED_TOKENS,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::ToStart => "ToStart",
            DocumentStatus::InProgress => "InProgress",
            DocumentStatus::Finished => "Finished",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentStatus::ToStart => "To start",
            DocumentStatus::InProgress => "In progress",
            DocumentStatus::Finished => "Finished",
        }
    }
}

/// Index of the first word that starts with a keyword. Prefixed forms such
/// as "unfinished" or "incompleto" never match.
fn keyword_position(words: &[&str], keywords: &[&str]) -> Option<usize> {
    words
        .iter()
        .position(|w| keywords.iter().any(|k| w.starts_with(k)))
}

fn negated(preceding: &[&str]) -> bool {
    preceding.iter().any(|w| NEGATION_WORDS.contains(w))
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
