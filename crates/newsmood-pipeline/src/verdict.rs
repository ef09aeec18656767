//! Parsing of model output into sentiment verdicts.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The verdict attached to an analyzed headline.
///
/// Serializes as `{"label": .., "reason": ..}` for structured verdicts and as a
/// bare string for raw ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SentimentVerdict {
    /// The model answered with a JSON object; both fields are verbatim.
    Structured { label: String, reason: String },
    /// The model answer was not a usable JSON object; kept untouched.
    Raw(String),
}

#[derive(Deserialize)]
struct VerdictPayload {
    label: String,
    reason: String,
}

impl SentimentVerdict {
    /// Parse raw model output. Never fails: anything that is not a JSON object
    /// with string `label` and `reason` fields becomes [`SentimentVerdict::Raw`].
    #[must_use]
    pub fn parse(output: &str) -> Self {
        let candidate = strip_code_fence(output);
        let payload = serde_json::from_str::<Value>(candidate)
            .ok()
            .filter(Value::is_object)
            .and_then(|value| serde_json::from_value::<VerdictPayload>(value).ok());

        match payload {
            Some(VerdictPayload { label, reason }) => Self::Structured { label, reason },
            None => Self::Raw(output.to_string()),
        }
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Structured { label, .. } => Some(label),
            Self::Raw(_) => None,
        }
    }

    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Structured { reason, .. } => Some(reason),
            Self::Raw(_) => None,
        }
    }

    /// Normalized polarity of a structured label, if recognizable.
    #[must_use]
    pub fn polarity(&self) -> Option<SentimentLabel> {
        self.label().and_then(SentimentLabel::from_label)
    }

    #[must_use]
    pub fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }
}

/// The three sentiment classes the model is asked to choose from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Map a model label onto a class, case-insensitively. Portuguese labels
    /// are accepted too.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "positive" | "positivo" => Some(Self::Positive),
            "negative" | "negativo" => Some(Self::Negative),
            "neutral" | "neutro" => Some(Self::Neutral),
            _ => None,
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "Positive"),
            SentimentLabel::Negative => write!(f, "Negative"),
            SentimentLabel::Neutral => write!(f, "Neutral"),
        }
    }
}

/// Remove a surrounding Markdown code fence (```` ```json ... ``` ````).
fn strip_code_fence(output: &str) -> &str {
    let trimmed = output.trim();
    let Some(body) = trimmed
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
    else {
        return trimmed;
    };
    // The opening fence line may carry an info string such as `json`.
    match body.split_once('\n') {
        Some((_, content)) => content.trim(),
        None => body.trim(),
    }
}
