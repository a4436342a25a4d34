use serde::{Deserialize, Serialize};
use serde_json::Value;

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct JobCreated {
    pub job_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct JobDetails {
    pub state: JobState,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct JobState {
    pub status: JobStatus,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Queued,
    InProgress,
    Completed,
    Failed,
}

/// Predictions for one source of a batch job.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SourcePredictions {
    #[serde(default)]
    pub results: Option<SourceResults>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SourceResults {
    pub predictions: Vec<Prediction>,
    #[serde(default)]
    pub errors: Vec<Value>,
}

/// The predictions for a single input text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Predictions of each model that ran on the text.
    pub models: ModelPredictions,
}

/// Predictions keyed by model.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelPredictions {
    /// Output of the language model, absent if it didn't run.
    #[serde(default)]
    pub language: Option<LanguagePredictions>,
}

/// Output of the language model.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguagePredictions {
    /// Word predictions, grouped by speaker or source segment.
    #[serde(default)]
    pub grouped_predictions: Vec<GroupedPredictions>,
}

/// A group of word-level predictions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupedPredictions {
    /// Identifier of the group, `"unknown"` for plain text.
    #[serde(default)]
    pub id: String,
    /// The words in this group.
    pub predictions: Vec<WordPrediction>,
}

/// Emotion scores for one span of text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WordPrediction {
    /// The text of the span.
    #[serde(default)]
    pub text: String,
    /// Where the span is in the input text.
    pub position: Position,
    /// Scores of every emotion for this span.
    pub emotions: Vec<EmotionEntry>,
}

impl WordPrediction {
    /// Returns the length of the span in characters, which is its weight in
    /// an aggregation.
    #[inline]
    pub fn span_len(&self) -> u64 {
        self.position.end.saturating_sub(self.position.begin)
    }
}

/// Character offsets of a span, `end` is exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Offset of the first character.
    pub begin: u64,
    /// Offset past the last character.
    pub end: u64,
}

/// One emotion score attached to a span.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmotionEntry {
    /// Name of the emotion.
    pub name: String,
    /// Score of the emotion, roughly within `0.0..=1.0`.
    pub score: f64,
}

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct BatchJobRequest<'a> {
    text: &'a [String],
    models: Models,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
struct Models {
    language: LanguageModelConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
struct LanguageModelConfig {}

#[inline]
pub fn create_request(texts: &[String]) -> BatchJobRequest<'_> {
    BatchJobRequest {
        text: texts,
        models: Models {
            language: LanguageModelConfig {},
        },
    }
}
