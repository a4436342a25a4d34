use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::proto::Prediction;
use crate::{Error, ErrorKind};

/// The score of one emotion for a whole text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmotionScore {
    /// Name of the emotion.
    pub name: String,
    /// Length-weighted average score across the words of the text.
    pub score: f64,
}

/// Emotions detected in one text, strongest first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TextEmotions {
    /// Scores sorted by score in descending order.
    pub emotions: Vec<EmotionScore>,
}

impl TextEmotions {
    /// Returns the `n` strongest emotions.
    #[inline]
    pub fn top(&self, n: usize) -> &[EmotionScore] {
        &self.emotions[..n.min(self.emotions.len())]
    }

    /// Returns `true` if no emotion was detected.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.emotions.is_empty()
    }
}

/// Reduces word-level predictions to one score per emotion.
///
/// Every word is weighted by the length of its span, and each emotion's
/// score is the weighted average over all words of the first prediction
/// group. The result is sorted by score in descending order, emotions with
/// equal scores keep the order they were first seen in.
///
/// Returns an error of kind [`ErrorKind::DegenerateInput`] if the words have
/// no total length, since the average is undefined then.
pub fn aggregate(prediction: &Prediction) -> Result<TextEmotions, Error> {
    let words = prediction
        .models
        .language
        .as_ref()
        .and_then(|language| language.grouped_predictions.first())
        .map(|group| group.predictions.as_slice())
        .unwrap_or_default();

    let mut sums: Vec<(&str, f64)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut total_weight = 0u64;

    for word in words {
        let weight = word.span_len();
        total_weight += weight;
        for emotion in &word.emotions {
            let idx = *index.entry(emotion.name.as_str()).or_insert_with(|| {
                sums.push((emotion.name.as_str(), 0.0));
                sums.len() - 1
            });
            sums[idx].1 += emotion.score * weight as f64;
        }
    }

    if total_weight == 0 {
        return Err(Error::new(
            format!("{} words with a total length of zero", words.len()),
            ErrorKind::DegenerateInput,
        ));
    }

    let total_weight = total_weight as f64;
    let mut emotions: Vec<_> = sums
        .into_iter()
        .map(|(name, sum)| EmotionScore {
            name: name.to_owned(),
            score: sum / total_weight,
        })
        .collect();
    emotions.sort_by(|a, b| b.score.total_cmp(&a.score));

    Ok(TextEmotions { emotions })
}
