//! Raw survey answers as captured by the presentation layer.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::schema::Field;

/// One raw answer: a label chosen from a vocabulary, or a number.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(f64),
    Label(String),
}

impl From<&str> for AnswerValue {
    fn from(label: &str) -> Self {
        Self::Label(label.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(label: String) -> Self {
        Self::Label(label)
    }
}

impl From<f64> for AnswerValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<u32> for AnswerValue {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

// Answers are health data; keep them out of debug output.
impl fmt::Debug for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(_) => f.write_str("Number(..)"),
            Self::Label(_) => f.write_str("Label(..)"),
        }
    }
}

/// One submission's answers keyed by column name.
///
/// Keys are kept as free-form strings so that misspelled or extra columns
/// survive until the encoder can report them.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawAnswers {
    values: BTreeMap<String, AnswerValue>,
}

impl RawAnswers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert keyed by a schema field.
    #[must_use]
    pub fn with(mut self, field: Field, value: impl Into<AnswerValue>) -> Self {
        self.values.insert(field.name().to_string(), value.into());
        self
    }

    /// Insert under an arbitrary column name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AnswerValue>) {
        self.values.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&AnswerValue> {
        self.values.get(field.name())
    }

    pub fn remove(&mut self, name: &str) -> Option<AnswerValue> {
        self.values.remove(name)
    }

    /// Column names present, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawAnswers
where
    K: Into<String>,
    V: Into<AnswerValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl fmt::Debug for RawAnswers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawAnswers")
            .field("fields", &self.values.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_mixed_values() {
        let json = r#"{"Sex": "Female", "GeneralHealth": 2, "BMI": 22.0}"#;
        let answers: RawAnswers = serde_json::from_str(json).expect("Should parse");

        assert_eq!(answers.len(), 3);
        assert_eq!(answers.get(Field::Sex), Some(&AnswerValue::from("Female")));
        assert_eq!(
            answers.get(Field::GeneralHealth),
            Some(&AnswerValue::Number(2.0))
        );
        assert_eq!(answers.get(Field::Bmi), Some(&AnswerValue::Number(22.0)));
    }

    #[test]
    fn test_debug_hides_values() {
        let answers = RawAnswers::new()
            .with(Field::HadDiabetes, "Yes (other than pregnancy)")
            .with(Field::Bmi, 41.5);
        let rendered = format!("{answers:?}");

        assert!(rendered.contains("HadDiabetes"));
        assert!(!rendered.contains("pregnancy"));
        assert!(!rendered.contains("41.5"));
    }

    #[test]
    fn test_keeps_unknown_columns() {
        let mut answers = RawAnswers::new();
        answers.insert("DifficultyConcentratingt", "No");
        assert_eq!(answers.names().collect::<Vec<_>>(), ["DifficultyConcentratingt"]);
        assert!(answers.get(Field::DifficultyConcentrating).is_none());
    }
}
