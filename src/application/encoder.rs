//! Feature encoder: raw survey answers to the canonical feature vector.

use crate::domain::{EncodingError, EncodingTable, FeatureVector, Field, RawAnswers, FEATURE_COUNT};

/// Stateless encoder over an [`EncodingTable`].
#[derive(Debug, Clone, Copy)]
pub struct FeatureEncoder {
    table: &'static EncodingTable,
}

impl Default for FeatureEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureEncoder {
    /// Encoder over the canonical table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: EncodingTable::canonical(),
        }
    }

    /// Encode one submission.
    ///
    /// Values are emitted in [`Field::ALL`] order regardless of how the
    /// answers were supplied. The first failing field (in canonical order)
    /// is reported.
    ///
    /// # Errors
    /// `SchemaMismatch` if fields are missing or unrecognized, otherwise the
    /// first `InvalidCategory`/`OutOfRange` encountered.
    pub fn encode(&self, raw: &RawAnswers) -> Result<FeatureVector, EncodingError> {
        check_schema(raw)?;

        let mut values = Vec::with_capacity(FEATURE_COUNT);
        for field in Field::ALL {
            let value = raw.get(field).ok_or_else(|| missing_field(field))?;
            values.push(self.table.resolve(field, value)?);
        }

        Ok(FeatureVector::from_vec(values))
    }

    /// Check every field and collect all errors.
    ///
    /// # Errors
    /// Returns every field error in canonical order, or only the
    /// `SchemaMismatch` when the record shape is wrong.
    pub fn validate(&self, raw: &RawAnswers) -> Result<(), Vec<EncodingError>> {
        check_schema(raw).map_err(|e| vec![e])?;

        let errors: Vec<EncodingError> = Field::ALL
            .iter()
            .filter_map(|&field| {
                let value = raw.get(field)?;
                self.table.resolve(field, value).err()
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn check_schema(raw: &RawAnswers) -> Result<(), EncodingError> {
    let missing: Vec<String> = Field::ALL
        .iter()
        .filter(|f| raw.get(**f).is_none())
        .map(|f| f.name().to_string())
        .collect();
    let unexpected: Vec<String> = raw
        .names()
        .filter(|name| Field::from_name(name).is_none())
        .map(str::to_string)
        .collect();

    if missing.is_empty() && unexpected.is_empty() {
        Ok(())
    } else {
        Err(EncodingError::SchemaMismatch {
            missing,
            unexpected,
        })
    }
}

fn missing_field(field: Field) -> EncodingError {
    EncodingError::SchemaMismatch {
        missing: vec![field.name().to_string()],
        unexpected: Vec::new(),
    }
}
