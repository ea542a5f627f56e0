//! Encoding table: label vocabularies and numeric ranges for every feature.
//!
//! This is the single source of truth for how a survey answer becomes a
//! number. Both the encoder and any UI-facing validation read from
//! [`EncodingTable::canonical`]; no other module carries label→code mappings.

use serde::Serialize;

use super::answers::AnswerValue;
use super::schema::{Field, FEATURE_COUNT};

/// Version of the code assignments below.
///
/// Bump whenever any label, code or range changes, since previously fitted
/// artifacts are then no longer valid for this table.
pub const ENCODING_TABLE_VERSION: u32 = 1;

/// Ordered `(label, code)` pairs for one categorical field.
pub type Vocabulary = &'static [(&'static str, u8)];

pub const YES_NO: Vocabulary = &[("No", 0), ("Yes", 1)];

pub const SEX: Vocabulary = &[("Female", 0), ("Male", 1)];

/// 0 = worst, 4 = best.
pub const GENERAL_HEALTH: Vocabulary = &[
    ("Poor", 0),
    ("Fair", 1),
    ("Good", 2),
    ("Very good", 3),
    ("Excellent", 4),
];

pub const LAST_CHECKUP: Vocabulary = &[
    ("Within past year (anytime less than 12 months ago)", 0),
    ("Within past 2 years (1 year but less than 2 years ago)", 1),
    ("Within past 5 years (2 years but less than 5 years ago)", 2),
    ("5 or more years ago", 3),
];

pub const REMOVED_TEETH: Vocabulary = &[
    ("None of them", 0),
    ("1 to 5", 1),
    ("6 or more, but not all", 2),
    ("All", 3),
];

pub const DIABETES: Vocabulary = &[
    ("No", 0),
    ("Yes (other than pregnancy)", 1),
    ("Yes, but only during pregnancy (female)", 2),
    ("No, pre-diabetes or borderline diabetes", 3),
];

pub const SMOKER_STATUS: Vocabulary = &[
    ("Never smoked", 0),
    ("Former smoker", 1),
    ("Current smoker - now smokes some days", 2),
    ("Current smoker - now smokes every day", 3),
];

pub const RACE_ETHNICITY: Vocabulary = &[
    ("White only, Non-Hispanic", 0),
    ("Black only, Non-Hispanic", 1),
    ("Other race only, Non-Hispanic", 2),
    ("Multiracial, Non-Hispanic", 3),
    ("Hispanic", 4),
];

pub const AGE_CATEGORY: Vocabulary = &[
    ("Age 18 to 24", 0),
    ("Age 25 to 29", 1),
    ("Age 30 to 34", 2),
    ("Age 35 to 39", 3),
    ("Age 40 to 44", 4),
    ("Age 45 to 49", 5),
    ("Age 50 to 54", 6),
    ("Age 55 to 59", 7),
    ("Age 60 to 64", 8),
    ("Age 65 to 69", 9),
    ("Age 70 to 74", 10),
    ("Age 75 to 79", 11),
    ("Age 80 or older", 12),
];

/// Inclusive bounds for a numeric answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// NaN is never contained.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

pub const DAY_COUNT: NumericRange = NumericRange::new(0.0, 30.0);
pub const SLEEP_HOURS: NumericRange = NumericRange::new(0.0, 24.0);
pub const BMI: NumericRange = NumericRange::new(10.0, 50.0);

/// How a field's raw answer is resolved to a number.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// `No` → 0, `Yes` → 1.
    YesNo,
    /// Label lookup. When `accepts_code` is set, an integral code from the
    /// vocabulary (as a number or numeric text such as `"2"`) is accepted in
    /// place of its label.
    Categorical {
        labels: Vocabulary,
        accepts_code: bool,
    },
    /// Passed through unchanged after an inclusive range check.
    Numeric(NumericRange),
}

impl FieldKind {
    /// Label vocabulary, if this kind has one.
    #[must_use]
    pub fn labels(&self) -> Option<Vocabulary> {
        match *self {
            Self::YesNo => Some(YES_NO),
            Self::Categorical { labels, .. } => Some(labels),
            Self::Numeric(_) => None,
        }
    }
}

/// Errors raised while turning raw answers into a feature vector.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EncodingError {
    #[error("Unrecognized value {value:?} for {field}")]
    InvalidCategory { field: Field, value: String },

    #[error("{field} value {value} outside allowed range [{min}, {max}]")]
    OutOfRange {
        field: Field,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Answers do not match the feature schema (missing: {missing:?}, unexpected: {unexpected:?})")]
    SchemaMismatch {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },
}

impl EncodingError {
    /// The single field this error is about, if any.
    #[must_use]
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::InvalidCategory { field, .. } | Self::OutOfRange { field, .. } => Some(*field),
            Self::SchemaMismatch { .. } => None,
        }
    }
}

/// Process-wide, read-only encoding rules for all features.
#[derive(Debug)]
pub struct EncodingTable {
    version: u32,
    kinds: [FieldKind; FEATURE_COUNT],
}

static CANONICAL: EncodingTable = EncodingTable {
    version: ENCODING_TABLE_VERSION,
    // Indexed by `Field::index()`.
    kinds: [
        FieldKind::Categorical {
            labels: SEX,
            accepts_code: false,
        },
        FieldKind::Categorical {
            labels: GENERAL_HEALTH,
            accepts_code: true,
        },
        FieldKind::Numeric(DAY_COUNT),
        FieldKind::Numeric(DAY_COUNT),
        FieldKind::Categorical {
            labels: LAST_CHECKUP,
            accepts_code: false,
        },
        FieldKind::YesNo,
        FieldKind::Numeric(SLEEP_HOURS),
        FieldKind::Categorical {
            labels: REMOVED_TEETH,
            accepts_code: false,
        },
        FieldKind::YesNo, // HadAngina
        FieldKind::YesNo, // HadStroke
        FieldKind::YesNo, // HadAsthma
        FieldKind::YesNo, // HadSkinCancer
        FieldKind::YesNo, // HadCOPD
        FieldKind::YesNo, // HadDepressiveDisorder
        FieldKind::YesNo, // HadKidneyDisease
        FieldKind::YesNo, // HadArthritis
        FieldKind::Categorical {
            labels: DIABETES,
            accepts_code: false,
        },
        FieldKind::YesNo, // DeafOrHardOfHearing
        FieldKind::YesNo, // DifficultyConcentrating
        FieldKind::YesNo, // DifficultyWalking
        FieldKind::YesNo, // DifficultyDressingBathing
        FieldKind::Categorical {
            labels: SMOKER_STATUS,
            accepts_code: false,
        },
        FieldKind::YesNo, // ChestScan
        FieldKind::Categorical {
            labels: RACE_ETHNICITY,
            accepts_code: false,
        },
        FieldKind::Categorical {
            labels: AGE_CATEGORY,
            accepts_code: false,
        },
        FieldKind::Numeric(BMI),
        FieldKind::YesNo, // AlcoholDrinkers
    ],
};

impl EncodingTable {
    /// The table the shipped artifacts were fitted against.
    #[must_use]
    pub fn canonical() -> &'static Self {
        &CANONICAL
    }

    #[must_use]
    pub fn kind(&self, field: Field) -> FieldKind {
        self.kinds[field.index()]
    }

    /// Code assigned to `label`, or `None` if the label is not in the field's
    /// vocabulary (or the field is numeric).
    #[must_use]
    pub fn code_for(&self, field: Field, label: &str) -> Option<u8> {
        self.kind(field)
            .labels()?
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, code)| *code)
    }

    /// Label assigned to `code`.
    #[must_use]
    pub fn label_for(&self, field: Field, code: u8) -> Option<&'static str> {
        self.kind(field)
            .labels()?
            .iter()
            .find(|(_, c)| *c == code)
            .map(|(label, _)| *label)
    }

    /// Resolve one raw answer to its numeric feature value.
    ///
    /// # Errors
    /// `InvalidCategory` for labels outside the vocabulary (or a label where a
    /// number is required), `OutOfRange` for numbers outside the field bounds.
    pub fn resolve(&self, field: Field, value: &AnswerValue) -> Result<f64, EncodingError> {
        match self.kind(field) {
            FieldKind::YesNo => Self::lookup(field, YES_NO, value),
            FieldKind::Categorical {
                labels,
                accepts_code: true,
            } => match value {
                AnswerValue::Number(code) => Self::resolve_code(field, labels, *code),
                AnswerValue::Label(text) => match text.trim().parse::<f64>() {
                    Ok(code) => Self::resolve_code(field, labels, code),
                    Err(_) => Self::lookup(field, labels, value),
                },
            },
            FieldKind::Categorical { labels, .. } => Self::lookup(field, labels, value),
            FieldKind::Numeric(range) => {
                let number = match value {
                    AnswerValue::Number(n) => *n,
                    AnswerValue::Label(text) => {
                        text.trim()
                            .parse::<f64>()
                            .map_err(|_| EncodingError::InvalidCategory {
                                field,
                                value: text.clone(),
                            })?
                    }
                };
                if range.contains(number) {
                    Ok(number)
                } else {
                    Err(EncodingError::OutOfRange {
                        field,
                        value: number,
                        min: range.min,
                        max: range.max,
                    })
                }
            }
        }
    }

    fn lookup(field: Field, labels: Vocabulary, value: &AnswerValue) -> Result<f64, EncodingError> {
        match value {
            AnswerValue::Label(label) => labels
                .iter()
                .find(|(l, _)| *l == label.as_str())
                .map(|(_, code)| f64::from(*code))
                .ok_or_else(|| EncodingError::InvalidCategory {
                    field,
                    value: label.clone(),
                }),
            AnswerValue::Number(n) => Err(EncodingError::InvalidCategory {
                field,
                value: n.to_string(),
            }),
        }
    }

    fn resolve_code(field: Field, labels: Vocabulary, code: f64) -> Result<f64, EncodingError> {
        let max = labels.iter().map(|(_, c)| *c).max().unwrap_or(0);
        let range = NumericRange::new(0.0, f64::from(max));
        if !range.contains(code) {
            return Err(EncodingError::OutOfRange {
                field,
                value: code,
                min: range.min,
                max: range.max,
            });
        }
        // Return the table's own code so that e.g. -0.0 comes back as 0.0.
        labels
            .iter()
            .find(|(_, c)| f64::from(*c) == code)
            .map(|(_, c)| f64::from(*c))
            .ok_or_else(|| EncodingError::InvalidCategory {
                field,
                value: code.to_string(),
            })
    }

    /// Serializable description of every field, in canonical order.
    ///
    /// Presentation layers build their widgets from this so they never carry
    /// a second copy of the vocabularies.
    #[must_use]
    pub fn describe(&self) -> TableDescription {
        let fields = Field::ALL
            .iter()
            .map(|&field| {
                let kind = match self.kind(field) {
                    FieldKind::YesNo => KindDescriptor::YesNo {
                        labels: label_codes(YES_NO),
                    },
                    FieldKind::Categorical {
                        labels,
                        accepts_code,
                    } => KindDescriptor::Categorical {
                        labels: label_codes(labels),
                        accepts_code,
                    },
                    FieldKind::Numeric(range) => KindDescriptor::Numeric {
                        min: range.min,
                        max: range.max,
                    },
                };
                FieldDescriptor {
                    name: field.name(),
                    index: field.index(),
                    kind,
                }
            })
            .collect();

        TableDescription {
            version: self.version,
            fields,
        }
    }
}

fn label_codes(labels: Vocabulary) -> Vec<LabelCode> {
    labels
        .iter()
        .map(|&(label, code)| LabelCode { label, code })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct TableDescription {
    pub version: u32,
    pub fields: Vec<FieldDescriptor>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub index: usize,
    #[serde(flatten)]
    pub kind: KindDescriptor,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KindDescriptor {
    YesNo {
        labels: Vec<LabelCode>,
    },
    Categorical {
        labels: Vec<LabelCode>,
        accepts_code: bool,
    },
    Numeric {
        min: f64,
        max: f64,
    },
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct LabelCode {
    pub label: &'static str,
    pub code: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    const YES_NO_FIELDS: [Field; 15] = [
        Field::PhysicalActivities,
        Field::HadAngina,
        Field::HadStroke,
        Field::HadAsthma,
        Field::HadSkinCancer,
        Field::HadCopd,
        Field::HadDepressiveDisorder,
        Field::HadKidneyDisease,
        Field::HadArthritis,
        Field::DeafOrHardOfHearing,
        Field::DifficultyConcentrating,
        Field::DifficultyWalking,
        Field::DifficultyDressingBathing,
        Field::ChestScan,
        Field::AlcoholDrinkers,
    ];

    fn label(s: &str) -> AnswerValue {
        AnswerValue::Label(s.to_string())
    }

    /// Expected codes written out independently of the table constants.
    fn documented_codes() -> Vec<(Field, Vec<(&'static str, u8)>)> {
        let mut out: Vec<(Field, Vec<(&'static str, u8)>)> = YES_NO_FIELDS
            .iter()
            .map(|&f| (f, vec![("No", 0), ("Yes", 1)]))
            .collect();
        out.push((Field::Sex, vec![("Female", 0), ("Male", 1)]));
        out.push((
            Field::GeneralHealth,
            vec![
                ("Poor", 0),
                ("Fair", 1),
                ("Good", 2),
                ("Very good", 3),
                ("Excellent", 4),
            ],
        ));
        out.push((
            Field::LastCheckupTime,
            vec![
                ("Within past year (anytime less than 12 months ago)", 0),
                ("Within past 2 years (1 year but less than 2 years ago)", 1),
                ("Within past 5 years (2 years but less than 5 years ago)", 2),
                ("5 or more years ago", 3),
            ],
        ));
        out.push((
            Field::RemovedTeeth,
            vec![
                ("None of them", 0),
                ("1 to 5", 1),
                ("6 or more, but not all", 2),
                ("All", 3),
            ],
        ));
        out.push((
            Field::HadDiabetes,
            vec![
                ("No", 0),
                ("Yes (other than pregnancy)", 1),
                ("Yes, but only during pregnancy (female)", 2),
                ("No, pre-diabetes or borderline diabetes", 3),
            ],
        ));
        out.push((
            Field::SmokerStatus,
            vec![
                ("Never smoked", 0),
                ("Former smoker", 1),
                ("Current smoker - now smokes some days", 2),
                ("Current smoker - now smokes every day", 3),
            ],
        ));
        out.push((
            Field::RaceEthnicityCategory,
            vec![
                ("White only, Non-Hispanic", 0),
                ("Black only, Non-Hispanic", 1),
                ("Other race only, Non-Hispanic", 2),
                ("Multiracial, Non-Hispanic", 3),
                ("Hispanic", 4),
            ],
        ));
        out.push((
            Field::AgeCategory,
            vec![
                ("Age 18 to 24", 0),
                ("Age 25 to 29", 1),
                ("Age 30 to 34", 2),
                ("Age 35 to 39", 3),
                ("Age 40 to 44", 4),
                ("Age 45 to 49", 5),
                ("Age 50 to 54", 6),
                ("Age 55 to 59", 7),
                ("Age 60 to 64", 8),
                ("Age 65 to 69", 9),
                ("Age 70 to 74", 10),
                ("Age 75 to 79", 11),
                ("Age 80 or older", 12),
            ],
        ));
        out
    }

    #[test]
    fn test_every_label_resolves_to_documented_code() {
        let table = EncodingTable::canonical();
        let documented = documented_codes();

        for (field, pairs) in &documented {
            let vocab = table.kind(*field).labels().expect("categorical field");
            assert_eq!(vocab.len(), pairs.len(), "{field} vocabulary size");
            for (text, code) in pairs {
                let got = table.resolve(*field, &label(text)).expect("known label");
                assert_eq!(got, f64::from(*code), "{field} / {text}");
                assert_eq!(table.code_for(*field, text), Some(*code));
                assert_eq!(table.label_for(*field, *code), Some(*text));
            }
        }

        // 23 categorical fields plus 4 numeric ones cover the schema.
        assert_eq!(documented.len(), 23);
        let numeric = Field::ALL
            .iter()
            .filter(|f| matches!(table.kind(**f), FieldKind::Numeric(_)))
            .count();
        assert_eq!(numeric, 4);
    }

    #[test]
    fn test_yes_no_rejects_other_spellings() {
        let table = EncodingTable::canonical();
        for field in YES_NO_FIELDS {
            for bad in ["yes", "NO", "Y", "", " Yes", "Maybe"] {
                let err = table.resolve(field, &label(bad)).unwrap_err();
                assert_eq!(
                    err,
                    EncodingError::InvalidCategory {
                        field,
                        value: bad.to_string()
                    }
                );
            }
        }
    }

    #[test]
    fn test_categorical_rejects_numbers_unless_coded() {
        let table = EncodingTable::canonical();
        let err = table
            .resolve(Field::SmokerStatus, &AnswerValue::Number(1.0))
            .unwrap_err();
        assert!(matches!(
            err,
            EncodingError::InvalidCategory {
                field: Field::SmokerStatus,
                ..
            }
        ));
    }

    #[test]
    fn test_general_health_codes() {
        let table = EncodingTable::canonical();
        for code in 0..=4u8 {
            let got = table
                .resolve(Field::GeneralHealth, &AnswerValue::Number(f64::from(code)))
                .expect("valid code");
            assert_eq!(got, f64::from(code));
        }

        let err = table
            .resolve(Field::GeneralHealth, &AnswerValue::Number(5.0))
            .unwrap_err();
        assert!(matches!(err, EncodingError::OutOfRange { max, .. } if max == 4.0));

        let err = table
            .resolve(Field::GeneralHealth, &AnswerValue::Number(2.5))
            .unwrap_err();
        assert!(matches!(err, EncodingError::InvalidCategory { .. }));

        let err = table
            .resolve(Field::GeneralHealth, &AnswerValue::Number(f64::NAN))
            .unwrap_err();
        assert!(matches!(err, EncodingError::OutOfRange { .. }));

        let zero = table
            .resolve(Field::GeneralHealth, &AnswerValue::Number(-0.0))
            .expect("negative zero is code 0");
        assert_eq!(zero.to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn test_general_health_numeric_text() {
        let table = EncodingTable::canonical();
        assert_eq!(table.resolve(Field::GeneralHealth, &label("2")).unwrap(), 2.0);
        assert_eq!(table.resolve(Field::GeneralHealth, &label(" 4 ")).unwrap(), 4.0);
        assert_eq!(
            table.resolve(Field::GeneralHealth, &label("Very good")).unwrap(),
            3.0
        );

        let err = table.resolve(Field::GeneralHealth, &label("7")).unwrap_err();
        assert!(matches!(err, EncodingError::OutOfRange { max, .. } if max == 4.0));

        let err = table.resolve(Field::GeneralHealth, &label("2.5")).unwrap_err();
        assert!(matches!(err, EncodingError::InvalidCategory { .. }));
    }

    #[test]
    fn test_numeric_ranges() {
        let table = EncodingTable::canonical();
        let accepts = |field, v: f64| table.resolve(field, &AnswerValue::Number(v)).is_ok();

        assert!(accepts(Field::Bmi, 10.0));
        assert!(accepts(Field::Bmi, 50.0));
        assert!(!accepts(Field::Bmi, 9.99));
        assert!(!accepts(Field::Bmi, 50.01));

        for field in [Field::PhysicalHealthDays, Field::MentalHealthDays] {
            assert!(accepts(field, 0.0));
            assert!(accepts(field, 30.0));
            assert!(!accepts(field, 31.0));
            assert!(!accepts(field, -1.0));
        }

        assert!(accepts(Field::SleepHours, 0.0));
        assert!(accepts(Field::SleepHours, 24.0));
        assert!(!accepts(Field::SleepHours, 25.0));

        assert!(!accepts(Field::Bmi, f64::NAN));
        assert!(!accepts(Field::Bmi, f64::INFINITY));
    }

    #[test]
    fn test_out_of_range_reports_bounds() {
        let err = EncodingTable::canonical()
            .resolve(Field::SleepHours, &AnswerValue::Number(25.0))
            .unwrap_err();
        assert_eq!(
            err,
            EncodingError::OutOfRange {
                field: Field::SleepHours,
                value: 25.0,
                min: 0.0,
                max: 24.0
            }
        );
        assert_eq!(err.field(), Some(Field::SleepHours));
    }

    #[test]
    fn test_numeric_text_input() {
        let table = EncodingTable::canonical();
        assert_eq!(table.resolve(Field::SleepHours, &label("7")).unwrap(), 7.0);
        assert_eq!(table.resolve(Field::Bmi, &label(" 22.5 ")).unwrap(), 22.5);

        let err = table.resolve(Field::SleepHours, &label("seven")).unwrap_err();
        assert!(matches!(
            err,
            EncodingError::InvalidCategory {
                field: Field::SleepHours,
                ..
            }
        ));
    }

    #[test]
    fn test_describe_covers_all_fields() {
        let description = EncodingTable::canonical().describe();
        assert_eq!(description.version, ENCODING_TABLE_VERSION);
        assert_eq!(description.fields.len(), FEATURE_COUNT);
        for (idx, field) in description.fields.iter().enumerate() {
            assert_eq!(field.index, idx);
            assert_eq!(field.name, Field::ALL[idx].name());
        }

        let json = serde_json::to_value(&description).expect("serialize");
        assert_eq!(json["fields"][25]["name"], "BMI");
        assert_eq!(json["fields"][25]["kind"], "numeric");
        assert_eq!(json["fields"][25]["max"], 50.0);
        assert_eq!(json["fields"][1]["kind"], "categorical");
        assert_eq!(json["fields"][1]["accepts_code"], true);
        assert_eq!(json["fields"][8]["kind"], "yes_no");
        assert_eq!(json["fields"][8]["labels"][1]["label"], "Yes");
    }
}
