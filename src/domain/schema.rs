//! Survey schema: the 27 model features and their canonical order.
//!
//! The order here is the column order the scaler and classifier were fitted
//! with. Reordering variants silently changes every prediction.

use std::fmt;

/// Number of features the scaler and classifier consume.
pub const FEATURE_COUNT: usize = 27;

/// One named input feature of the classifier.
///
/// Discriminants are the feature's position in the model input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(usize)]
pub enum Field {
    Sex = 0,
    GeneralHealth = 1,
    PhysicalHealthDays = 2,
    MentalHealthDays = 3,
    LastCheckupTime = 4,
    PhysicalActivities = 5,
    SleepHours = 6,
    RemovedTeeth = 7,
    HadAngina = 8,
    HadStroke = 9,
    HadAsthma = 10,
    HadSkinCancer = 11,
    HadCopd = 12,
    HadDepressiveDisorder = 13,
    HadKidneyDisease = 14,
    HadArthritis = 15,
    HadDiabetes = 16,
    DeafOrHardOfHearing = 17,
    DifficultyConcentrating = 18,
    DifficultyWalking = 19,
    DifficultyDressingBathing = 20,
    SmokerStatus = 21,
    ChestScan = 22,
    RaceEthnicityCategory = 23,
    AgeCategory = 24,
    Bmi = 25,
    AlcoholDrinkers = 26,
}

impl Field {
    /// All fields in canonical model order.
    pub const ALL: [Field; FEATURE_COUNT] = [
        Self::Sex,
        Self::GeneralHealth,
        Self::PhysicalHealthDays,
        Self::MentalHealthDays,
        Self::LastCheckupTime,
        Self::PhysicalActivities,
        Self::SleepHours,
        Self::RemovedTeeth,
        Self::HadAngina,
        Self::HadStroke,
        Self::HadAsthma,
        Self::HadSkinCancer,
        Self::HadCopd,
        Self::HadDepressiveDisorder,
        Self::HadKidneyDisease,
        Self::HadArthritis,
        Self::HadDiabetes,
        Self::DeafOrHardOfHearing,
        Self::DifficultyConcentrating,
        Self::DifficultyWalking,
        Self::DifficultyDressingBathing,
        Self::SmokerStatus,
        Self::ChestScan,
        Self::RaceEthnicityCategory,
        Self::AgeCategory,
        Self::Bmi,
        Self::AlcoholDrinkers,
    ];

    /// Position of this field in the feature vector.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Column name used by the survey record and the fitted artifacts.
    #[must_use]
    pub const fn name(self) -> &'static str {
        FEATURE_NAMES[self as usize]
    }

    /// Look up a field by its exact column name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        FEATURE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|idx| Self::ALL[idx])
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Column names in canonical model order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Sex",
    "GeneralHealth",
    "PhysicalHealthDays",
    "MentalHealthDays",
    "LastCheckupTime",
    "PhysicalActivities",
    "SleepHours",
    "RemovedTeeth",
    "HadAngina",
    "HadStroke",
    "HadAsthma",
    "HadSkinCancer",
    "HadCOPD",
    "HadDepressiveDisorder",
    "HadKidneyDisease",
    "HadArthritis",
    "HadDiabetes",
    "DeafOrHardOfHearing",
    "DifficultyConcentrating",
    "DifficultyWalking",
    "DifficultyDressingBathing",
    "SmokerStatus",
    "ChestScan",
    "RaceEthnicityCategory",
    "AgeCategory",
    "BMI",
    "AlcoholDrinkers",
];
