//! Controlled vocabularies: closed, case-sensitive value sets keyed by field.
//!
//! Every vocabulary lives in [`VOCABULARIES`]; extending a field's allowed
//! values is a one-line change here.

pub const LEVEL: &[&str] = &["national", "local", "tongji", "bank"];
pub const CATEGORY: &[&str] = &[
    "award",
    "grant",
    "loan",
    "workstudy",
    "subsidy",
    "waiver",
    "compensation",
    "assessment",
    "channel",
    "other",
];
/// Canonical stage order, earliest phase first.
pub const STAGE: &[&str] = &[
    "pre_admission",
    "enrollment_day",
    "after_enrollment",
    "graduation",
];
pub const STATUS: &[&str] = &["draft", "verified", "needs_review", "expired", "archived"];
pub const EDUCATION_LEVEL: &[&str] = &["undergrad", "master", "phd", "vocational", "other"];
pub const PRIORITY: &[&str] = &["P0", "P1", "P2"];
pub const SCOPE_LEVEL: &[&str] = &["national", "province", "school", "bank"];
/// Cost kinds a benefit covers. Used for filtering; cards are not rejected
/// for other values.
pub const BENEFIT_COVERAGE: &[&str] = &["tuition", "accommodation", "living", "fees", "other"];

pub const STAGE_LABELS: &[(&str, &str)] = &[
    ("pre_admission", "入学前（在安徽办）"),
    ("enrollment_day", "报到当天（同济兜底）"),
    ("after_enrollment", "入学后（同济申请）"),
    ("graduation", "毕业与去向"),
];
pub const CATEGORY_LABELS: &[(&str, &str)] = &[
    ("award", "奖学金"),
    ("grant", "助学金"),
    ("loan", "贷款"),
    ("workstudy", "勤工助学"),
    ("subsidy", "补助"),
    ("waiver", "减免"),
    ("compensation", "补偿/代偿"),
    ("assessment", "困难认定"),
    ("channel", "绿色通道"),
    ("other", "其他"),
];

/// A vocabulary-constrained field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VocabField {
    Level,
    Category,
    Stage,
    Status,
    EducationLevel,
    Priority,
    ScopeLevel,
    BenefitCoverage,
}

pub const VOCABULARIES: &[(VocabField, &[&str])] = &[
    (VocabField::Level, LEVEL),
    (VocabField::Category, CATEGORY),
    (VocabField::Stage, STAGE),
    (VocabField::Status, STATUS),
    (VocabField::EducationLevel, EDUCATION_LEVEL),
    (VocabField::Priority, PRIORITY),
    (VocabField::ScopeLevel, SCOPE_LEVEL),
    (VocabField::BenefitCoverage, BENEFIT_COVERAGE),
];

impl VocabField {
    /// JSON key the vocabulary constrains.
    pub fn key(self) -> &'static str {
        match self {
            Self::Level => "level",
            Self::Category => "category",
            Self::Stage => "stage",
            Self::Status => "status",
            Self::EducationLevel => "education_level",
            Self::Priority => "priority",
            Self::ScopeLevel => "scope_level",
            Self::BenefitCoverage => "benefit_coverage",
        }
    }

    pub fn allowed(self) -> &'static [&'static str] {
        VOCABULARIES
            .iter()
            .find(|(field, _)| *field == self)
            .map(|(_, values)| *values)
            .unwrap_or(&[])
    }

    pub fn contains(self, value: &str) -> bool {
        self.allowed().contains(&value)
    }
}

fn lookup(labels: &[(&str, &'static str)], value: &str) -> Option<&'static str> {
    labels
        .iter()
        .find(|(key, _)| *key == value)
        .map(|(_, label)| *label)
}

/// Display label for a stage, or the value itself when unknown.
pub fn stage_label(stage: &str) -> &str {
    lookup(STAGE_LABELS, stage).unwrap_or(stage)
}

/// Display label for a category, or the value itself when unknown.
pub fn category_label(category: &str) -> &str {
    lookup(CATEGORY_LABELS, category).unwrap_or(category)
}

impl std::fmt::Display for VocabField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
