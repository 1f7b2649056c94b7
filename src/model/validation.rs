//! Validation engine for model artifacts.
//!
//! The engine runs all registered [`ValidationRule`]s against a
//! [`ModelSpec`] and collects every diagnostic into a [`ValidationReport`] —
//! it never short-circuits on the first error, so users see all problems at
//! once.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use movie_genre_classifier::model::validation::ValidationEngine;
//!
//! let report = ValidationEngine::with_defaults().validate(&spec);
//! if report.has_errors() {
//!     for err in report.errors() {
//!         eprintln!("{err}");
//!     }
//! }
//! ```

use std::collections::HashMap;
use std::fmt;

use rustc_hash::FxHashSet;
use serde::Serialize;

use super::spec::{ModelSpec, MODEL_VERSION};

// ─── Error codes ────────────────────────────────────────────────────────────

/// Stable machine-readable category of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    UnsupportedVersion,
    EmptyGenres,
    DuplicateGenre,
    DimensionMismatch,
    InvalidVocabulary,
    InvalidRange,
    NonFiniteWeight,
    UnknownField,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnsupportedVersion => "unsupported_version",
            Self::EmptyGenres => "empty_genres",
            Self::DuplicateGenre => "duplicate_genre",
            Self::DimensionMismatch => "dimension_mismatch",
            Self::InvalidVocabulary => "invalid_vocabulary",
            Self::InvalidRange => "invalid_range",
            Self::NonFiniteWeight => "non_finite_weight",
            Self::UnknownField => "unknown_field",
        }
    }
}

/// A problem found in a model artifact, addressed by JSON pointer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelSpecError {
    pub code: ErrorCode,
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ModelSpecError {
    pub fn new(code: ErrorCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for ModelSpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.as_str(), self.path, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " ({hint})")?;
        }
        Ok(())
    }
}

// ─── Severity ───────────────────────────────────────────────────────────────

/// Whether a diagnostic is a hard error or a soft warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

// ─── Diagnostic ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    #[serde(flatten)]
    pub error: ModelSpecError,
}

impl ValidationDiagnostic {
    pub fn error(err: ModelSpecError) -> Self {
        Self {
            severity: Severity::Error,
            error: err,
        }
    }

    pub fn warning(err: ModelSpecError) -> Self {
        Self {
            severity: Severity::Warning,
            error: err,
        }
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Collected diagnostics from running all validation rules.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    /// Iterate over error-severity diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &ModelSpecError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| &d.error)
    }

    /// Iterate over warning-severity diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &ModelSpecError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .map(|d| &d.error)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Returns `true` if there are no errors (warnings are acceptable).
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

// ─── Rule trait ─────────────────────────────────────────────────────────────

/// A single validation rule that inspects a [`ModelSpec`] and returns zero or
/// more diagnostics.
pub trait ValidationRule: Send + Sync {
    /// Short, stable identifier for this rule (e.g., `"dimensions"`).
    fn name(&self) -> &str;

    fn validate(&self, spec: &ModelSpec) -> Vec<ValidationDiagnostic>;
}

// ─── Engine ─────────────────────────────────────────────────────────────────

pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    /// Create an empty engine with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create an engine pre-loaded with the default rule set.
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Box::new(VersionRule));
        engine.add_rule(Box::new(GenresRule));
        engine.add_rule(Box::new(DimensionsRule));
        engine.add_rule(Box::new(NgramRangeRule));
        engine.add_rule(Box::new(ThresholdRule));
        engine.add_rule(Box::new(FiniteWeightsRule));
        engine.add_rule(Box::new(UnknownFieldsRule));
        engine
    }

    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run all rules against `spec` and return the collected report.
    pub fn validate(&self, spec: &ModelSpec) -> ValidationReport {
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            report.diagnostics.extend(rule.validate(spec));
        }
        report
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Concrete rules
// ═══════════════════════════════════════════════════════════════════════════

// ─── 1. Supported version ───────────────────────────────────────────────────

struct VersionRule;

impl ValidationRule for VersionRule {
    fn name(&self) -> &str {
        "version"
    }

    fn validate(&self, spec: &ModelSpec) -> Vec<ValidationDiagnostic> {
        if spec.v == MODEL_VERSION {
            return vec![];
        }
        vec![ValidationDiagnostic::error(
            ModelSpecError::new(
                ErrorCode::UnsupportedVersion,
                "/v",
                format!("unsupported model version {}", spec.v),
            )
            .with_hint(format!("Re-train the model to produce version {MODEL_VERSION}")),
        )]
    }
}

// ─── 2. Genre labels ────────────────────────────────────────────────────────

struct GenresRule;

impl ValidationRule for GenresRule {
    fn name(&self) -> &str {
        "genres"
    }

    fn validate(&self, spec: &ModelSpec) -> Vec<ValidationDiagnostic> {
        if spec.genres.is_empty() {
            return vec![ValidationDiagnostic::error(ModelSpecError::new(
                ErrorCode::EmptyGenres,
                "/genres",
                "model defines no genres",
            ))];
        }

        let mut out = Vec::new();
        let mut seen = FxHashSet::default();
        for (i, genre) in spec.genres.iter().enumerate() {
            if genre.trim().is_empty() {
                out.push(ValidationDiagnostic::error(ModelSpecError::new(
                    ErrorCode::EmptyGenres,
                    format!("/genres/{i}"),
                    "genre name is empty",
                )));
            } else if !seen.insert(genre.as_str()) {
                out.push(ValidationDiagnostic::error(ModelSpecError::new(
                    ErrorCode::DuplicateGenre,
                    format!("/genres/{i}"),
                    format!("duplicate genre \"{genre}\""),
                )));
            }
        }
        out
    }
}

// ─── 3. Vocabulary / idf / weight shapes agree ──────────────────────────────

struct DimensionsRule;

impl ValidationRule for DimensionsRule {
    fn name(&self) -> &str {
        "dimensions"
    }

    fn validate(&self, spec: &ModelSpec) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();
        let n_features = spec.vectorizer.vocabulary.len();
        let n_genres = spec.genres.len();

        if spec.vectorizer.idf.len() != n_features {
            out.push(ValidationDiagnostic::error(ModelSpecError::new(
                ErrorCode::DimensionMismatch,
                "/vectorizer/idf",
                format!(
                    "idf has {} entries but the vocabulary has {n_features} terms",
                    spec.vectorizer.idf.len()
                ),
            )));
        }

        let mut columns = vec![false; n_features];
        for (term, &col) in &spec.vectorizer.vocabulary {
            match columns.get_mut(col) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => out.push(ValidationDiagnostic::error(ModelSpecError::new(
                    ErrorCode::InvalidVocabulary,
                    format!("/vectorizer/vocabulary/{term}"),
                    format!("column {col} is assigned to more than one term"),
                ))),
                None => out.push(ValidationDiagnostic::error(ModelSpecError::new(
                    ErrorCode::InvalidVocabulary,
                    format!("/vectorizer/vocabulary/{term}"),
                    format!("column {col} is out of range for {n_features} terms"),
                ))),
            }
        }

        if spec.classifier.coef.len() != n_genres {
            out.push(ValidationDiagnostic::error(
                ModelSpecError::new(
                    ErrorCode::DimensionMismatch,
                    "/classifier/coef",
                    format!(
                        "coef has {} rows but there are {n_genres} genres",
                        spec.classifier.coef.len()
                    ),
                )
                .with_hint("Each genre needs exactly one weight row"),
            ));
        }
        for (i, row) in spec.classifier.coef.iter().enumerate() {
            if row.len() != n_features {
                out.push(ValidationDiagnostic::error(ModelSpecError::new(
                    ErrorCode::DimensionMismatch,
                    format!("/classifier/coef/{i}"),
                    format!(
                        "row has {} weights but the vocabulary has {n_features} terms",
                        row.len()
                    ),
                )));
            }
        }

        if spec.classifier.intercept.len() != n_genres {
            out.push(ValidationDiagnostic::error(ModelSpecError::new(
                ErrorCode::DimensionMismatch,
                "/classifier/intercept",
                format!(
                    "intercept has {} entries but there are {n_genres} genres",
                    spec.classifier.intercept.len()
                ),
            )));
        }

        out
    }
}

// ─── 4. n-gram range ────────────────────────────────────────────────────────

struct NgramRangeRule;

impl ValidationRule for NgramRangeRule {
    fn name(&self) -> &str {
        "ngram_range"
    }

    fn validate(&self, spec: &ModelSpec) -> Vec<ValidationDiagnostic> {
        let (min, max) = spec.vectorizer.ngram_range;
        if min >= 1 && min <= max {
            return vec![];
        }
        vec![ValidationDiagnostic::error(
            ModelSpecError::new(
                ErrorCode::InvalidRange,
                "/vectorizer/ngram_range",
                format!("invalid n-gram range ({min}, {max})"),
            )
            .with_hint("Use 1 <= min <= max, e.g. [1, 1] or [1, 2]"),
        )]
    }
}

// ─── 5. Threshold is a probability ──────────────────────────────────────────

struct ThresholdRule;

impl ValidationRule for ThresholdRule {
    fn name(&self) -> &str {
        "threshold"
    }

    fn validate(&self, spec: &ModelSpec) -> Vec<ValidationDiagnostic> {
        match spec.threshold {
            Some(t) if !(0.0..=1.0).contains(&t) => {
                vec![ValidationDiagnostic::error(
                    ModelSpecError::new(
                        ErrorCode::InvalidRange,
                        "/threshold",
                        format!("threshold {t} is not a probability"),
                    )
                    .with_hint("Use a value between 0 and 1, or remove it"),
                )]
            }
            _ => vec![],
        }
    }
}

// ─── 6. All numbers finite ──────────────────────────────────────────────────

struct FiniteWeightsRule;

impl FiniteWeightsRule {
    fn check(path: String, values: &[f64]) -> Option<ValidationDiagnostic> {
        let bad = values.iter().position(|v| !v.is_finite())?;
        Some(ValidationDiagnostic::error(ModelSpecError::new(
            ErrorCode::NonFiniteWeight,
            format!("{path}/{bad}"),
            "value is NaN or infinite",
        )))
    }
}

impl ValidationRule for FiniteWeightsRule {
    fn name(&self) -> &str {
        "finite"
    }

    fn validate(&self, spec: &ModelSpec) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();
        out.extend(Self::check(
            "/vectorizer/idf".to_string(),
            &spec.vectorizer.idf,
        ));
        for (i, row) in spec.classifier.coef.iter().enumerate() {
            out.extend(Self::check(format!("/classifier/coef/{i}"), row));
        }
        out.extend(Self::check(
            "/classifier/intercept".to_string(),
            &spec.classifier.intercept,
        ));
        out
    }
}

// ─── 7. Unknown fields (strict → error, non-strict → warning) ──────────────

struct UnknownFieldsRule;

impl UnknownFieldsRule {
    fn check_unknowns(
        path: &str,
        unknowns: &HashMap<String, serde_json::Value>,
        strict: bool,
    ) -> Vec<ValidationDiagnostic> {
        let mut keys: Vec<_> = unknowns.keys().collect();
        keys.sort();
        keys.into_iter()
            .map(|key| {
                let diag_fn = if strict {
                    ValidationDiagnostic::error
                } else {
                    ValidationDiagnostic::warning
                };
                diag_fn(
                    ModelSpecError::new(
                        ErrorCode::UnknownField,
                        format!("{path}/{key}"),
                        format!("unrecognized field \"{key}\""),
                    )
                    .with_hint("Check spelling or remove this field"),
                )
            })
            .collect()
    }
}

impl ValidationRule for UnknownFieldsRule {
    fn name(&self) -> &str {
        "unknown_fields"
    }

    fn validate(&self, spec: &ModelSpec) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();
        out.extend(Self::check_unknowns("", &spec.unknown_fields, spec.strict));
        out.extend(Self::check_unknowns(
            "/vectorizer",
            &spec.vectorizer.unknown_fields,
            spec.strict,
        ));
        out.extend(Self::check_unknowns(
            "/classifier",
            &spec.classifier.unknown_fields,
            spec.strict,
        ));
        out
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════
