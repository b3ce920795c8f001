use chrono::{ DateTime, Utc };
use serde::{ Deserialize, Serialize };
use serde_json::{ Map, Value };
use std::fmt;

/// Overall judgment of a candidate rendering
///
/// Unknown strings from the judgment service are preserved verbatim in
/// `Other` so the report round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Classification {
    Pass,
    NeedsWork,
    MajorDiff,
    Error,
    Other(String),
}

impl Classification {
    pub fn as_str(&self) -> &str {
        match self {
            Classification::Pass => "PASS",
            Classification::NeedsWork => "NEEDS_WORK",
            Classification::MajorDiff => "MAJOR_DIFF",
            Classification::Error => "ERROR",
            Classification::Other(s) => s,
        }
    }

    /// Process exit status for this classification
    pub fn exit_code(&self) -> i32 {
        match self {
            Classification::Pass => 0,
            Classification::MajorDiff => 2,
            Classification::Error => 3,
            _ => 1,
        }
    }
}

impl From<String> for Classification {
    fn from(s: String) -> Self {
        match s.as_str() {
            "PASS" => Classification::Pass,
            "NEEDS_WORK" => Classification::NeedsWork,
            "MAJOR_DIFF" => Classification::MajorDiff,
            "ERROR" => Classification::Error,
            _ => Classification::Other(s),
        }
    }
}

impl From<Classification> for String {
    fn from(c: Classification) -> Self {
        c.as_str().to_string()
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rubric score: a number on the 1-5 scale, or text such as `N/A`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Score {
    Rated(serde_json::Number),
    Text(String),
}

impl Score {
    pub fn value(&self) -> Option<f64> {
        match self {
            Score::Rated(n) => n.as_f64(),
            Score::Text(_) => None,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Rated(n) => write!(f, "{}", n),
            Score::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_completeness: Option<Score>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typography: Option<Score>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Score>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Score>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_fidelity: Option<Score>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Scores {
    /// The five rubric dimensions, in rubric order
    pub fn dimensions(&self) -> [(&'static str, Option<&Score>); 5] {
        [
            ("text_completeness", self.text_completeness.as_ref()),
            ("typography", self.typography.as_ref()),
            ("layout", self.layout.as_ref()),
            ("images", self.images.as_ref()),
            ("overall_fidelity", self.overall_fidelity.as_ref()),
        ]
    }

    /// Recompute the classification from the numeric scores using the
    /// rubric's rules. Non-numeric scores are left out of the average.
    pub fn classify(&self) -> Option<Classification> {
        let values: Vec<f64> = self
            .dimensions()
            .iter()
            .filter_map(|(_, score)| score.and_then(Score::value))
            .collect();

        if values.is_empty() {
            return None;
        }

        if values.iter().any(|v| *v <= 2.0) {
            return Some(Classification::MajorDiff);
        }

        let average = values.iter().sum::<f64>() / (values.len() as f64);
        if average >= 4.0 && values.iter().all(|v| *v >= 3.0) {
            Some(Classification::Pass)
        } else {
            Some(Classification::NeedsWork)
        }
    }
}

/// A deterministic test the judgment service proposes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestedTest {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub assertion: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Invocation details attached to every report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub reference_path: String,
    pub candidate_path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    pub judged_at: DateTime<Utc>,

    /// Classification recomputed locally from the scores
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_classification: Option<Classification>,
}

/// Normalized output of one judge invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerdictReport {
    pub overall: Classification,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores: Option<Scores>,

    #[serde(default)]
    pub priority_issues: Vec<String>,

    #[serde(default)]
    pub detailed_observations: Map<String, Value>,

    #[serde(default)]
    pub suggested_tests: Vec<SuggestedTest>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_error: Option<String>,

    #[serde(rename = "_metadata", default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ReportMetadata>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VerdictReport {
    /// An `ERROR` report carrying whatever diagnostics are available
    pub fn degraded(
        raw_response: Option<String>,
        parse_error: Option<String>,
        service_error: Option<String>
    ) -> Self {
        Self {
            overall: Classification::Error,
            scores: None,
            priority_issues: Vec::new(),
            detailed_observations: Map::new(),
            suggested_tests: Vec::new(),
            raw_response,
            parse_error,
            service_error,
            metadata: None,
            extra: Map::new(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.overall.exit_code()
    }

    pub fn with_metadata(mut self, metadata: ReportMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Outcome of normalizing a judgment service response
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// The response held a report of the expected shape
    Parsed(VerdictReport),
    /// The response text could not be parsed as a report
    Unparsed { raw_text: String, error: String },
    /// The service could not be reached or returned no usable text
    Unavailable { error: String },
}

impl Verdict {
    pub fn classification(&self) -> Classification {
        match self {
            Verdict::Parsed(report) => report.overall.clone(),
            _ => Classification::Error,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.classification().exit_code()
    }

    pub fn into_report(self) -> VerdictReport {
        match self {
            Verdict::Parsed(report) => report,
            Verdict::Unparsed { raw_text, error } =>
                VerdictReport::degraded(Some(raw_text), Some(error), None),
            Verdict::Unavailable { error } => VerdictReport::degraded(None, None, Some(error)),
        }
    }
}
