//! Prediction response types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Binary model output.
///
/// Travels as `0` (not churn) or `1` (churn); any other value fails
/// deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ChurnLabel {
    NotChurn,
    Churn,
}

impl ChurnLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChurnLabel::NotChurn => "Not Churn",
            ChurnLabel::Churn => "Churn",
        }
    }
}

impl fmt::Display for ChurnLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for ChurnLabel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ChurnLabel::NotChurn),
            1 => Ok(ChurnLabel::Churn),
            other => Err(format!("prediction must be 0 or 1, got {other}")),
        }
    }
}

impl From<ChurnLabel> for u8 {
    fn from(label: ChurnLabel) -> Self {
        match label {
            ChurnLabel::NotChurn => 0,
            ChurnLabel::Churn => 1,
        }
    }
}

/// Feature identifier reported in a SHAP explanation.
///
/// The service emits a fixed set of keys: the numeric inputs plus the
/// one-hot encoded categories. Keys outside that set are preserved
/// verbatim in [`FeatureKey::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FeatureKey {
    CreditScore,
    Age,
    Tenure,
    Balance,
    NumOfProducts,
    HasCrCard,
    IsActiveMember,
    EstimatedSalary,
    GeographyFrance,
    GeographyGermany,
    GeographySpain,
    GenderFemale,
    GenderMale,
    Other(String),
}

impl FeatureKey {
    /// Wire key, e.g. `"Geography_Germany"`.
    pub fn key(&self) -> &str {
        match self {
            FeatureKey::CreditScore => "CreditScore",
            FeatureKey::Age => "Age",
            FeatureKey::Tenure => "Tenure",
            FeatureKey::Balance => "Balance",
            FeatureKey::NumOfProducts => "NumOfProducts",
            FeatureKey::HasCrCard => "HasCrCard",
            FeatureKey::IsActiveMember => "IsActiveMember",
            FeatureKey::EstimatedSalary => "EstimatedSalary",
            FeatureKey::GeographyFrance => "Geography_France",
            FeatureKey::GeographyGermany => "Geography_Germany",
            FeatureKey::GeographySpain => "Geography_Spain",
            FeatureKey::GenderFemale => "Gender_Female",
            FeatureKey::GenderMale => "Gender_Male",
            FeatureKey::Other(key) => key,
        }
    }

    /// Business-friendly label; unknown keys display as-is.
    pub fn label(&self) -> &str {
        match self {
            FeatureKey::CreditScore => "Credit Score",
            FeatureKey::Age => "Age",
            FeatureKey::Tenure => "Tenure",
            FeatureKey::Balance => "Account Balance",
            FeatureKey::NumOfProducts => "Number of Products",
            FeatureKey::HasCrCard => "Has Credit Card",
            FeatureKey::IsActiveMember => "Active Membership",
            FeatureKey::EstimatedSalary => "Estimated Salary",
            FeatureKey::GeographyFrance => "Geography: France",
            FeatureKey::GeographyGermany => "Geography: Germany",
            FeatureKey::GeographySpain => "Geography: Spain",
            FeatureKey::GenderFemale => "Gender: Female",
            FeatureKey::GenderMale => "Gender: Male",
            FeatureKey::Other(key) => key,
        }
    }
}

impl From<String> for FeatureKey {
    fn from(key: String) -> Self {
        match key.as_str() {
            "CreditScore" => FeatureKey::CreditScore,
            "Age" => FeatureKey::Age,
            "Tenure" => FeatureKey::Tenure,
            "Balance" => FeatureKey::Balance,
            "NumOfProducts" => FeatureKey::NumOfProducts,
            "HasCrCard" => FeatureKey::HasCrCard,
            "IsActiveMember" => FeatureKey::IsActiveMember,
            "EstimatedSalary" => FeatureKey::EstimatedSalary,
            "Geography_France" => FeatureKey::GeographyFrance,
            "Geography_Germany" => FeatureKey::GeographyGermany,
            "Geography_Spain" => FeatureKey::GeographySpain,
            "Gender_Female" => FeatureKey::GenderFemale,
            "Gender_Male" => FeatureKey::GenderMale,
            _ => FeatureKey::Other(key),
        }
    }
}

impl From<&str> for FeatureKey {
    fn from(key: &str) -> Self {
        FeatureKey::from(key.to_string())
    }
}

impl From<FeatureKey> for String {
    fn from(key: FeatureKey) -> Self {
        match key {
            FeatureKey::Other(key) => key,
            known => known.key().to_string(),
        }
    }
}

impl fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Signed per-feature effect on the churn probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapContribution {
    pub feature: FeatureKey,
    /// Positive pushes toward churn, negative away from it. Not bounded.
    pub impact: f64,
}

impl ShapContribution {
    pub fn new(feature: impl Into<FeatureKey>, impact: f64) -> Self {
        Self {
            feature: feature.into(),
            impact,
        }
    }
}

/// Response of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: ChurnLabel,
    pub probability: f64,
    pub shap: Vec<ShapContribution>,
}
