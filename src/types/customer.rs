//! Customer profile types: the predict request and the raw form it is built from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{ChurnLensError, Result};

/// Customer geography (the service's fixed category set).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Geography {
    #[default]
    France,
    Germany,
    Spain,
}

impl Geography {
    pub const ALL: [Geography; 3] = [Geography::France, Geography::Germany, Geography::Spain];

    pub fn as_str(&self) -> &'static str {
        match self {
            Geography::France => "France",
            Geography::Germany => "Germany",
            Geography::Spain => "Spain",
        }
    }
}

impl fmt::Display for Geography {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Geography {
    type Err = ChurnLensError;

    fn from_str(s: &str) -> Result<Self> {
        Geography::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ChurnLensError::incomplete("Geography", "must be one of France, Germany, Spain")
            })
    }
}

/// Customer gender (the service's fixed category set).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ChurnLensError;

    fn from_str(s: &str) -> Result<Self> {
        Gender::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ChurnLensError::incomplete("Gender", "must be one of Male, Female"))
    }
}

/// A fully coerced customer profile, ready to send to `POST /predict`.
///
/// Field names on the wire follow the service schema; both flags travel
/// as `0`/`1` integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    #[serde(rename = "Geography")]
    pub geography: Geography,
    #[serde(rename = "Gender")]
    pub gender: Gender,
    #[serde(rename = "Age")]
    pub age: u32,
    #[serde(rename = "Tenure")]
    pub tenure: u32,
    #[serde(rename = "Balance")]
    pub balance: f64,
    #[serde(rename = "NumOfProducts")]
    pub num_of_products: u32,
    /// Conventionally 300–900; not enforced.
    #[serde(rename = "CreditScore")]
    pub credit_score: f64,
    #[serde(rename = "EstimatedSalary")]
    pub estimated_salary: f64,
    #[serde(rename = "HasCrCard", with = "flag")]
    pub has_credit_card: bool,
    #[serde(rename = "IsActiveMember", with = "flag")]
    pub is_active_member: bool,
}

/// Serialize a `bool` as the `0`/`1` integer the service expects.
mod flag {
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match u8::deserialize(deserializer)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(de::Error::custom(format!("expected 0 or 1, got {other}"))),
        }
    }
}

/// Raw, user-entered customer profile.
///
/// Numeric fields hold the text exactly as typed. [`CustomerForm::parse`]
/// coerces them; a blank or non-numeric field is an
/// [`IncompleteInput`](ChurnLensError::IncompleteInput) error rather than
/// a silent zero.
///
/// ```rust
/// # use churnlens::CustomerForm;
/// let form = CustomerForm::new()
///     .age("42")
///     .tenure("3")
///     .balance("125000.50")
///     .num_of_products("2")
///     .credit_score("610")
///     .estimated_salary("88000");
/// let request = form.parse().unwrap();
/// assert_eq!(request.age, 42);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerForm {
    pub geography: String,
    pub gender: String,
    pub age: String,
    pub tenure: String,
    pub balance: String,
    pub num_of_products: String,
    pub credit_score: String,
    pub estimated_salary: String,
    pub has_credit_card: bool,
    pub is_active_member: bool,
}

impl Default for CustomerForm {
    fn default() -> Self {
        Self {
            geography: Geography::default().to_string(),
            gender: Gender::default().to_string(),
            age: String::new(),
            tenure: String::new(),
            balance: String::new(),
            num_of_products: String::new(),
            credit_score: String::new(),
            estimated_salary: String::new(),
            has_credit_card: true,
            is_active_member: true,
        }
    }
}

impl CustomerForm {
    /// An empty form with the dashboard's defaults (France, Male, both flags set).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn geography(mut self, value: impl Into<String>) -> Self {
        self.geography = value.into();
        self
    }

    pub fn gender(mut self, value: impl Into<String>) -> Self {
        self.gender = value.into();
        self
    }

    pub fn age(mut self, value: impl Into<String>) -> Self {
        self.age = value.into();
        self
    }

    pub fn tenure(mut self, value: impl Into<String>) -> Self {
        self.tenure = value.into();
        self
    }

    pub fn balance(mut self, value: impl Into<String>) -> Self {
        self.balance = value.into();
        self
    }

    pub fn num_of_products(mut self, value: impl Into<String>) -> Self {
        self.num_of_products = value.into();
        self
    }

    pub fn credit_score(mut self, value: impl Into<String>) -> Self {
        self.credit_score = value.into();
        self
    }

    pub fn estimated_salary(mut self, value: impl Into<String>) -> Self {
        self.estimated_salary = value.into();
        self
    }

    pub fn has_credit_card(mut self, value: bool) -> Self {
        self.has_credit_card = value;
        self
    }

    pub fn is_active_member(mut self, value: bool) -> Self {
        self.is_active_member = value;
        self
    }

    /// Coerce every field, failing on the first one that is blank or invalid.
    ///
    /// Fields are checked in form order, so the error names the first
    /// problem an operator would see.
    pub fn parse(&self) -> Result<PredictionRequest> {
        Ok(PredictionRequest {
            geography: self.geography.parse()?,
            gender: self.gender.parse()?,
            age: parse_count("Age", &self.age)?,
            tenure: parse_count("Tenure", &self.tenure)?,
            balance: parse_amount("Balance", &self.balance)?,
            num_of_products: parse_count("NumOfProducts", &self.num_of_products)?,
            credit_score: parse_amount("CreditScore", &self.credit_score)?,
            estimated_salary: parse_amount("EstimatedSalary", &self.estimated_salary)?,
            has_credit_card: self.has_credit_card,
            is_active_member: self.is_active_member,
        })
    }
}

fn required<'a>(field: &str, raw: &'a str) -> Result<&'a str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ChurnLensError::incomplete(field, "is required"));
    }
    Ok(trimmed)
}

fn parse_amount(field: &str, raw: &str) -> Result<f64> {
    let value: f64 = required(field, raw)?
        .parse()
        .map_err(|_| ChurnLensError::incomplete(field, "is not a number"))?;
    if !value.is_finite() {
        return Err(ChurnLensError::incomplete(field, "is not a finite number"));
    }
    Ok(value)
}

fn parse_count(field: &str, raw: &str) -> Result<u32> {
    let text = required(field, raw)?;
    text.parse::<u32>().map_err(|_| match text.parse::<f64>() {
        Ok(v) if v < 0.0 => ChurnLensError::incomplete(field, "must not be negative"),
        Ok(_) => ChurnLensError::incomplete(field, "must be a whole number"),
        Err(_) => ChurnLensError::incomplete(field, "is not a number"),
    })
}
