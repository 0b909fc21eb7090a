use serde::{Deserialize, Deserializer, Serialize};

use crate::parse::{parse_count_or_zero, parse_or_zero};
use crate::types::Money;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentType {
    Government,
    #[default]
    Salaried,
    SelfEmployed,
    BusinessOwner,
    Student,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResidenceType {
    #[default]
    Owned,
    Rented,
    #[serde(other)]
    WithFamily,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EducationLevel {
    PostGraduate,
    #[default]
    Graduate,
    UnderGraduate,
    #[serde(other)]
    HighSchool,
}

fn form_key(raw: &str) -> String {
    raw.trim().to_ascii_lowercase().replace(|c: char| c == '_' || c == ' ', "-")
}

impl EmploymentType {
    /// Unknown values fall back to `Other`.
    pub fn from_form(raw: &str) -> Self {
        match form_key(raw).as_str() {
            "government" => EmploymentType::Government,
            "salaried" => EmploymentType::Salaried,
            "self-employed" => EmploymentType::SelfEmployed,
            "business-owner" => EmploymentType::BusinessOwner,
            "student" => EmploymentType::Student,
            _ => EmploymentType::Other,
        }
    }
}

impl ResidenceType {
    /// Unknown values fall back to `WithFamily`, the lowest-scoring option.
    pub fn from_form(raw: &str) -> Self {
        match form_key(raw).as_str() {
            "owned" => ResidenceType::Owned,
            "rented" => ResidenceType::Rented,
            _ => ResidenceType::WithFamily,
        }
    }
}

impl EducationLevel {
    /// Unknown values fall back to `HighSchool`, the lowest-scoring option.
    pub fn from_form(raw: &str) -> Self {
        match form_key(raw).as_str() {
            "post-graduate" => EducationLevel::PostGraduate,
            "graduate" => EducationLevel::Graduate,
            "under-graduate" => EducationLevel::UnderGraduate,
            _ => EducationLevel::HighSchool,
        }
    }
}

/// Self-reported financial profile fed to the readiness scorer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialProfile {
    pub monthly_income: Money,
    pub monthly_expenses: Money,
    pub savings_amount: Money,
    pub employment_type: EmploymentType,
    pub dependents: u32,
    pub residence_type: ResidenceType,
    pub education_level: EducationLevel,
    pub age: u32,
}

/// Raw wizard state: every field exactly as typed, possibly blank.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileForm {
    #[serde(deserialize_with = "lenient_string")]
    pub monthly_income: String,
    #[serde(deserialize_with = "lenient_string")]
    pub monthly_expenses: String,
    #[serde(deserialize_with = "lenient_string")]
    pub savings_amount: String,
    #[serde(deserialize_with = "lenient_string")]
    pub employment_type: String,
    #[serde(deserialize_with = "lenient_string")]
    pub dependents: String,
    #[serde(deserialize_with = "lenient_string")]
    pub residence_type: String,
    #[serde(deserialize_with = "lenient_string")]
    pub education_level: String,
    #[serde(deserialize_with = "lenient_string")]
    pub age: String,
}

/// Accept strings, numbers, booleans or null for a form field.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

impl From<&ProfileForm> for FinancialProfile {
    fn from(form: &ProfileForm) -> Self {
        FinancialProfile {
            monthly_income: parse_or_zero(&form.monthly_income),
            monthly_expenses: parse_or_zero(&form.monthly_expenses),
            savings_amount: parse_or_zero(&form.savings_amount),
            employment_type: EmploymentType::from_form(&form.employment_type),
            dependents: parse_count_or_zero(&form.dependents),
            residence_type: ResidenceType::from_form(&form.residence_type),
            education_level: EducationLevel::from_form(&form.education_level),
            age: parse_count_or_zero(&form.age),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_form_converts_permissively() {
        let form = ProfileForm {
            monthly_income: "80,000".into(),
            monthly_expenses: "".into(),
            savings_amount: "lots".into(),
            employment_type: "Self Employed".into(),
            dependents: "2.7".into(),
            residence_type: "hostel".into(),
            education_level: "post_graduate".into(),
            age: "-4".into(),
        };
        let p = FinancialProfile::from(&form);
        assert_eq!(p.monthly_income, dec!(80000));
        assert_eq!(p.monthly_expenses, Decimal::ZERO);
        assert_eq!(p.savings_amount, Decimal::ZERO);
        assert_eq!(p.employment_type, EmploymentType::SelfEmployed);
        assert_eq!(p.dependents, 2);
        assert_eq!(p.residence_type, ResidenceType::WithFamily);
        assert_eq!(p.education_level, EducationLevel::PostGraduate);
        assert_eq!(p.age, 0);
    }

    #[test]
    fn test_form_json_accepts_numbers_and_nulls() {
        let form: ProfileForm = serde_json::from_str(
            r#"{"monthly_income": 45000, "age": "31", "dependents": null}"#,
        )
        .unwrap();
        assert_eq!(form.monthly_income, "45000");
        assert_eq!(form.age, "31");
        assert_eq!(form.dependents, "");
    }

    #[test]
    fn test_profile_json_unknown_enum_falls_back() {
        let p: FinancialProfile = serde_json::from_str(
            r#"{"employment_type": "freelancer", "residence_type": "rented"}"#,
        )
        .unwrap();
        assert_eq!(p.employment_type, EmploymentType::Other);
        assert_eq!(p.residence_type, ResidenceType::Rented);
        assert_eq!(p.education_level, EducationLevel::Graduate);
    }

    #[test]
    fn test_employment_serialises_kebab_case() {
        let s = serde_json::to_string(&EmploymentType::BusinessOwner).unwrap();
        assert_eq!(s, "\"business-owner\"");
    }
}
