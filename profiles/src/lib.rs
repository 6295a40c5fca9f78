mod history;
mod inquiry;
mod pricing;

pub use history::{
    DEFAULT_YEARS, HIGH_RISK_INCOME, HistoryAnalysis, MAX_YEARS, W2Record, analyze, clamp_years,
    generate, second_employer_flip,
};
pub use inquiry::{DEFAULT_SSN, Inquiry, partner_ssn};
pub use pricing::{BASE_PRICE, Pricing, quote};

use anyhow::Result;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::path::Path;

/// Customer label used when no (or an unknown) api key is presented
pub const GENERAL: &str = "general";

const BUILTIN: &str = include_str!("../profiles.toml");

/// Which fixture table and response schema apply
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UseCase {
    Benefits,
    Lending,
    Employment,
}

impl UseCase {
    /// Unknown strings fall through to employment.
    pub fn parse(s: &str) -> UseCase {
        match s {
            "benefits" => UseCase::Benefits,
            "lending" => UseCase::Lending,
            _ => UseCase::Employment,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UseCase::Benefits => "benefits",
            UseCase::Lending => "lending",
            UseCase::Employment => "employment",
        }
    }
}

/// Overemployment risk level
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskScore {
    Low,
    Medium,
    High,
}

impl RiskScore {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskScore::Low => "low",
            RiskScore::Medium => "medium",
            RiskScore::High => "high",
        }
    }
}

/// A dollar threshold; whole amounts serialize without a fraction
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Amount(pub f64);

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.0.fract() == 0.0 && self.0.abs() < i64::MAX as f64 {
            serializer.serialize_i64(self.0 as i64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BenefitsProfile {
    pub ssn: String,
    pub annual_income: u64,
    pub magi: u64,
    pub medicaid_eligible: bool,
    pub snap_eligible: bool,
    pub medicaid_threshold: Amount,
    pub snap_threshold: Amount,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LendingProfile {
    pub ssn: String,
    pub adjusted_gross_income: u64,
    pub wage_income: u64,
    pub self_employment_income: u64,
    pub other_income: Option<u64>,
    pub filing_status: String,
    pub has_1040: bool,
    pub has_w2: bool,
    pub has_schedule_c: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EmploymentProfile {
    pub ssn: String,
    pub risk: RiskScore,
    pub w2_count: u32,
    pub wages: u64,
    pub employers: u32,
    pub employer_name: String,
}

/// Benefits profile of a partner customer, with household demographics
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HouseholdProfile {
    pub ssn: String,
    pub first_name: String,
    pub last_name: String,
    pub annual_income: u64,
    pub magi: u64,
    pub household_size: u32,
    pub state: String,
    pub medicaid_eligible: bool,
    pub snap_eligible: bool,
    pub medicaid_threshold: Amount,
    pub snap_threshold: Amount,
    pub percentage_of_fpl: u32,
}

trait Keyed {
    fn ssn(&self) -> &str;
}

macro_rules! keyed {
    ($($t:ty),*) => {
        $(impl Keyed for $t {
            fn ssn(&self) -> &str {
                &self.ssn
            }
        })*
    };
}

keyed!(BenefitsProfile, LendingProfile, EmploymentProfile, HouseholdProfile);

/// Find the profile by ssn, or the first entry of the table.
/// Tables are checked non-empty when the fixtures load.
fn pick<'a, P: Keyed>(table: &'a [P], ssn: &str) -> &'a P {
    table
        .iter()
        .find(|p| p.ssn() == ssn)
        .unwrap_or(&table[0])
}

fn contains<P: Keyed>(table: &[P], ssn: &str) -> bool {
    table.iter().any(|p| p.ssn() == ssn)
}

/// A fixture matched for an inquiry
#[derive(Debug)]
pub enum Resolved<'a> {
    Benefits(&'a BenefitsProfile),
    Lending(&'a LendingProfile),
    Employment(&'a EmploymentProfile),
}

impl Resolved<'_> {
    pub fn use_case(&self) -> UseCase {
        match self {
            Resolved::Benefits(_) => UseCase::Benefits,
            Resolved::Lending(_) => UseCase::Lending,
            Resolved::Employment(_) => UseCase::Employment,
        }
    }
}

/// Identifiers advertised to a customer for trying the sandbox
#[derive(Debug, Serialize)]
pub struct TestSsns<'a> {
    pub benefits: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lending: Option<Vec<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employment: Option<Vec<&'a str>>,
}

/// All static sandbox data: api keys and profile tables
#[derive(Debug, Deserialize)]
pub struct Fixtures {
    pub api_keys: HashMap<String, String>,
    pub benefits: Vec<BenefitsProfile>,
    pub lending: Vec<LendingProfile>,
    pub employment: Vec<EmploymentProfile>,
    #[serde(default)]
    pub partners: HashMap<String, Vec<HouseholdProfile>>,
}

impl Fixtures {
    /// The fixtures shipped with the crate
    pub fn builtin() -> Result<Fixtures> {
        Self::parse(BUILTIN)
    }

    /// Load fixtures from a toml file with the same layout as the builtin one
    pub fn from_file(path: impl AsRef<Path>) -> Result<Fixtures> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Fixtures> {
        let fixtures: Fixtures = toml::from_str(content)?;
        fixtures.check()?;
        Ok(fixtures)
    }

    fn check(&self) -> Result<()> {
        if self.benefits.is_empty() {
            return Err(anyhow::anyhow!("benefits table is empty"));
        }
        if self.lending.is_empty() {
            return Err(anyhow::anyhow!("lending table is empty"));
        }
        if self.employment.is_empty() {
            return Err(anyhow::anyhow!("employment table is empty"));
        }
        for (customer, table) in &self.partners {
            if table.is_empty() {
                return Err(anyhow::anyhow!("partner table {customer} is empty"));
            }
        }
        Ok(())
    }

    /// Resolve the customer label of an api key, `general` if unknown.
    pub fn customer(&self, key: Option<&str>) -> &str {
        key.and_then(|k| self.api_keys.get(k))
            .map(|c| c.as_str())
            .unwrap_or(GENERAL)
    }

    pub fn is_known_key(&self, key: &str) -> bool {
        self.api_keys.contains_key(key)
    }

    /// Household profile for a partner customer, None for everyone else.
    pub fn household(&self, customer: &str, ssn: Option<&str>) -> Option<&HouseholdProfile> {
        let table = self.partners.get(customer)?;
        Some(match ssn {
            Some(ssn) => pick(table, ssn),
            None => &table[0],
        })
    }

    /// Match an inquiry to a profile. A known identifier picks its own table,
    /// checking benefits then lending; otherwise the inquiry use case decides.
    pub fn resolve(&self, inquiry: &Inquiry) -> Resolved<'_> {
        let ssn = inquiry.ssn();
        match inquiry.use_case() {
            UseCase::Benefits => Resolved::Benefits(pick(&self.benefits, ssn)),
            _ if contains(&self.benefits, ssn) => Resolved::Benefits(pick(&self.benefits, ssn)),
            UseCase::Lending => Resolved::Lending(pick(&self.lending, ssn)),
            _ if contains(&self.lending, ssn) => Resolved::Lending(pick(&self.lending, ssn)),
            UseCase::Employment => Resolved::Employment(pick(&self.employment, ssn)),
        }
    }

    pub fn test_ssns(&self, customer: &str) -> TestSsns<'_> {
        fn ssns<P: Keyed>(table: &[P]) -> Vec<&str> {
            table.iter().map(|p| p.ssn()).collect()
        }

        match self.partners.get(customer) {
            Some(table) => TestSsns {
                benefits: ssns(table),
                lending: None,
                employment: None,
            },
            None => TestSsns {
                benefits: ssns(&self.benefits),
                lending: Some(ssns(&self.lending)),
                employment: Some(ssns(&self.employment)),
            },
        }
    }
}

/// Keep only the last four characters of an ssn
pub fn mask_ssn(ssn: &str) -> String {
    let chars: Vec<char> = ssn.chars().collect();
    if chars.len() < 4 {
        return "***-**-****".to_owned();
    }
    let last: String = chars[chars.len() - 4..].iter().collect();
    format!("***-**-{last}")
}
