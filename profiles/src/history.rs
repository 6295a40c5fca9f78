//! Synthetic W-2 history for the employment verification demo.
//!
//! Every draw is independent and uniform; the output is demo data only and
//! not reproducible unless the caller seeds the rng.

use crate::RiskScore;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const DEFAULT_YEARS: u32 = 3;
pub const MAX_YEARS: u32 = 10;

/// Current-year income above this makes multiple employers high risk
pub const HIGH_RISK_INCOME: u64 = 150_000;

const SECOND_EMPLOYER_PROBABILITY: f64 = 0.3;
const SECOND_EMPLOYER: &str = "Northwind Contract Services LLC";

/// One W-2 like record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct W2Record {
    pub tax_year: i32,
    pub employer_name: String,
    pub employer_ein: String,
    pub wages: u64,
    pub federal_income_tax_withheld: u64,
    pub state_income_tax_withheld: u64,
    /// 401(k) elective deferral, 0 when none
    pub retirement_deferral: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryAnalysis {
    pub employer_count: usize,
    pub current_year_income: u64,
    pub current_year_w2_count: usize,
    pub risk_score: RiskScore,
    pub multiple_retirement_contributions: bool,
}

/// Requested years, defaulting to 3 and clamped to 1..=10
pub fn clamp_years(requested: Option<u64>) -> u32 {
    match requested {
        Some(y) => y.clamp(1, MAX_YEARS as u64) as u32,
        None => DEFAULT_YEARS,
    }
}

/// 30% chance the candidate holds a second job
pub fn second_employer_flip<R: Rng + ?Sized>(rng: &mut R) -> bool {
    rng.gen_bool(SECOND_EMPLOYER_PROBABILITY)
}

fn ein<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{:02}-{:07}",
        rng.gen_range(10..100),
        rng.gen_range(0..10_000_000)
    )
}

/// Build the history, most recent year first. The second employer, when
/// present, only appears in the current year.
pub fn generate<R: Rng + ?Sized>(
    years: u32,
    primary: &str,
    second_employer: bool,
    current_year: i32,
    rng: &mut R,
) -> Vec<W2Record> {
    let primary_ein = ein(rng);
    let mut records = Vec::with_capacity(years as usize + 1);

    for offset in 0..years as i32 {
        records.push(W2Record {
            tax_year: current_year - offset,
            employer_name: primary.to_owned(),
            employer_ein: primary_ein.clone(),
            wages: rng.gen_range(55_000..=140_000),
            federal_income_tax_withheld: rng.gen_range(6_000..=28_000),
            state_income_tax_withheld: rng.gen_range(1_500..=7_000),
            retirement_deferral: rng.gen_range(2_000..=19_500),
        });
    }

    if second_employer {
        let deferral = if rng.gen_bool(0.5) {
            rng.gen_range(1_000..=10_000)
        } else {
            0
        };
        records.push(W2Record {
            tax_year: current_year,
            employer_name: SECOND_EMPLOYER.to_owned(),
            employer_ein: ein(rng),
            wages: rng.gen_range(30_000..=110_000),
            federal_income_tax_withheld: rng.gen_range(3_000..=18_000),
            state_income_tax_withheld: rng.gen_range(800..=4_500),
            retirement_deferral: deferral,
        });
    }

    records
}

pub fn analyze(records: &[W2Record]) -> HistoryAnalysis {
    let employer_count = records
        .iter()
        .map(|r| r.employer_name.as_str())
        .collect::<HashSet<_>>()
        .len();

    let latest = records.iter().map(|r| r.tax_year).max();
    let current: Vec<&W2Record> = records
        .iter()
        .filter(|r| Some(r.tax_year) == latest)
        .collect();

    let current_year_income = current.iter().map(|r| r.wages).sum();
    let current_employers = current
        .iter()
        .map(|r| r.employer_name.as_str())
        .collect::<HashSet<_>>()
        .len();

    let risk_score = if current_employers <= 1 {
        RiskScore::Low
    } else if current_year_income > HIGH_RISK_INCOME {
        RiskScore::High
    } else {
        RiskScore::Medium
    };

    HistoryAnalysis {
        employer_count,
        current_year_income,
        current_year_w2_count: current.len(),
        risk_score,
        multiple_retirement_contributions: current
            .iter()
            .filter(|r| r.retirement_deferral > 0)
            .count()
            > 1,
    }
}
