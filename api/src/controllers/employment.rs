use super::{parse_body, request_id};
use crate::{
    AppState,
    auth::ApiKey,
    error::{ApiError, Result},
    models::{CandidateSummary, Event, VerificationRecord, VerificationResults},
};
use axum::{
    body::Bytes,
    extract::{Json, Path, State},
    http::StatusCode,
};
use chrono::{Datelike, Utc};
use profiles::{analyze, clamp_years, generate, mask_ssn, quote, second_employer_flip};
use serde_json::Value;
use std::sync::Arc;

const REQUIRED: [&str; 3] = ["candidate_info", "employer_info", "consent_token"];
const CANDIDATE_REQUIRED: [&str; 4] = ["ssn", "first_name", "last_name", "current_address"];

/// null and empty strings count as missing
fn present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

fn missing<'a>(object: Option<&Value>, fields: &[&'a str]) -> Vec<&'a str> {
    fields
        .iter()
        .filter(|f| !present(object.and_then(|o| o.get(**f))))
        .copied()
        .collect()
}

fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

pub async fn create_verification(
    State(app): State<Arc<AppState>>,
    auth: ApiKey,
    body: Bytes,
) -> Result<(StatusCode, Json<VerificationRecord>)> {
    let body = parse_body(&body)?;

    let absent = missing(Some(&body), &REQUIRED);
    if !absent.is_empty() {
        return Err(ApiError::MissingFields(
            absent.into_iter().map(|f| f.to_owned()).collect(),
        ));
    }

    let candidate = body.get("candidate_info");
    let absent = missing(candidate, &CANDIDATE_REQUIRED);
    if !absent.is_empty() {
        return Err(ApiError::MissingFields(
            absent
                .into_iter()
                .map(|f| format!("candidate_info.{f}"))
                .collect(),
        ));
    }

    let employer = body.get("employer_info").cloned().unwrap_or_default();
    let employer_name = employer
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("Primary Employer")
        .to_owned();
    let years = clamp_years(body.get("years_requested").and_then(Value::as_u64));

    let now = Utc::now();
    let history = {
        let mut rng = rand::thread_rng();
        let second = second_employer_flip(&mut rng);
        generate(years, &employer_name, second, now.year(), &mut rng)
    };
    let analysis = analyze(&history);

    let record = VerificationRecord {
        request_id: request_id(),
        status: "completed".to_owned(),
        customer: auth.customer,
        created_at: now,
        candidate: CandidateSummary {
            first_name: text(candidate.and_then(|c| c.get("first_name"))),
            last_name: text(candidate.and_then(|c| c.get("last_name"))),
            ssn_masked: mask_ssn(&text(candidate.and_then(|c| c.get("ssn")))),
        },
        employer,
        pricing: quote(years),
        results: VerificationResults {
            employment_history: history,
            analysis,
        },
    };

    app.store.put(&record).await?;
    info!(
        "Created employment verification {} for {} ({} years)",
        record.request_id, record.customer, years
    );

    if let Some(url) = app.webhook.clone() {
        let secret = app.webhook_secret.clone();
        let risk = record.results.analysis.risk_score.as_str().to_owned();
        let event = Event::VerificationCompleted(record.request_id.clone(), risk);
        tokio::spawn(async move {
            if let Err(e) = event.send(&url, &secret).await {
                warn!("webhook delivery to {} failed: {:?}", url, e);
            }
        });
    }

    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn get_verification(
    State(app): State<Arc<AppState>>,
    _auth: ApiKey,
    Path(id): Path<String>,
) -> Result<Json<VerificationRecord>> {
    let record = app.store.get(&id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(record))
}
