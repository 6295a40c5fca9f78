use super::{parse_body, request_id};
use crate::{
    AppState,
    auth::Customer,
    error::{ApiError, Result},
};
use axum::{
    body::Bytes,
    extract::{Json, State},
};
use chrono::{SecondsFormat, Utc};
use profiles::{HouseholdProfile, Inquiry, Resolved, partner_ssn};
use serde_json::{Value, json};
use std::sync::Arc;

/// Instant verification from the fixture tables. Unknown identifiers
/// resolve to the table's default profile instead of failing.
pub async fn verify(
    State(app): State<Arc<AppState>>,
    customer: Customer,
    body: Bytes,
) -> Result<Json<Value>> {
    if app.strict && !customer.authenticated {
        return Err(ApiError::Unauthorized);
    }

    let body = parse_body(&body)?;
    let request_id = request_id();

    if let Some(profile) = app.fixtures.household(&customer.name, partner_ssn(&body).as_deref()) {
        return Ok(Json(household(request_id, &customer.name, profile)));
    }

    let inquiry = Inquiry::from_body(&body);
    let resolved = app.fixtures.resolve(&inquiry);
    debug!(
        "verify {} as {} for {}",
        inquiry.ssn(),
        resolved.use_case().as_str(),
        customer.name
    );

    let response = match resolved {
        Resolved::Benefits(data) => json!({
            "request_id": request_id,
            "status": "completed",
            "use_case": "benefits",
            "data_preview": {
                "annual_income": data.annual_income,
                "magi": data.magi,
                "eligibility": {
                    "medicaid": data.medicaid_eligible,
                    "snap": data.snap_eligible,
                    "medicaid_threshold": data.medicaid_threshold,
                    "snap_threshold": data.snap_threshold
                }
            }
        }),
        Resolved::Lending(data) => {
            let mut verification = json!({
                "adjusted_gross_income": data.adjusted_gross_income,
                "wage_income": data.wage_income,
                "self_employment_income": data.self_employment_income,
                "filing_status": data.filing_status,
                "documents_available": {
                    "form_1040": data.has_1040,
                    "form_w2": data.has_w2,
                    "schedule_c": data.has_schedule_c
                }
            });
            if let Some(other) = data.other_income {
                verification["other_income"] = other.into();
            }

            json!({
                "request_id": request_id,
                "status": "completed",
                "use_case": "lending",
                "verification_data": verification
            })
        }
        Resolved::Employment(data) => json!({
            "request_id": request_id,
            "status": "completed",
            "use_case": "employment",
            "overemployment_risk": data.risk,
            "employer_count": data.employers,
            "total_wages": data.wages,
            "w2_count": data.w2_count,
            "primary_employer": data.employer_name
        }),
    };

    Ok(Json(response))
}

fn household(request_id: String, customer: &str, data: &HouseholdProfile) -> Value {
    json!({
        "request_id": request_id,
        "status": "completed",
        "customer": customer,
        "use_case": "benefits",
        "data_preview": {
            "applicant_name": format!("{} {}", data.first_name, data.last_name),
            "annual_income": data.annual_income,
            "magi": data.magi,
            "household_size": data.household_size,
            "state": data.state,
            "eligibility": {
                "medicaid": data.medicaid_eligible,
                "snap": data.snap_eligible,
                "medicaid_threshold": data.medicaid_threshold,
                "snap_threshold": data.snap_threshold,
                "percentage_of_fpl": data.percentage_of_fpl
            },
            "determination_date": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
        }
    })
}
