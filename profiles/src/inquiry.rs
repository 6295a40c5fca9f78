use crate::UseCase;
use serde_json::Value;

/// Identifier used when a request carries none
pub const DEFAULT_SSN: &str = "777-77-7777";

/// Body keys naming the subject, in lookup order
const SUBJECTS: [(&str, UseCase); 3] = [
    ("candidate_info", UseCase::Employment),
    ("applicant", UseCase::Benefits),
    ("borrower", UseCase::Lending),
];

/// A verification request, resolved once from the body shape
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inquiry {
    Benefits { ssn: String },
    Lending { ssn: String },
    Employment { ssn: String },
}

/// Presence as the demo clients send it: null, false, 0 and "" are absent.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn field<'a>(body: &'a Value, key: &str) -> Option<&'a Value> {
    body.get(key).filter(|v| truthy(v))
}

/// Non-string identifiers keep their json text, matching no profile.
fn identifier(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl Inquiry {
    /// Bodies that are not objects are treated as empty ones.
    pub fn from_body(body: &Value) -> Inquiry {
        let use_case = match field(body, "use_case") {
            Some(v) => v.as_str().map(UseCase::parse).unwrap_or(UseCase::Employment),
            None => SUBJECTS
                .iter()
                .find(|(key, _)| field(body, key).is_some())
                .map(|(_, use_case)| *use_case)
                .unwrap_or(UseCase::Employment),
        };

        let ssn = field(body, "ssn")
            .or_else(|| {
                SUBJECTS
                    .iter()
                    .find_map(|(key, _)| field(body.get(key)?, "ssn"))
            })
            .map(identifier)
            .unwrap_or_else(|| DEFAULT_SSN.to_owned());

        match use_case {
            UseCase::Benefits => Inquiry::Benefits { ssn },
            UseCase::Lending => Inquiry::Lending { ssn },
            UseCase::Employment => Inquiry::Employment { ssn },
        }
    }

    pub fn ssn(&self) -> &str {
        match self {
            Inquiry::Benefits { ssn } | Inquiry::Lending { ssn } | Inquiry::Employment { ssn } => ssn,
        }
    }

    pub fn use_case(&self) -> UseCase {
        match self {
            Inquiry::Benefits { .. } => UseCase::Benefits,
            Inquiry::Lending { .. } => UseCase::Lending,
            Inquiry::Employment { .. } => UseCase::Employment,
        }
    }
}

/// Identifier of a partner benefits request: `ssn` or `applicant.ssn`
pub fn partner_ssn(body: &Value) -> Option<String> {
    field(body, "ssn")
        .or_else(|| field(body.get("applicant")?, "ssn"))
        .map(identifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn explicit_use_case_wins() {
        let body = json!({ "use_case": "lending", "applicant": { "ssn": "1" } });
        assert_eq!(
            Inquiry::from_body(&body),
            Inquiry::Lending { ssn: "1".into() }
        );
    }

    #[test]
    fn use_case_inferred_from_subject() {
        let cases = [
            (json!({ "candidate_info": {} }), UseCase::Employment),
            (json!({ "applicant": {} }), UseCase::Benefits),
            (json!({ "borrower": {} }), UseCase::Lending),
            (json!({}), UseCase::Employment),
            (json!({ "use_case": "mortgage" }), UseCase::Employment),
            (json!({ "use_case": "", "applicant": {} }), UseCase::Benefits),
            (json!({ "use_case": 5, "applicant": {} }), UseCase::Employment),
            (json!({ "use_case": false, "borrower": {} }), UseCase::Lending),
            (json!({ "applicant": null, "borrower": {} }), UseCase::Lending),
        ];
        for (body, expected) in cases {
            assert_eq!(Inquiry::from_body(&body).use_case(), expected, "{body}");
        }
    }

    #[test]
    fn ssn_lookup_order() {
        let body = json!({ "ssn": "top", "borrower": { "ssn": "nested" } });
        assert_eq!(Inquiry::from_body(&body).ssn(), "top");

        let body = json!({ "borrower": { "ssn": "nested" } });
        assert_eq!(Inquiry::from_body(&body).ssn(), "nested");

        let body = json!({ "applicant": "not an object" });
        assert_eq!(Inquiry::from_body(&body).ssn(), DEFAULT_SSN);

        let body = json!({ "ssn": "", "borrower": { "ssn": "555-55-5555" } });
        assert_eq!(Inquiry::from_body(&body).ssn(), "555-55-5555");

        let body = json!({ "ssn": 0, "applicant": { "ssn": "" } });
        assert_eq!(Inquiry::from_body(&body).ssn(), DEFAULT_SSN);

        let body = json!({ "ssn": 12345 });
        assert_eq!(Inquiry::from_body(&body).ssn(), "12345");
    }

    #[test]
    fn non_object_body_is_empty() {
        let inquiry = Inquiry::from_body(&json!([1, 2, 3]));
        assert_eq!(
            inquiry,
            Inquiry::Employment {
                ssn: DEFAULT_SSN.into()
            }
        );
    }

    #[test]
    fn partner_identifier() {
        assert_eq!(partner_ssn(&json!({ "ssn": "a" })), Some("a".into()));
        assert_eq!(
            partner_ssn(&json!({ "ssn": "", "applicant": { "ssn": "b" } })),
            Some("b".into())
        );
        assert_eq!(partner_ssn(&json!({ "borrower": { "ssn": "c" } })), None);
    }
}
