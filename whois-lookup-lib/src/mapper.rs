//! Normalization of upstream WHOIS payloads.
//!
//! The upstream service returns loosely structured JSON where any field may
//! be missing. This module turns it into the fixed-shape [`LookupRecord`],
//! filling every gap with [`PLACEHOLDER`].

use crate::error::LookupError;
use crate::types::{ContactRecord, DomainRecord, LookupRecord, PLACEHOLDER};
use serde_json::Value;

/// Top-level key holding the record in a successful response.
const RECORD_KEY: &str = "WhoisRecord";

/// Map a raw upstream payload into a normalized record pair.
///
/// # Errors
///
/// Returns [`LookupError::UpstreamMiss`] when the payload has no usable
/// `WhoisRecord`. Missing fields inside the record never fail.
pub fn map_response(domain: &str, payload: &Value) -> Result<LookupRecord, LookupError> {
    let record = match payload.get(RECORD_KEY) {
        Some(record) if is_present(record) => record,
        _ => return Err(LookupError::upstream_miss(domain)),
    };

    let domain = DomainRecord {
        domain_name: field_or_placeholder(record, &["domainName"]),
        registrar_name: field_or_placeholder(record, &["registrarName"]),
        registration_date: field_or_placeholder(record, &["createdDate"]),
        expiration_date: field_or_placeholder(record, &["expiresDate"]),
        estimated_domain_age: lookup(record, &["estimatedDomainAge"])
            .map(|age| format!("{} years", scalar_text(age)))
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        hostnames: hostnames(record),
    };

    let contact = ContactRecord {
        registrant_name: field_or_placeholder(record, &["registrant", "name"]),
        technical_contact_name: field_or_placeholder(record, &["technicalContact", "name"]),
        administrative_contact_name: field_or_placeholder(
            record,
            &["administrativeContact", "name"],
        ),
        contact_email: field_or_placeholder(record, &["contactEmail"]),
    };

    Ok(LookupRecord { domain, contact })
}

/// Read the value at `path` as display text, or [`PLACEHOLDER`] if absent.
///
/// This is the single defaulting rule shared by every record field.
pub fn field_or_placeholder(root: &Value, path: &[&str]) -> String {
    lookup(root, path)
        .map(scalar_text)
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Walk `path` from `root`, yielding `None` for any missing step or an
/// empty terminal value.
fn lookup<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let value = path.iter().try_fold(root, |node, key| node.get(*key))?;
    is_present(value).then_some(value)
}

/// Null, empty strings, `false`, and zero count as missing.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            // 7.0 renders as "7"
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

fn hostnames(record: &Value) -> Vec<String> {
    match lookup(record, &["nameServers", "hostNames"]) {
        // null entries join as empty segments
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => scalar_text(other),
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_payload() -> Value {
        json!({
            "WhoisRecord": {
                "domainName": "example.com",
                "registrarName": "RESERVED-Internet Assigned Numbers Authority",
                "createdDate": "1995-08-14T04:00:00Z",
                "expiresDate": "2025-08-13T04:00:00Z",
                "estimatedDomainAge": 29,
                "nameServers": { "hostNames": ["A.IANA-SERVERS.NET", "B.IANA-SERVERS.NET"] },
                "registrant": { "name": "Internet Assigned Numbers Authority" },
                "technicalContact": { "name": "NA Tech" },
                "administrativeContact": { "name": "NA Admin" },
                "contactEmail": "hostmaster@iana.org"
            }
        })
    }

    #[test]
    fn test_full_record_maps_literal_values() {
        let record = map_response("example.com", &full_payload()).unwrap();

        assert_eq!(record.domain.domain_name, "example.com");
        assert_eq!(
            record.domain.registrar_name,
            "RESERVED-Internet Assigned Numbers Authority"
        );
        assert_eq!(record.domain.registration_date, "1995-08-14T04:00:00Z");
        assert_eq!(record.domain.expiration_date, "2025-08-13T04:00:00Z");
        assert_eq!(record.domain.estimated_domain_age, "29 years");
        assert_eq!(
            record.domain.hostnames,
            vec!["A.IANA-SERVERS.NET", "B.IANA-SERVERS.NET"]
        );
        assert_eq!(
            record.contact.registrant_name,
            "Internet Assigned Numbers Authority"
        );
        assert_eq!(record.contact.technical_contact_name, "NA Tech");
        assert_eq!(record.contact.administrative_contact_name, "NA Admin");
        assert_eq!(record.contact.contact_email, "hostmaster@iana.org");
    }

    #[test]
    fn test_empty_record_is_all_placeholders() {
        let record = map_response("example.com", &json!({ "WhoisRecord": {} })).unwrap();

        for value in [
            &record.domain.domain_name,
            &record.domain.registrar_name,
            &record.domain.registration_date,
            &record.domain.expiration_date,
            &record.domain.estimated_domain_age,
            &record.contact.registrant_name,
            &record.contact.technical_contact_name,
            &record.contact.administrative_contact_name,
            &record.contact.contact_email,
        ] {
            assert_eq!(value, PLACEHOLDER);
        }
        assert!(record.domain.hostnames.is_empty());
    }

    #[test]
    fn test_each_missing_field_becomes_placeholder() {
        let fields = [
            "domainName",
            "registrarName",
            "createdDate",
            "expiresDate",
            "estimatedDomainAge",
            "registrant",
            "technicalContact",
            "administrativeContact",
            "contactEmail",
        ];

        for field in fields {
            let mut payload = full_payload();
            payload["WhoisRecord"]
                .as_object_mut()
                .unwrap()
                .remove(field);
            let record = map_response("example.com", &payload).unwrap();
            let value = match field {
                "domainName" => record.domain.domain_name,
                "registrarName" => record.domain.registrar_name,
                "createdDate" => record.domain.registration_date,
                "expiresDate" => record.domain.expiration_date,
                "estimatedDomainAge" => record.domain.estimated_domain_age,
                "registrant" => record.contact.registrant_name,
                "technicalContact" => record.contact.technical_contact_name,
                "administrativeContact" => record.contact.administrative_contact_name,
                _ => record.contact.contact_email,
            };
            assert_eq!(value, PLACEHOLDER, "field {} should fall back", field);
        }
    }

    #[test]
    fn test_null_and_empty_values_are_missing() {
        let payload = json!({
            "WhoisRecord": {
                "domainName": null,
                "registrarName": "",
                "estimatedDomainAge": 0,
                "registrant": null,
                "technicalContact": { "name": null },
                "nameServers": { "hostNames": null }
            }
        });
        let record = map_response("x.com", &payload).unwrap();
        assert_eq!(record.domain.domain_name, PLACEHOLDER);
        assert_eq!(record.domain.registrar_name, PLACEHOLDER);
        assert_eq!(record.domain.estimated_domain_age, PLACEHOLDER);
        assert_eq!(record.contact.registrant_name, PLACEHOLDER);
        assert_eq!(record.contact.technical_contact_name, PLACEHOLDER);
        assert!(record.domain.hostnames.is_empty());
    }

    #[test]
    fn test_null_hostnames_keep_their_position() {
        let payload = json!({
            "WhoisRecord": {
                "nameServers": { "hostNames": ["NS1.EXAMPLE.NET", null, "NS2.EXAMPLE.NET"] }
            }
        });
        let record = map_response("example.com", &payload).unwrap();
        assert_eq!(
            record.domain.hostnames,
            vec!["NS1.EXAMPLE.NET", "", "NS2.EXAMPLE.NET"]
        );
        assert_eq!(
            crate::render::summarize_hostnames(&record.domain.hostnames),
            "NS1.EXAMPLE.NET, , NS2.EX..."
        );
    }

    #[test]
    fn test_wrong_shapes_never_panic() {
        let payload = json!({
            "WhoisRecord": {
                "registrant": "just a string",
                "nameServers": ["not", "an", "object"],
                "contactEmail": 42
            }
        });
        let record = map_response("x.com", &payload).unwrap();
        assert_eq!(record.contact.registrant_name, PLACEHOLDER);
        assert!(record.domain.hostnames.is_empty());
        assert_eq!(record.contact.contact_email, "42");
    }

    #[test]
    fn test_missing_whois_record_is_upstream_miss() {
        for payload in [json!({}), json!({ "WhoisRecord": null }), json!([])] {
            let err = map_response("bogus-domain-xyz", &payload).unwrap_err();
            assert!(matches!(err, LookupError::UpstreamMiss { ref domain } if domain == "bogus-domain-xyz"));
        }
    }

    #[test]
    fn test_estimated_age_formats() {
        let age = |v: Value| {
            map_response("x.com", &json!({ "WhoisRecord": { "estimatedDomainAge": v } }))
                .unwrap()
                .domain
                .estimated_domain_age
        };
        assert_eq!(age(json!(3)), "3 years");
        assert_eq!(age(json!(3.0)), "3 years");
        assert_eq!(age(json!(2.5)), "2.5 years");
        assert_eq!(age(json!("12")), "12 years");
    }
}
