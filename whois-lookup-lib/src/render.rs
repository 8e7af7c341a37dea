//! Display model for lookup results.
//!
//! [`render`] is a pure function from the current record, display mode and
//! error flag to the set of tables that should be visible. Front ends only
//! decide how a [`View`] is drawn.

use crate::types::{ContactRecord, DisplayMode, DomainRecord, LookupRecord};
use serde::Serialize;

/// Longest hostname summary shown before it is cut.
pub const HOSTNAME_DISPLAY_LIMIT: usize = 25;

/// Banner shown for misses and transport failures alike.
pub const NO_RECORDS_MESSAGE: &str = "No records found for this domain.";

/// One titled two-column table of (field, information) rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub title: &'static str,
    pub rows: Vec<(&'static str, String)>,
}

/// Everything that should be visible below the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum View {
    /// Nothing searched yet
    Empty,
    /// The lookup failed; no tables
    ErrorNotice { message: &'static str },
    /// One or two tables, domain first
    Tables { tables: Vec<Table> },
}

impl View {
    pub fn tables(&self) -> &[Table] {
        match self {
            View::Tables { tables } => tables,
            _ => &[],
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, View::ErrorNotice { .. })
    }
}

/// Compute the visible view.
pub fn render(record: Option<&LookupRecord>, mode: DisplayMode, error: bool) -> View {
    if error {
        return View::ErrorNotice {
            message: NO_RECORDS_MESSAGE,
        };
    }

    let Some(record) = record else {
        return View::Empty;
    };

    let mut tables = Vec::with_capacity(2);
    if mode.shows_domain() {
        tables.push(domain_table(&record.domain));
    }
    if mode.shows_contact() {
        tables.push(contact_table(&record.contact));
    }
    View::Tables { tables }
}

/// Join hostnames with ", " and cut the result to
/// [`HOSTNAME_DISPLAY_LIMIT`] characters, appending "..." when cut.
pub fn summarize_hostnames(hostnames: &[String]) -> String {
    let joined = hostnames.join(", ");
    if joined.chars().count() > HOSTNAME_DISPLAY_LIMIT {
        let mut cut: String = joined.chars().take(HOSTNAME_DISPLAY_LIMIT).collect();
        cut.push_str("...");
        cut
    } else {
        joined
    }
}

fn domain_table(domain: &DomainRecord) -> Table {
    Table {
        title: "Domain Info",
        rows: vec![
            ("Domain Name", domain.domain_name.clone()),
            ("Registrar Name", domain.registrar_name.clone()),
            ("Registration Date", domain.registration_date.clone()),
            ("Expiration Date", domain.expiration_date.clone()),
            ("Estimated Domain Age", domain.estimated_domain_age.clone()),
            ("Hostnames", summarize_hostnames(&domain.hostnames)),
        ],
    }
}

fn contact_table(contact: &ContactRecord) -> Table {
    Table {
        title: "Contact Info",
        rows: vec![
            ("Registrant Name", contact.registrant_name.clone()),
            ("Technical Contact Name", contact.technical_contact_name.clone()),
            (
                "Administrative Contact Name",
                contact.administrative_contact_name.clone(),
            ),
            ("Contact Email", contact.contact_email.clone()),
        ],
    }
}
