//! Lookup session: the form state and its transitions.
//!
//! A [`LookupSession`] owns the [`SearchState`] for one interactive run.
//! It guards empty submissions with the validation notice, sends one
//! request per valid submit, and only lets the most recently issued request
//! update what is displayed.

use crate::client::WhoisSource;
use crate::error::LookupError;
use crate::mapper::map_response;
use crate::render::{render, View};
use crate::types::{DisplayMode, LookupRecord};
use serde_json::Value;
use tracing::{debug, info};

/// Transient state behind the lookup form.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Text currently in the input field
    pub input: String,
    /// Last successfully mapped record pair
    pub record: Option<LookupRecord>,
    /// Set when the last applied lookup failed
    pub error: bool,
    /// Validation notice for empty submissions
    pub modal_visible: bool,
    /// Current table filter
    pub mode: DisplayMode,
    /// Sequence number of the most recently issued request
    issued: u64,
    /// Sequence number of the most recently applied request
    applied: u64,
}

/// Coarse page state, derived from [`SearchState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    ModalOpen,
    Pending,
    Displayed(DisplayMode),
    Error,
}

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn sequence(self) -> u64 {
        self.0
    }
}

/// What a submit did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was blank; the notice is open and nothing was sent
    EmptyInput,
    /// Lookup succeeded and the record is displayed
    Found,
    /// Lookup failed; the error banner is displayed
    Failed,
    /// A newer request was issued meanwhile; this result was dropped
    Superseded,
}

/// Owner of the search state and the upstream source.
pub struct LookupSession<S> {
    source: S,
    state: SearchState,
}

impl<S: WhoisSource> LookupSession<S> {
    /// Create a session in the idle state with the default display mode.
    pub fn new(source: S) -> Self {
        Self::with_mode(source, DisplayMode::default())
    }

    /// Create a session starting in `mode`.
    pub fn with_mode(source: S, mode: DisplayMode) -> Self {
        Self {
            source,
            state: SearchState {
                mode,
                ..SearchState::default()
            },
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Replace the input text.
    pub fn set_input<T: Into<String>>(&mut self, text: T) {
        self.state.input = text.into();
    }

    /// Switch the table filter. Never fetches.
    pub fn set_mode(&mut self, mode: DisplayMode) {
        self.state.mode = mode;
    }

    /// Dismiss the validation notice. Input and results are left alone.
    pub fn close_modal(&mut self) {
        self.state.modal_visible = false;
    }

    /// Submit the current input.
    ///
    /// Blank input opens the validation notice and returns without any
    /// request. Otherwise exactly one request is sent and its result applied.
    /// The session is borrowed for the whole call, so submissions made this
    /// way run one after another; overlapping requests go through
    /// [`begin_request`](Self::begin_request) and [`complete`](Self::complete).
    pub async fn submit(&mut self) -> SubmitOutcome {
        let ticket = match self.begin_request() {
            Ok(ticket) => ticket,
            Err(_) => return SubmitOutcome::EmptyInput,
        };

        let domain = self.state.input.trim().to_string();
        let result = self.source.fetch(&domain).await;
        self.complete(ticket, &domain, result)
    }

    /// Validate the input and reserve a sequence number for a new request.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::EmptyInput`] (and opens the notice) when the
    /// trimmed input is empty.
    pub fn begin_request(&mut self) -> Result<RequestTicket, LookupError> {
        if self.state.input.trim().is_empty() {
            info!("empty submission, showing validation notice");
            self.state.modal_visible = true;
            return Err(LookupError::EmptyInput);
        }

        self.state.issued += 1;
        Ok(RequestTicket(self.state.issued))
    }

    /// Apply the result of the request identified by `ticket`.
    ///
    /// Results from anything but the latest issued request are discarded.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        domain: &str,
        result: Result<Value, LookupError>,
    ) -> SubmitOutcome {
        if ticket.0 != self.state.issued {
            debug!(
                domain,
                ticket = ticket.0,
                latest = self.state.issued,
                "dropping stale lookup response"
            );
            return SubmitOutcome::Superseded;
        }
        self.state.applied = ticket.0;

        match result.and_then(|payload| map_response(domain, &payload)) {
            Ok(record) => {
                info!(domain, "lookup succeeded");
                self.state.record = Some(record);
                self.state.error = false;
                SubmitOutcome::Found
            }
            Err(e) => {
                info!(domain, error = %e, "lookup failed");
                self.state.record = None;
                self.state.error = true;
                SubmitOutcome::Failed
            }
        }
    }

    /// Whether a request has been issued but not yet applied.
    pub fn is_pending(&self) -> bool {
        self.state.issued != self.state.applied
    }

    /// Current page state.
    pub fn phase(&self) -> Phase {
        if self.state.modal_visible {
            Phase::ModalOpen
        } else if self.is_pending() {
            Phase::Pending
        } else if self.state.error {
            Phase::Error
        } else if self.state.record.is_some() {
            Phase::Displayed(self.state.mode)
        } else {
            Phase::Idle
        }
    }

    /// The tables (or notice) currently visible.
    pub fn view(&self) -> View {
        render(
            self.state.record.as_ref(),
            self.state.mode,
            self.state.error,
        )
    }
}
