//! # Issue and Print
//!
//! The one caller-facing operation: create a voucher on the controller, look
//! the record up again, and print it.
//!
//! ```text
//! issue_and_print
//!   ├─ create_voucher(minutes)   ──► create_time
//!   ├─ stat_voucher(create_time) ──► [Voucher]   (none → EmptyResult)
//!   ├─ render ticket + write     (only when the above succeeded)
//!   └─ close printer             (always, exactly once)
//! ```
//!
//! The printer connection is opened by the caller before anything is sent to
//! the controller, so an unreachable printer fails the run before a voucher
//! is wasted.

use tracing::{info, warn};

use crate::controller::{Client, Voucher, VoucherSpec};
use crate::error::{FichaError, Result};
use crate::ticket::{self, TicketContent, TicketLayout};
use crate::transport::PrintSink;

/// A guest's request for network access.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueRequest {
    pub hours: u32,
    pub note: Option<String>,
    /// Number of allowed uses (0 = unlimited).
    pub quota: u32,
}

impl IssueRequest {
    /// A single-use voucher valid for `hours`.
    pub fn new(hours: u32) -> Self {
        Self {
            hours,
            note: None,
            quota: 1,
        }
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn quota(mut self, quota: u32) -> Self {
        self.quota = quota;
        self
    }

    /// Reject requests the controller would refuse (zero hours).
    pub fn validate(&self) -> Result<()> {
        ticket::hours_to_minutes(self.hours).map(|_| ())
    }

    fn to_spec(&self) -> Result<VoucherSpec> {
        let mut spec = VoucherSpec::new(ticket::hours_to_minutes(self.hours)?).quota(self.quota);
        if let Some(note) = &self.note {
            spec = spec.note(note.clone());
        }
        Ok(spec)
    }
}

/// A freshly created voucher and what should be printed for it.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedVoucher {
    pub voucher: Voucher,
    pub ticket: TicketContent,
}

/// Create one voucher and fetch its record.
pub async fn issue_voucher(client: &mut Client, request: &IssueRequest) -> Result<IssuedVoucher> {
    let spec = request.to_spec()?;
    let create_time = client.create_voucher(&spec).await?;

    let voucher = client
        .stat_voucher(Some(create_time))
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| {
            FichaError::EmptyResult(format!("no voucher found for create_time {}", create_time))
        })?;

    info!(id = %voucher.id, create_time, hours = request.hours, "voucher issued");
    let ticket = TicketContent::from_voucher(&voucher, request.hours);
    Ok(IssuedVoucher { voucher, ticket })
}

/// Issue a voucher and print its ticket on an already open printer.
///
/// `sink` is closed exactly once whatever happens. Nothing is written when
/// issuance fails. An issuance or write error takes precedence over a close
/// error.
pub async fn issue_and_print<S: PrintSink>(
    client: &mut Client,
    mut sink: S,
    request: &IssueRequest,
    layout: &TicketLayout,
) -> Result<IssuedVoucher> {
    let outcome = match issue_voucher(client, request).await {
        Ok(issued) => sink
            .write_all(&layout.render(&issued.ticket))
            .map(|()| issued),
        Err(e) => Err(e),
    };

    match outcome {
        Ok(issued) => {
            sink.close()?;
            Ok(issued)
        }
        Err(e) => Err(close_after_error(&mut sink, e)),
    }
}

/// Close `sink` after `err` ended the run and hand `err` back.
///
/// A close failure is logged, never reported in place of `err`.
pub fn close_after_error<S: PrintSink>(mut sink: S, err: FichaError) -> FichaError {
    if let Err(close_err) = sink.close() {
        warn!(error = %close_err, cause = %err, "printer close failed after error");
    }
    err
}
