//! # Issue and Print Tests
//!
//! The printer must be closed exactly once per run, and written to only when
//! a voucher was actually issued.

mod common;

use std::io::Read;
use std::net::TcpListener;
use std::sync::atomic::Ordering;
use std::thread;

use pretty_assertions::assert_eq;

use common::{FIRST_CODE, Mock};
use ficha::FichaError;
use ficha::error::Result;
use ficha::issue::{IssueRequest, issue_and_print, issue_voucher};
use ficha::ticket::TicketLayout;
use ficha::transport::{NetworkTransport, PrintSink, PrinterTarget};

/// Sink that records what happened to it.
#[derive(Default)]
struct RecordingSink {
    written: Vec<u8>,
    writes: usize,
    closes: usize,
    fail_write: bool,
    fail_close: bool,
}

impl PrintSink for RecordingSink {
    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        self.writes += 1;
        if self.fail_write {
            return Err(FichaError::Printer("paper out".into()));
        }
        self.written.extend_from_slice(data);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.closes += 1;
        if self.fail_close {
            return Err(FichaError::Printer("close failed".into()));
        }
        Ok(())
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[tokio::test]
async fn issue_voucher_returns_record_and_ticket() {
    let (_mock, mut client) = common::logged_in().await;

    let issued = issue_voucher(&mut client, &IssueRequest::new(48).note("room 12"))
        .await
        .unwrap();
    assert_eq!(issued.voucher.code, FIRST_CODE);
    assert_eq!(issued.voucher.duration, 48 * 60);
    assert_eq!(issued.ticket.hours, 48);
    assert_eq!(issued.ticket.note.as_deref(), Some("room 12"));

    client.close().await.unwrap();
}

#[tokio::test]
async fn prints_and_closes_once_on_success() {
    let (_mock, mut client) = common::logged_in().await;
    let mut sink = RecordingSink::default();
    let layout = TicketLayout::new().title("GUEST WIFI");

    issue_and_print(&mut client, &mut sink, &IssueRequest::new(24), &layout)
        .await
        .unwrap();

    assert_eq!(sink.writes, 1);
    assert_eq!(sink.closes, 1);
    assert!(contains(&sink.written, b"ABCDE-12345"));
    assert!(contains(&sink.written, b"Valid for 1 Day"));
    assert!(contains(&sink.written, b"GUEST WIFI"));

    client.close().await.unwrap();
}

#[tokio::test]
async fn issuance_failure_prints_nothing_and_closes_once() {
    let (mock, mut client) = common::logged_in().await;
    *mock.fail_with.lock().unwrap() = Some("api.err.QuotaExceeded".into());
    let mut sink = RecordingSink::default();

    let err = issue_and_print(&mut client, &mut sink, &IssueRequest::new(1), &TicketLayout::new())
        .await
        .unwrap_err();

    assert!(matches!(err, FichaError::Api(ref msg) if msg == "api.err.QuotaExceeded"));
    assert_eq!(sink.writes, 0);
    assert_eq!(sink.closes, 1);

    client.close().await.unwrap();
}

#[tokio::test]
async fn zero_records_prints_nothing_and_closes_once() {
    let (mock, mut client) = common::logged_in().await;
    mock.empty_stat.store(true, Ordering::SeqCst);
    let mut sink = RecordingSink::default();

    let err = issue_and_print(&mut client, &mut sink, &IssueRequest::new(1), &TicketLayout::new())
        .await
        .unwrap_err();

    assert!(matches!(err, FichaError::EmptyResult(_)));
    assert_eq!(sink.writes, 0);
    assert_eq!(sink.closes, 1);

    client.close().await.unwrap();
}

#[tokio::test]
async fn not_logged_in_prints_nothing_and_closes_once() {
    let mock = std::sync::Arc::new(Mock::default());
    let url = common::spawn(mock.clone()).await;
    let mut client = ficha::Client::new(common::config(&url)).unwrap();
    let mut sink = RecordingSink::default();

    let err = issue_and_print(&mut client, &mut sink, &IssueRequest::new(1), &TicketLayout::new())
        .await
        .unwrap_err();

    assert!(matches!(err, FichaError::NotAuthenticated));
    assert_eq!(Mock::count(&mock.requests), 0);
    assert_eq!(sink.writes, 0);
    assert_eq!(sink.closes, 1);
}

#[tokio::test]
async fn write_failure_still_closes_once() {
    let (_mock, mut client) = common::logged_in().await;
    let mut sink = RecordingSink {
        fail_write: true,
        ..Default::default()
    };

    let err = issue_and_print(&mut client, &mut sink, &IssueRequest::new(1), &TicketLayout::new())
        .await
        .unwrap_err();

    assert!(matches!(err, FichaError::Printer(ref msg) if msg == "paper out"));
    assert_eq!(sink.closes, 1);

    client.close().await.unwrap();
}

#[tokio::test]
async fn issuance_error_wins_over_close_error() {
    let (mock, mut client) = common::logged_in().await;
    mock.empty_stat.store(true, Ordering::SeqCst);
    let mut sink = RecordingSink {
        fail_close: true,
        ..Default::default()
    };

    let err = issue_and_print(&mut client, &mut sink, &IssueRequest::new(1), &TicketLayout::new())
        .await
        .unwrap_err();
    assert!(matches!(err, FichaError::EmptyResult(_)));
    assert_eq!(sink.closes, 1);

    client.close().await.unwrap();
}

#[tokio::test]
async fn close_error_reported_after_successful_print() {
    let (_mock, mut client) = common::logged_in().await;
    let mut sink = RecordingSink {
        fail_close: true,
        ..Default::default()
    };

    let err = issue_and_print(&mut client, &mut sink, &IssueRequest::new(1), &TicketLayout::new())
        .await
        .unwrap_err();
    assert!(matches!(err, FichaError::Printer(ref msg) if msg == "close failed"));
    assert_eq!(sink.writes, 1);
    assert_eq!(sink.closes, 1);

    client.close().await.unwrap();
}

#[tokio::test]
async fn prints_over_tcp() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let printer = thread::spawn(move || {
        let (mut conn, _) = listener.accept().unwrap();
        let mut received = Vec::new();
        conn.read_to_end(&mut received).unwrap();
        received
    });

    let (_mock, mut client) = common::logged_in().await;
    let mut transport = NetworkTransport::open(&PrinterTarget::new("127.0.0.1", port)).unwrap();

    issue_and_print(&mut client, &mut transport, &IssueRequest::new(2), &TicketLayout::new())
        .await
        .unwrap();
    assert!(!transport.is_open());
    client.close().await.unwrap();

    // read_to_end only returns once the connection was shut down
    let received = printer.join().unwrap();
    assert_eq!(&received[..2], &[0x1B, 0x40]);
    assert!(contains(&received, b"ABCDE-12345"));
    assert!(contains(&received, b"Valid for 2 Hours"));
}
