//! # Voucher Ticket
//!
//! Presentation rules for a printed voucher and the receipt layout itself.
//!
//! ```text
//!            [ logo ]
//!          GUEST WIFI
//!            Voucher
//!        ABCDE-12345          (bold, double size)
//!       Valid for 1 Day
//!      Network: Guest-Net
//!           room 12
//!   Issued 2024-03-09 14:05
//! ```

use chrono::{DateTime, Local};

use crate::components::{Component, ComponentExt, Divider, Header, Image, Receipt, Spacer, Text};
use crate::controller::Voucher;
use crate::error::{FichaError, Result};
use crate::ir::Op;
use crate::printer::PrinterConfig;

/// Characters per group in a printed voucher code.
const CODE_GROUP: usize = 5;

/// Insert a `-` every five characters: `"ABCDE12345"` → `"ABCDE-12345"`.
///
/// Codes that already contain a `-` are returned unchanged.
///
/// ```
/// use ficha::ticket::format_code;
///
/// assert_eq!(format_code("ABCDE12345"), "ABCDE-12345");
/// assert_eq!(format_code("12345-67890"), "12345-67890");
/// ```
pub fn format_code(raw: &str) -> String {
    if raw.contains('-') {
        return raw.to_string();
    }

    let chars: Vec<char> = raw.chars().collect();
    chars
        .chunks(CODE_GROUP)
        .map(|group| group.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("-")
}

/// Human-readable validity: whole days when `hours` divides by 24.
///
/// ```
/// use ficha::ticket::duration_label;
///
/// assert_eq!(duration_label(24), "1 Day");
/// assert_eq!(duration_label(48), "2 Days");
/// assert_eq!(duration_label(5), "5 Hours");
/// ```
pub fn duration_label(hours: u32) -> String {
    let (n, unit) = if hours > 0 && hours % 24 == 0 {
        (hours / 24, "Day")
    } else {
        (hours, "Hour")
    };
    if n == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", n, unit)
    }
}

/// Convert a requested duration to the minutes the controller expects.
pub fn hours_to_minutes(hours: u32) -> Result<u64> {
    if hours == 0 {
        return Err(FichaError::Config("voucher duration must be at least 1 hour".into()));
    }
    Ok(u64::from(hours) * 60)
}

/// Local wall-clock time a voucher was created, for the ticket footer.
fn issued_at(create_time: i64) -> Option<String> {
    let utc = DateTime::from_timestamp(create_time, 0)?;
    Some(utc.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
}

/// What goes on one ticket.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketContent {
    pub code: String,
    pub hours: u32,
    pub note: Option<String>,
    pub create_time: Option<i64>,
}

impl TicketContent {
    /// Content for a voucher record and the duration that was requested.
    pub fn from_voucher(voucher: &Voucher, hours: u32) -> Self {
        Self {
            code: voucher.code.clone(),
            hours,
            note: voucher.note.clone().filter(|n| !n.trim().is_empty()),
            create_time: (voucher.create_time > 0).then_some(voucher.create_time),
        }
    }
}

/// Site-wide look of the ticket: everything that does not change per voucher.
///
/// ## Example
///
/// ```
/// use ficha::components::ComponentExt;
/// use ficha::ticket::{TicketContent, TicketLayout};
///
/// let layout = TicketLayout::new().title("GUEST WIFI").ssid("Guest-Net");
/// let content = TicketContent {
///     code: "ABCDE12345".into(),
///     hours: 24,
///     note: None,
///     create_time: None,
/// };
/// let lines = layout.receipt(&content).compile().text_lines().join("\n");
/// assert!(lines.contains("ABCDE-12345"));
/// assert!(lines.contains("Valid for 1 Day"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TicketLayout {
    title: Option<String>,
    ssid: Option<String>,
    logo: Option<Image>,
    pulse: bool,
    printer: PrinterConfig,
}

impl TicketLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Network name printed under the validity line.
    pub fn ssid(mut self, ssid: impl Into<String>) -> Self {
        self.ssid = Some(ssid.into());
        self
    }

    pub fn logo(mut self, logo: Image) -> Self {
        self.logo = Some(logo);
        self
    }

    /// Kick the drawer port after cutting (buzzer on most printers).
    pub fn pulse(mut self, pulse: bool) -> Self {
        self.pulse = pulse;
        self
    }

    pub fn printer(mut self, printer: PrinterConfig) -> Self {
        self.printer = printer;
        self
    }

    pub fn printer_config(&self) -> &PrinterConfig {
        &self.printer
    }

    /// Lay out one ticket.
    pub fn receipt(&self, content: &TicketContent) -> Receipt {
        let columns = usize::from(self.printer.columns);

        let mut receipt = Receipt::new()
            .child(Centered)
            .child_opt(self.logo.clone())
            .child_opt(self.logo.as_ref().map(|_| Spacer::mm(2.0)))
            .child_opt(self.title.clone().map(Header::small))
            .child(Divider::dashed().width(columns))
            .child(Text::new("Voucher").center())
            .child(Text::new(format_code(&content.code)).center().bold().size(1, 1))
            .child(Text::new(format!("Valid for {}", duration_label(content.hours))).center())
            .child_opt(self.ssid.as_ref().map(|s| Text::new(format!("Network: {}", s)).center()))
            .child_opt(content.note.as_ref().map(|n| Text::new(n.clone()).center().small()))
            .child(Divider::dashed().width(columns))
            .child_opt(
                content
                    .create_time
                    .and_then(issued_at)
                    .map(|t| Text::new(format!("Issued {}", t)).center().small()),
            )
            .child(Spacer::lines(2))
            .cut();

        if self.pulse {
            receipt = receipt.pulse();
        }
        receipt
    }

    /// ESC/POS bytes for one ticket, optimized for this printer.
    pub fn render(&self, content: &TicketContent) -> Vec<u8> {
        self.receipt(content).build_with_config(&self.printer)
    }
}

/// Center justification for everything that follows.
struct Centered;

impl Component for Centered {
    fn emit(&self, ops: &mut Vec<Op>) {
        ops.push(Op::SetAlign(crate::protocol::text::Alignment::Center));
    }
}
