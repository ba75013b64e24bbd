//! # Code Generation
//!
//! Converts IR programs to ESC/POS bytes.

use super::ops::{Op, Program};
use crate::printer::PrinterConfig;
use crate::protocol::{commands, graphics, text};

impl Program {
    /// Compile the IR program to ESC/POS bytes for an 80mm printer.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_bytes_with_config(&PrinterConfig::RECEIPT_80MM)
    }

    /// Compile the IR program to ESC/POS bytes with a specific printer config.
    pub fn to_bytes_with_config(&self, config: &PrinterConfig) -> Vec<u8> {
        let mut out = Vec::new();

        for op in &self.ops {
            match op {
                // ===== Printer Control =====
                Op::Init => out.extend(commands::init()),
                Op::Cut { partial, lines } => out.extend(commands::cut(*partial, *lines)),
                Op::Feed { dots } => out.extend(commands::feed_dots(*dots)),
                Op::FeedLines(n) => out.extend(commands::feed_lines(*n)),
                Op::Pulse { pin, on_ms, off_ms } => {
                    out.extend(commands::pulse(*pin, *on_ms, *off_ms));
                }

                // ===== Style Changes =====
                Op::SetAlign(align) => out.extend(text::align(*align)),
                Op::SetFont(font) => out.extend(text::font(*font)),
                Op::SetBold(enabled) => out.extend(text::bold(*enabled)),
                Op::SetUnderline(enabled) => out.extend(text::underline(*enabled)),
                Op::SetSize { height, width } => out.extend(text::size(*height, *width)),
                Op::ResetStyle => out.extend(text::reset()),

                // ===== Content =====
                Op::Text(s) => out.extend(text::encode(s)),
                Op::Newline => out.push(commands::LF),
                Op::Raw(bytes) => out.extend(bytes),

                // ===== Graphics =====
                Op::Raster {
                    width,
                    height,
                    data,
                } => {
                    // Large images go out in slices so the printer's receive
                    // buffer does not overflow
                    let width_bytes = width.div_ceil(8) as usize;
                    let chunk_rows = config.max_chunk_rows.max(1) as usize;
                    let total_height = *height as usize;

                    let mut row_offset = 0;
                    while row_offset < total_height {
                        let chunk_height = (total_height - row_offset).min(chunk_rows);
                        let byte_start = row_offset * width_bytes;
                        let byte_end = (row_offset + chunk_height) * width_bytes;
                        // Short data: drop the incomplete rows
                        let Some(rows) = data.get(byte_start..byte_end) else {
                            break;
                        };
                        out.extend(graphics::raster(*width, chunk_height as u16, rows));
                        row_offset += chunk_height;
                    }
                }
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::commands::DrawerPin;
    use crate::protocol::text::Alignment;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_codegen_sequence() {
        let program: Program = vec![
            Op::Init,
            Op::SetAlign(Alignment::Center),
            Op::SetBold(true),
            Op::Text("HI".into()),
            Op::Newline,
            Op::Cut {
                partial: false,
                lines: 3,
            },
            Op::Pulse {
                pin: DrawerPin::Pin2,
                on_ms: 120,
                off_ms: 240,
            },
        ]
        .into_iter()
        .collect();

        assert_eq!(
            program.to_bytes(),
            vec![
                0x1B, 0x40, // init
                0x1B, 0x61, 0x01, // center
                0x1B, 0x45, 0x01, // bold
                b'H', b'I', 0x0A, // text + LF
                0x1D, 0x56, 0x41, 0x03, // feed 3 + cut
                0x1B, 0x70, 0x30, 60, 120, // pulse
            ]
        );
    }

    #[test]
    fn test_raster_chunking() {
        let config = PrinterConfig {
            max_chunk_rows: 4,
            ..PrinterConfig::RECEIPT_80MM
        };
        let program: Program = vec![Op::Raster {
            width: 8,
            height: 10,
            data: vec![0xFF; 10],
        }]
        .into_iter()
        .collect();

        let bytes = program.to_bytes_with_config(&config);
        // 3 chunks (4 + 4 + 2 rows), each with an 8-byte header
        assert_eq!(bytes.len(), 3 * 8 + 10);
        assert_eq!(&bytes[..8], &[0x1D, 0x76, 0x30, 0x00, 1, 0, 4, 0]);
        assert_eq!(&bytes[24..32], &[0x1D, 0x76, 0x30, 0x00, 1, 0, 2, 0]);
    }
}
