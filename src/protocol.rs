//! Communication Protocols
//!
//! MTK (PMTK) command framing and NMEA sentence cleanup for the GPS
//! receiver. Commands are framed as `$<body>*<checksum>\r\n` where the
//! checksum is the XOR of every body byte, printed as two hex digits.

use core::fmt::Write;

use heapless::String;

/// Maximum framed command length
pub const MAX_CMD_LEN: usize = 96;

/// Enable only RMC and GGA output sentences
pub const PMTK_SET_OUTPUT_RMC_GGA: &str = "PMTK314,0,1,0,1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0";

/// Compute the NMEA checksum of a sentence body
#[must_use]
pub fn checksum(body: &str) -> u8 {
    body.bytes().fold(0, |acc, b| acc ^ b)
}

/// Frame a command body with `$`, checksum and CRLF
///
/// Returns `None` if the framed command does not fit in [`MAX_CMD_LEN`].
#[must_use]
pub fn pmtk_command(body: &str) -> Option<String<MAX_CMD_LEN>> {
    let mut out = String::new();
    write!(out, "${}*{:02X}\r\n", body, checksum(body)).ok()?;
    Some(out)
}

/// Build the `PMTK220` fix interval command
#[must_use]
pub fn pmtk_update_interval(interval_ms: u32) -> Option<String<MAX_CMD_LEN>> {
    let mut body: String<16> = String::new();
    write!(body, "PMTK220,{interval_ms}").ok()?;
    pmtk_command(&body)
}

/// Strip the filler the receiver pads its I2C buffer with
///
/// The PA1010D returns `\n` bytes when it has nothing queued; NUL and CR
/// bytes are dropped as well so only printable sentence text remains.
/// Returns the number of bytes kept at the front of `buf`.
pub fn sanitize(buf: &mut [u8]) -> usize {
    let mut kept = 0;
    let mut last_was_newline = true;
    for i in 0..buf.len() {
        let b = buf[i];
        match b {
            0 | b'\r' => {}
            b'\n' => {
                if !last_was_newline {
                    buf[kept] = b;
                    kept += 1;
                    last_was_newline = true;
                }
            }
            _ => {
                buf[kept] = b;
                kept += 1;
                last_was_newline = false;
            }
        }
    }
    kept
}
