//! The `printf` family.
//!
//! A deliberately small subset of the C formatting language: `%d`, `%s`, `%f`
//! and `%.<N>f`. There are no flags, widths or length modifiers. Any other
//! byte after `%` is written as is, and a `%` at the very end of the format
//! string ends the output.

use std::io::{self, Write};

use log::{debug, trace};

use crate::arg::Args;
use crate::error::Result;
use crate::formatter::{BufFormatter, Formatter, DEFAULT_PRECISION, MAX_PRECISION};

const PERCENT: u8 = b'%';
const DIGIT: u8 = b'd';
const DOT: u8 = b'.';
const FLOT: u8 = b'f';
const STR: u8 = b's';

// Past the end of the slice reads as the terminator.
fn byte_at(fmt: &[u8], pos: usize) -> u8 {
    fmt.get(pos).copied().unwrap_or(0)
}

/// Scans `fmt` up to its terminator, pulling one argument per verb and
/// writing the result to `out`. Returns the number of bytes written.
pub fn vformat<F>(fmt: &[u8], args: &mut Args<'_>, out: &mut F) -> Result<usize>
where
    F: Formatter + ?Sized,
{
    let mut written = 0;
    let mut pos = 0;
    loop {
        match byte_at(fmt, pos) {
            0 => break,
            PERCENT => pos += 1,
            b => {
                written += out.write_byte(b)?;
                pos += 1;
                continue;
            }
        }

        match byte_at(fmt, pos) {
            0 => break,
            DIGIT => {
                let val = args.next_int()?;
                trace!("%d <- {val}");
                written += out.write_i64(val)?;
                pos += 1;
            }
            STR => {
                let val = args.next_str()?;
                trace!("%s <- {} bytes", val.map_or(0, <[u8]>::len));
                written += out.write_cstr(val)?;
                pos += 1;
            }
            FLOT => {
                let val = args.next_double()?;
                trace!("%f <- {val}");
                written += out.write_f64(val, DEFAULT_PRECISION)?;
                pos += 1;
            }
            DOT => {
                pos += 1;
                let start = pos;
                while byte_at(fmt, pos).is_ascii_digit() {
                    pos += 1;
                }
                if byte_at(fmt, pos) != FLOT {
                    // Malformed precision ends the output.
                    break;
                }
                let precision = parse_precision(&fmt[start..pos]);
                let val = args.next_double()?;
                trace!("%.{precision}f <- {val}");
                written += out.write_f64(val, precision)?;
                pos += 1;
            }
            verb => {
                written += out.write_byte(verb)?;
                pos += 1;
            }
        }
    }
    Ok(written)
}

fn parse_precision(digits: &[u8]) -> usize {
    if digits.is_empty() {
        return DEFAULT_PRECISION;
    }
    digits
        .iter()
        .fold(0_usize, |acc, &d| {
            acc.saturating_mul(10).saturating_add(usize::from(d - b'0'))
        })
        .min(MAX_PRECISION)
}

/// Formats into a staging buffer and writes it to `w` as UTF-8 text.
///
/// Returns the number of formatted bytes, which can differ from what reaches
/// `w` when the output is not valid UTF-8.
pub fn vfprintf<W: Write + ?Sized>(w: &mut W, fmt: &[u8], args: &mut Args<'_>) -> Result<usize> {
    let mut buffer: Vec<u8> = Vec::new();
    vformat(fmt, args, &mut buffer)?;
    w.write_all(String::from_utf8_lossy(&buffer).as_bytes())?;
    w.flush()?;
    debug!("printf wrote {} bytes", buffer.len());
    Ok(buffer.len())
}

pub fn vprintf(fmt: &[u8], args: &mut Args<'_>) -> Result<usize> {
    vfprintf(&mut io::stdout().lock(), fmt, args)
}

/// Formats in place into `buf` and appends a zero terminator.
///
/// Returns the length of the output without the terminator. Fails with
/// `Error::BufferFull` when `buf` cannot hold the output and the terminator.
pub fn vsprintf(buf: &mut [u8], fmt: &[u8], args: &mut Args<'_>) -> Result<usize> {
    let mut out = BufFormatter::new(buf);
    vformat(fmt, args, &mut out)?;
    let len = out.finish()?;
    debug!("sprintf wrote {len} bytes");
    Ok(len)
}
