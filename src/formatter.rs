use crate::error::{Error, Result};

/// `%f` without an explicit precision.
pub const DEFAULT_PRECISION: usize = 2;
/// Upper bound applied to `%.<N>f` precisions.
pub const MAX_PRECISION: usize = 512;

/// Destination of formatted output.
///
/// Every `write_***` call returns the number of bytes it accepted. Sinks that
/// cannot take the whole slice fail instead of truncating.
pub trait Formatter {
    fn write_buf(&mut self, buf: &[u8]) -> Result<usize>;
    fn write_byte(&mut self, val: u8) -> Result<usize> {
        self.write_buf(&[val])
    }
    fn write_i64(&mut self, val: i64) -> Result<usize> {
        self.write_buf(i64_buf(val, &mut [0_u8; 24]))
    }
    /// Fixed-point rendering with exactly `precision` fractional digits.
    fn write_f64(&mut self, val: f64, precision: usize) -> Result<usize> {
        if val.is_nan() {
            return self.write_buf(b"nan");
        }
        if val.is_infinite() {
            if val.is_sign_negative() {
                return self.write_buf(b"-inf");
            }
            return self.write_buf(b"inf");
        }
        self.write_buf(&fixed_buf(val, precision.min(MAX_PRECISION)))
    }
    /// Writes the bytes of a C string up to its terminator; `None` writes nothing.
    fn write_cstr(&mut self, val: Option<&[u8]>) -> Result<usize> {
        match val {
            None => Ok(0),
            Some(bytes) => {
                let len = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
                self.write_buf(&bytes[..len])
            }
        }
    }
}

impl Formatter for Vec<u8> {
    fn write_buf(&mut self, buf: &[u8]) -> Result<usize> {
        self.extend_from_slice(buf);
        Ok(buf.len())
    }
}

// Every finite f64 has at most this many fractional decimal digits.
const EXACT_DIGITS: usize = 1074;

// Rounds the exact decimal expansion of `val`, ties away from zero.
fn fixed_buf(val: f64, precision: usize) -> Vec<u8> {
    let exact = format!("{:.*}", EXACT_DIGITS, val.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(precision))
        .collect();
    let mut int_len = int_part.len();

    if matches!(frac_part.as_bytes().get(precision), Some(&d) if d >= b'5') {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, b'1');
                int_len += 1;
                break;
            }
            i -= 1;
            if digits[i] == b'9' {
                digits[i] = b'0';
            } else {
                digits[i] += 1;
                break;
            }
        }
    }

    let mut buf = Vec::with_capacity(digits.len() + 2);
    if val.is_sign_negative() {
        buf.push(b'-');
    }
    buf.extend_from_slice(&digits[..int_len]);
    if precision > 0 {
        buf.push(b'.');
        buf.extend_from_slice(&digits[int_len..]);
    }
    buf
}

fn i64_buf(val: i64, buf: &mut [u8; 24]) -> &[u8] {
    let mut len = u64_buf(val.unsigned_abs(), buf).len();
    if val < 0 {
        buf[buf.len() - len - 1] = b'-';
        len += 1;
    }
    &buf[buf.len() - len..]
}

// Digits are laid out right-aligned; 20 bytes always fit a u64.
fn u64_buf(mut val: u64, buf: &mut [u8]) -> &[u8] {
    let mut pos = buf.len();
    loop {
        pos -= 1;
        let n = val % 10;
        buf[pos] = b'0' + (n as u8);
        val /= 10;
        if val == 0 {
            break;
        }
    }
    &buf[pos..]
}

/// Fixed destination buffer, written in place and zero-terminated by
/// [`BufFormatter::finish`].
pub struct BufFormatter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> BufFormatter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes written so far, excluding any terminator.
    pub fn len(&self) -> usize {
        self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos == 0
    }

    /// Appends the zero terminator and returns the length before it.
    pub fn finish(self) -> Result<usize> {
        let capacity = self.buf.len();
        let slot = self
            .buf
            .get_mut(self.pos)
            .ok_or(Error::BufferFull { capacity })?;
        *slot = 0;
        Ok(self.pos)
    }
}

impl Formatter for BufFormatter<'_> {
    fn write_buf(&mut self, buf: &[u8]) -> Result<usize> {
        let end = self.pos + buf.len();
        if end > self.buf.len() {
            return Err(Error::BufferFull {
                capacity: self.buf.len(),
            });
        }
        self.buf[self.pos..end].copy_from_slice(buf);
        self.pos = end;
        Ok(buf.len())
    }
}
