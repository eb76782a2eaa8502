//! Tagged argument list standing in for a C `va_list`.
//!
//! Callers build a slice of [`Arg`] values in the order the verbs appear in the
//! format string and hand it over wrapped in an [`Args`] cursor. Each verb pulls
//! the next value with a typed accessor; pulling the wrong kind is an error
//! instead of a reinterpretation of bits.

use core::ffi::CStr;
use core::fmt;

use crate::error::{Error, Result};

/// The null string pointer, usable wherever a `%s` argument is expected.
pub const NULL: Option<&'static [u8]> = None;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Int,
    Double,
    Str,
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ArgKind::Int => "an integer",
            ArgKind::Double => "a double",
            ArgKind::Str => "a string",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arg<'a> {
    Int(i64),
    Double(f64),
    /// `None` is a null pointer. The bytes may carry their own terminator.
    Str(Option<&'a [u8]>),
}

impl<'a> Arg<'a> {
    pub fn int(val: impl Into<i64>) -> Self {
        Arg::Int(val.into())
    }

    pub fn double(val: impl Into<f64>) -> Self {
        Arg::Double(val.into())
    }

    pub fn str(val: impl CStrArg<'a>) -> Self {
        Arg::Str(val.into_cstr_bytes())
    }

    pub fn kind(&self) -> ArgKind {
        match self {
            Arg::Int(_) => ArgKind::Int,
            Arg::Double(_) => ArgKind::Double,
            Arg::Str(_) => ArgKind::Str,
        }
    }
}

impl From<i32> for Arg<'_> {
    fn from(val: i32) -> Self {
        Arg::Int(val.into())
    }
}

impl From<i64> for Arg<'_> {
    fn from(val: i64) -> Self {
        Arg::Int(val)
    }
}

impl From<f64> for Arg<'_> {
    fn from(val: f64) -> Self {
        Arg::Double(val)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(val: &'a str) -> Self {
        Arg::str(val)
    }
}

/// Values that can be passed where a C string pointer is expected.
pub trait CStrArg<'a> {
    fn into_cstr_bytes(self) -> Option<&'a [u8]>;
}

impl<'a> CStrArg<'a> for &'a [u8] {
    fn into_cstr_bytes(self) -> Option<&'a [u8]> {
        Some(self)
    }
}

impl<'a, const N: usize> CStrArg<'a> for &'a [u8; N] {
    fn into_cstr_bytes(self) -> Option<&'a [u8]> {
        Some(self.as_slice())
    }
}

impl<'a> CStrArg<'a> for &'a str {
    fn into_cstr_bytes(self) -> Option<&'a [u8]> {
        Some(self.as_bytes())
    }
}

impl<'a> CStrArg<'a> for &'a String {
    fn into_cstr_bytes(self) -> Option<&'a [u8]> {
        Some(self.as_bytes())
    }
}

impl<'a> CStrArg<'a> for &'a CStr {
    fn into_cstr_bytes(self) -> Option<&'a [u8]> {
        Some(self.to_bytes())
    }
}

impl<'a, T: CStrArg<'a>> CStrArg<'a> for Option<T> {
    fn into_cstr_bytes(self) -> Option<&'a [u8]> {
        self.and_then(CStrArg::into_cstr_bytes)
    }
}

/// Position-advancing cursor over an argument list. There is no rewind.
#[derive(Debug, Clone)]
pub struct Args<'a> {
    args: &'a [Arg<'a>],
    pos: usize,
}

impl<'a> Args<'a> {
    pub fn new(args: &'a [Arg<'a>]) -> Self {
        Self { args, pos: 0 }
    }

    pub fn empty() -> Self {
        Self { args: &[], pos: 0 }
    }

    /// Number of arguments consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.args.len() - self.pos
    }

    pub fn next_int(&mut self) -> Result<i64> {
        match self.pull(ArgKind::Int)? {
            Arg::Int(val) => Ok(val),
            other => Err(self.mismatch(ArgKind::Int, other)),
        }
    }

    pub fn next_double(&mut self) -> Result<f64> {
        match self.pull(ArgKind::Double)? {
            Arg::Double(val) => Ok(val),
            other => Err(self.mismatch(ArgKind::Double, other)),
        }
    }

    pub fn next_str(&mut self) -> Result<Option<&'a [u8]>> {
        match self.pull(ArgKind::Str)? {
            Arg::Str(val) => Ok(val),
            other => Err(self.mismatch(ArgKind::Str, other)),
        }
    }

    // The cursor moves past the argument even when its kind turns out wrong.
    fn pull(&mut self, expected: ArgKind) -> Result<Arg<'a>> {
        let arg = *self.args.get(self.pos).ok_or(Error::MissingArgument {
            position: self.pos,
            expected,
        })?;
        self.pos += 1;
        Ok(arg)
    }

    fn mismatch(&self, expected: ArgKind, found: Arg<'_>) -> Error {
        Error::ArgumentMismatch {
            position: self.pos - 1,
            expected,
            found: found.kind(),
        }
    }
}
