use std::fmt::Display;
use std::io::{self, Write};
use std::process;

use log::{debug, error};

use crate::arg::Args;
use crate::error::{Error, Result};

/// Size in bytes of a native pointer on this target.
pub fn getptrsize() -> usize {
    core::mem::size_of::<*const u8>()
}

/// Terminates the process right away with `code`. No destructors run.
pub fn exit(code: i32) -> ! {
    debug!("exit({code})");
    let _ = io::stdout().flush();
    process::exit(code)
}

/// Compares `expected` and `actual` and reports the outcome on `out`.
///
/// On a match this writes `<label> => <actual>`. On a mismatch it writes
/// `<label> => <expected> expected but got <actual>` and returns
/// [`Error::AssertionFailed`].
pub fn check<W: Write + ?Sized>(out: &mut W, expected: i64, actual: i64, label: &str) -> Result<()> {
    if expected == actual {
        writeln!(out, "{label} => {actual}")?;
        return Ok(());
    }
    let err = Error::AssertionFailed {
        label: label.to_owned(),
        expected,
        actual,
    };
    writeln!(out, "{err}")?;
    Err(err)
}

/// The harness assertion: prints the outcome to stdout and exits with status 1
/// on a mismatch.
pub fn assert(expected: i64, actual: i64, label: &str) {
    let stdout = &mut io::stdout().lock();
    match check(stdout, expected, actual, label) {
        Ok(()) => {}
        Err(e) => {
            error!("{e}");
            exit(1);
        }
    }
}

/// [`check`] for any integer-like values. A value that does not fit in an
/// `i64` fails with [`Error::OutOfRange`] instead of being truncated.
pub fn check_int<W, E, A>(out: &mut W, expected: E, actual: A, label: &str) -> Result<()>
where
    W: Write + ?Sized,
    E: TryInto<i64> + Display + Copy,
    A: TryInto<i64> + Display + Copy,
{
    match (expected.try_into().ok(), actual.try_into().ok()) {
        (Some(expected), Some(actual)) => check(out, expected, actual, label),
        _ => {
            let err = Error::OutOfRange {
                label: label.to_owned(),
                expected: expected.to_string(),
                actual: actual.to_string(),
            };
            writeln!(out, "{err}")?;
            Err(err)
        }
    }
}

/// [`assert`] over [`check_int`]; what `check!` expands to.
pub fn assert_int<E, A>(expected: E, actual: A, label: &str)
where
    E: TryInto<i64> + Display + Copy,
    A: TryInto<i64> + Display + Copy,
{
    let stdout = &mut io::stdout().lock();
    if let Err(e) = check_int(stdout, expected, actual, label) {
        error!("{e}");
        exit(1);
    }
}

/// Pulls `n` integers from `args` and returns their sum.
pub fn add_all(n: usize, args: &mut Args<'_>) -> Result<i64> {
    let mut sum = 0_i64;
    for _ in 0..n {
        sum = sum.wrapping_add(args.next_int()?);
    }
    Ok(sum)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::arg::{Arg, ArgKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_getptrsize() {
        let size = getptrsize();
        assert!(size == 4 || size == 8);
        assert_eq!(size, core::mem::size_of::<usize>());
    }

    #[test]
    fn test_check_pass() {
        let mut out: Vec<u8> = Vec::new();
        check(&mut out, 42, 42, "40+2").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "40+2 => 42\n");
    }

    #[test]
    fn test_check_fail() {
        let mut out: Vec<u8> = Vec::new();
        let err = check(&mut out, 3, 4, "2+2").unwrap_err();
        assert!(matches!(
            err,
            Error::AssertionFailed {
                expected: 3,
                actual: 4,
                ..
            }
        ));
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "2+2 => 3 expected but got 4\n"
        );
    }

    #[test]
    fn test_check_int_mixed_types() {
        let mut out: Vec<u8> = Vec::new();
        check_int(&mut out, 3_usize, 3_i32, "x").unwrap();
        check_int(&mut out, 1, true, "y").unwrap();
        check_int(&mut out, -1, -1_i8, "z").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "x => 3\ny => 1\nz => -1\n");
    }

    #[test]
    fn test_check_int_does_not_truncate() {
        let mut out: Vec<u8> = Vec::new();
        // u64::MAX would read as -1 after an `as i64` cast.
        let err = check_int(&mut out, -1, u64::MAX, "big").unwrap_err();
        assert!(matches!(err, Error::OutOfRange { .. }));
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "big => -1 expected but got 18446744073709551615, which is outside the i64 range\n"
        );

        let mut out: Vec<u8> = Vec::new();
        let err = check_int(&mut out, usize::MAX, 0, "n").unwrap_err();
        assert!(matches!(err, Error::OutOfRange { .. }));
    }

    #[test]
    fn test_add_all() {
        let list = [Arg::int(1), Arg::int(2), Arg::int(3)];
        assert_eq!(add_all(3, &mut Args::new(&list)).unwrap(), 6);
        assert_eq!(add_all(0, &mut Args::empty()).unwrap(), 0);
        assert_eq!(add_all(2, &mut Args::new(&list)).unwrap(), 3);
    }

    #[test]
    fn test_add_all_wraps() {
        let list = [Arg::int(i64::MAX), Arg::int(1)];
        assert_eq!(add_all(2, &mut Args::new(&list)).unwrap(), i64::MIN);
    }

    #[test]
    fn test_add_all_rejects_non_int() {
        let list = [Arg::int(1), Arg::double(2.0)];
        let err = add_all(2, &mut Args::new(&list)).unwrap_err();
        assert!(matches!(
            err,
            Error::ArgumentMismatch {
                position: 1,
                expected: ArgKind::Int,
                found: ArgKind::Double
            }
        ));
        let err = add_all(3, &mut Args::new(&list[..1])).unwrap_err();
        assert!(matches!(err, Error::MissingArgument { position: 1, .. }));
    }
}
