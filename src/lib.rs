//! shimc - a minimal C runtime shim for compiler test harnesses
//!
//! # Design objective:
//! 1. Provide just enough of `printf`, `sprintf`, `memcmp`, `strcmp`, `exit`
//!    and an `assert` primitive for generated test programs to report results.
//! 2. Replace C varargs with a typed argument cursor that fails loudly on a
//!    kind mismatch.
//!
//! # Examples
//!
//! ```rust
//! let mut buf = [0_u8; 32];
//! let len = shimc::sprintf!(&mut buf, "val=%d end", 42).unwrap();
//! assert_eq!(&buf[..len + 1], b"val=42 end\0");
//!
//! shimc::printf!("pi=%.2f\n", 3.14159).unwrap();
//! shimc::printf!("%s and %s\n", "a c string", shimc::NULL).unwrap();
//!
//! assert_eq!(shimc::add_all!(1, 2, 3).unwrap(), 6);
//! assert_eq!(shimc::strcmp(b"abc\0", b"abd\0"), -1);
//! shimc::check!(2, 1 + 1);
//! ```

mod arg;
mod error;
mod formatter;
mod printf;
mod runtime;
mod string;

pub use arg::{Arg, ArgKind, Args, CStrArg, NULL};
pub use error::{Error, Result};
pub use formatter::{BufFormatter, Formatter, DEFAULT_PRECISION, MAX_PRECISION};
pub use printf::{vformat, vfprintf, vprintf, vsprintf};
pub use runtime::{add_all, assert, assert_int, check, check_int, exit, getptrsize};
pub use string::{memcmp, strcmp, strlen, strncmp};

pub use shimc_macros::{eprintf, fprintf, printf, sprintf};

/// `check!(expected, expr)` asserts `expr == expected`, labelled with the
/// source text of `expr`. Both sides are integers or `bool`s that must fit in
/// an `i64`. A mismatch terminates the process with status 1.
#[macro_export]
macro_rules! check {
    ($expected: expr, $actual: expr) => {
        $crate::assert_int($expected, $actual, stringify!($actual))
    };
}

/// `add_all!(a, b, ...)` sums its integer arguments through [`add_all`].
#[macro_export]
macro_rules! add_all {
    ($($val: expr),* $(,)?) => {{
        let args: &[$crate::Arg<'_>] = &[$($crate::Arg::int($val)),*];
        $crate::add_all(args.len(), &mut $crate::Args::new(args))
    }};
}
