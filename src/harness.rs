use std::env;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use shimc::{check, Arg, Args};

#[derive(Parser)]
#[command(name = "shimc-harness", version, about = "Exercise the shimc runtime from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the built-in assertion suite
    Selftest,
    /// Format ARGS with FORMAT and print the result
    Printf {
        format: String,
        /// Integers, then doubles, then strings, by what each value parses as
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Compare two integers, exiting with status 1 on a mismatch
    Assert {
        #[arg(allow_hyphen_values = true)]
        expected: i64,
        #[arg(allow_hyphen_values = true)]
        actual: i64,
        #[arg(long, default_value = "actual")]
        label: String,
    },
    /// Print the sum of VALUES
    AddAll {
        #[arg(allow_hyphen_values = true)]
        values: Vec<i64>,
    },
    /// Print the native pointer size in bytes
    Ptrsize,
    /// Terminate with CODE
    Exit {
        #[arg(allow_hyphen_values = true)]
        code: i32,
    },
}

fn classify(raw: &str) -> Arg<'_> {
    if let Ok(val) = raw.parse::<i64>() {
        Arg::Int(val)
    } else if let Ok(val) = raw.parse::<f64>() {
        Arg::Double(val)
    } else {
        Arg::str(raw)
    }
}

fn selftest() -> Result<()> {
    check!(8, shimc::getptrsize() * 8 / shimc::getptrsize());
    check!(shimc::getptrsize(), core::mem::size_of::<*const i32>());
    check!(shimc::getptrsize() * 4, core::mem::size_of::<[*const i64; 4]>());
    check!(16, core::mem::size_of::<[i32; 4]>());
    check!(48, core::mem::size_of::<[[i32; 4]; 3]>());

    check!(0, 0);
    check!(42, 42);
    check!(21, 5 + 20 - 4);
    check!(41, 12 + 34 - 5);
    check!(47, 5 + 6 * 7);
    check!(15, 5 * (9 - 6));
    check!(4, (3 + 5) / 2);
    check!(10, -10 + 20);
    check!(1, 42 == 42);
    check!(0, 1 > 2);

    check!(6, shimc::add_all!(1, 2, 3).context("add_all")?);
    check!(0, shimc::add_all!().context("add_all")?);

    let mut buf = [0_u8; 64];
    let len = shimc::sprintf!(&mut buf, "%s=%d %.3f", "x", -7, 2.5).context("sprintf")?;
    check!(10, len);
    check!(0, shimc::strcmp(&buf, b"x=-7 2.500\0"));
    check!(0, shimc::memcmp(&buf, b"x=-7 2.500\0", len + 1));
    check!(11, shimc::strlen(&buf) + 1);

    shimc::printf!("OK\n").context("printf")?;
    Ok(())
}

fn main() -> Result<()> {
    // Keep stdout for harness output; logs go to stderr.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "warn");
    }
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Selftest => selftest()?,
        Command::Printf { format, args } => {
            let args: Vec<Arg<'_>> = args.iter().map(|a| classify(a)).collect();
            let written = shimc::vprintf(format.as_bytes(), &mut Args::new(&args))
                .with_context(|| format!("formatting {:?}", format))?;
            info!("printf wrote {written} bytes");
        }
        Command::Assert {
            expected,
            actual,
            label,
        } => shimc::assert(expected, actual, &label),
        Command::AddAll { values } => {
            let args: Vec<Arg<'_>> = values.iter().map(|&v| Arg::Int(v)).collect();
            let sum = shimc::add_all(args.len(), &mut Args::new(&args)).context("add_all")?;
            shimc::printf!("%d\n", sum).context("printf")?;
        }
        Command::Ptrsize => {
            let size = i64::try_from(shimc::getptrsize())?;
            shimc::printf!("%d\n", size).context("printf")?;
        }
        Command::Exit { code } => shimc::exit(code),
    }
    Ok(())
}
