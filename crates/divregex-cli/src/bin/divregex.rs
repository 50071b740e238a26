// divregex: Print a regular expression matching numerals divisible by N.
//
// The expression is anchored (^...$) and accepts exactly the non-empty digit
// strings in the chosen base whose value is a multiple of the divisor.
// Leading zeros are accepted.
//
// Usage:
//   divregex [OPTIONS] DIVISOR
//
// Options:
//   -b, --base NAME      binary|decimal|hexadecimal (or b/d/h, 2/10/16)
//   -o, --order ORDER    ascending|descending|i,j,k (elimination order)
//   --sink               Add a sink state for non-digit characters
//   --json               Print a JSON report instead of the bare regex
//   -h, --help           Print help

use std::io::{self, Write};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if divregex_cli::wants_help(&args) {
        println!("divregex: Print a regex matching numerals divisible by DIVISOR.");
        println!();
        println!("Usage: divregex [OPTIONS] DIVISOR");
        println!();
        println!("Options:");
        println!("  -b, --base NAME      binary|decimal|hexadecimal (default: decimal, or $DIVREGEX_BASE)");
        println!("  -o, --order ORDER    ascending|descending|i,j,k (default: ascending, or $DIVREGEX_ORDER)");
        println!("  --sink               Add a sink state for non-digit characters");
        println!("  --json               Print a JSON report instead of the bare regex");
        println!("  -h, --help           Print this help");
        println!();
        println!("Set DIVREGEX_LOG=debug to trace state elimination.");
        return;
    }

    divregex_cli::init_logging();

    let settings = divregex_cli::parse_settings(&args).unwrap_or_else(|e| divregex_cli::fatal(&e));
    let mut json = false;
    for arg in &settings.rest {
        match arg.as_str() {
            "--json" => json = true,
            other => divregex_cli::fatal(&format!("unexpected argument: {other}")),
        }
    }

    let regex = settings
        .synthesize()
        .unwrap_or_else(|e| divregex_cli::fatal(&e.to_string()));
    log::info!(
        "{} regex for divisor {}: {} bytes",
        settings.base,
        settings.divisor,
        regex.len()
    );

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let written = if json {
        serde_json::to_writer_pretty(&mut out, &settings.report(regex))
            .map_err(io::Error::from)
            .and_then(|()| writeln!(out))
    } else {
        writeln!(out, "{regex}")
    };
    if let Err(e) = written.and_then(|()| out.flush()) {
        divregex_cli::fatal(&format!("failed to write output: {e}"));
    }
}
