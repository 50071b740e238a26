// divregex-check: Test numerals from stdin against a divisibility regex.
//
// Synthesizes the regex for DIVISOR, then reads numerals from stdin (one per
// line) and reports whether the regex accepts each:
//   A: numeral    (accepted)
//   R: numeral    (rejected)
//
// With --verify, each result is compared against integer arithmetic and
// disagreements are reported as
//   X: numeral
// in which case the tool exits with status 1.
//
// Usage:
//   divregex-check [OPTIONS] DIVISOR

use std::io::{self, BufRead, Write};

use regex::RegexBuilder;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if divregex_cli::wants_help(&args) {
        println!("divregex-check: Test numerals from stdin against a divisibility regex.");
        println!();
        println!("Usage: divregex-check [OPTIONS] DIVISOR");
        println!();
        println!("Reads numerals from stdin (one per line). Prints:");
        println!("  A: numeral    (accepted)");
        println!("  R: numeral    (rejected)");
        println!("  X: numeral    (regex disagrees with arithmetic, --verify only)");
        println!();
        println!("Options:");
        println!("  -b, --base NAME      binary|decimal|hexadecimal (default: decimal)");
        println!("  -o, --order ORDER    ascending|descending|i,j,k");
        println!("  --sink               Add a sink state for non-digit characters");
        println!("  --verify             Compare each result against value % DIVISOR");
        println!("  -h, --help           Print this help");
        return;
    }

    divregex_cli::init_logging();

    let settings = divregex_cli::parse_settings(&args).unwrap_or_else(|e| divregex_cli::fatal(&e));
    let mut verify = false;
    for arg in &settings.rest {
        match arg.as_str() {
            "--verify" => verify = true,
            other => divregex_cli::fatal(&format!("unexpected argument: {other}")),
        }
    }

    let pattern = settings
        .synthesize()
        .unwrap_or_else(|e| divregex_cli::fatal(&e.to_string()));
    // Generated expressions are large and deeply nested.
    let regex = RegexBuilder::new(&pattern)
        .size_limit(1 << 30)
        .dfa_size_limit(1 << 30)
        .nest_limit(10_000)
        .build()
        .unwrap_or_else(|e| divregex_cli::fatal(&format!("failed to compile regex: {e}")));

    let divisor = u128::from(settings.divisor);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut mismatches = 0usize;

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("error reading stdin: {e}");
                break;
            }
        };
        let numeral = line.trim();
        if numeral.is_empty() {
            continue;
        }

        let accepted = regex.is_match(numeral);
        if verify {
            let expected = settings
                .base
                .parse(numeral)
                .is_some_and(|value| value % divisor == 0);
            if accepted != expected {
                mismatches += 1;
                let _ = writeln!(out, "X: {numeral}");
                continue;
            }
        }
        let tag = if accepted { 'A' } else { 'R' };
        let _ = writeln!(out, "{tag}: {numeral}");
    }

    let _ = out.flush();
    if mismatches > 0 {
        log::warn!("{mismatches} numerals disagree with arithmetic");
        drop(out);
        std::process::exit(1);
    }
}
