// divregex-cli: shared utilities for CLI tools.

use std::process;

use serde::Serialize;

use divregex_automaton::{
    Automaton, Base, DivisibilityError, EliminationOrder, REMAINDER_ZERO, SynthesisOptions,
    build_automaton, build_automaton_with_sink, empty_input_state, synthesize_regex_with,
};

/// Environment variable holding the default base name.
pub const BASE_ENV: &str = "DIVREGEX_BASE";

/// Environment variable holding the default elimination order.
pub const ORDER_ENV: &str = "DIVREGEX_ORDER";

/// Environment variable holding the `env_logger` filter.
pub const LOG_ENV: &str = "DIVREGEX_LOG";

/// Settings shared by the CLI tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base: Base,
    pub divisor: u32,
    pub order: EliminationOrder,
    /// Add a sink state for non-digit characters.
    pub sink: bool,
    /// Arguments not consumed as options (flags such as `--json`).
    pub rest: Vec<String>,
}

impl Settings {
    /// Build the automaton these settings describe, started at its empty-input state.
    pub fn automaton(&self) -> Result<Automaton, DivisibilityError> {
        let mut dfa = if self.sink {
            build_automaton_with_sink(self.base, self.divisor)?
        } else {
            build_automaton(self.base, self.divisor)?
        };
        dfa.set_start(empty_input_state(self.divisor))?;
        Ok(dfa)
    }

    /// Build, eliminate and render.
    pub fn synthesize(&self) -> Result<String, DivisibilityError> {
        let options = SynthesisOptions {
            order: self.order.clone(),
        };
        synthesize_regex_with(&self.automaton()?, REMAINDER_ZERO, &options)
    }

    /// A JSON-serializable report of a synthesized regex.
    pub fn report(&self, regex: String) -> Report {
        Report {
            base: self.base,
            divisor: self.divisor,
            sink: self.sink,
            length: regex.len(),
            regex,
        }
    }
}

/// Output of `divregex --json`.
#[derive(Debug, Serialize)]
pub struct Report {
    pub base: Base,
    pub divisor: u32,
    pub sink: bool,
    pub length: usize,
    pub regex: String,
}

/// Parse an elimination order: `ascending`, `descending`, or a comma-separated
/// list of state indices.
pub fn parse_order(s: &str) -> Result<EliminationOrder, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "asc" | "ascending" => Ok(EliminationOrder::Ascending),
        "desc" | "descending" => Ok(EliminationOrder::Descending),
        list => list
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<usize>()
                    .map_err(|_| format!("invalid elimination order: {s:?}"))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(EliminationOrder::Explicit),
    }
}

/// Parse the divisor argument. Must be a positive integer.
pub fn parse_divisor(s: &str) -> Result<u32, String> {
    match s.trim().parse::<u32>() {
        Ok(0) | Err(_) => Err(format!("invalid divisor: {s:?} (expected a positive integer)")),
        Ok(d) => Ok(d),
    }
}

/// Parse `-b/--base`, `-o/--order`, `--sink` and the positional divisor.
///
/// Missing base and order fall back to [`BASE_ENV`] and [`ORDER_ENV`], then to
/// decimal and ascending. Unrecognized arguments are returned in
/// [`Settings::rest`].
pub fn parse_settings(args: &[String]) -> Result<Settings, String> {
    let mut base = None;
    let mut order = None;
    let mut divisor = None;
    let mut sink = false;
    let mut rest = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-b" | "--base" => base = Some(option_value(arg, iter.next())?),
            "-o" | "--order" => order = Some(option_value(arg, iter.next())?),
            "--sink" => sink = true,
            _ => {
                if let Some(val) = arg.strip_prefix("--base=") {
                    base = Some(val.to_string());
                } else if let Some(val) = arg.strip_prefix("--order=") {
                    order = Some(val.to_string());
                } else if !arg.starts_with('-') && divisor.is_none() {
                    divisor = Some(parse_divisor(arg)?);
                } else {
                    rest.push(arg.clone());
                }
            }
        }
    }

    let base = match base.or_else(|| std::env::var(BASE_ENV).ok()) {
        Some(name) => name.parse::<Base>().map_err(|e| e.to_string())?,
        None => Base::Decimal,
    };
    let order = match order.or_else(|| std::env::var(ORDER_ENV).ok()) {
        Some(value) => parse_order(&value)?,
        None => EliminationOrder::Ascending,
    };
    let divisor = divisor.ok_or_else(|| "missing divisor".to_string())?;

    Ok(Settings {
        base,
        divisor,
        order,
        sink,
        rest,
    })
}

fn option_value(option: &str, value: Option<&String>) -> Result<String, String> {
    value
        .cloned()
        .ok_or_else(|| format!("{option} requires a value"))
}

/// Initialize `env_logger` from [`LOG_ENV`], defaulting to warnings only.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or(LOG_ENV, "warn"))
        .format_timestamp(None)
        .init();
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_full_settings() {
        let s = parse_settings(&args(&["-b", "hex", "--order=desc", "--sink", "5", "--json"]))
            .unwrap();
        assert_eq!(s.base, Base::Hexadecimal);
        assert_eq!(s.divisor, 5);
        assert_eq!(s.order, EliminationOrder::Descending);
        assert!(s.sink);
        assert_eq!(s.rest, ["--json"]);
    }

    #[test]
    fn explicit_flags_override_defaults() {
        let s = parse_settings(&args(&["--base", "b", "-o", "2,1", "3"])).unwrap();
        assert_eq!(s.base, Base::Binary);
        assert_eq!(s.order, EliminationOrder::Explicit(vec![2, 1]));
        assert!(!s.sink);
    }

    #[test]
    fn missing_divisor() {
        assert!(parse_settings(&args(&["-b", "d"])).is_err());
        assert!(parse_settings(&args(&["--base"])).is_err());
    }

    #[test]
    fn invalid_values() {
        assert!(parse_settings(&args(&["-b", "octal", "3"])).is_err());
        assert!(parse_settings(&args(&["--base=d", "0"])).is_err());
        assert!(parse_settings(&args(&["--base=d", "-o", "sideways", "3"])).is_err());
    }

    #[test]
    fn divisor_parsing() {
        assert_eq!(parse_divisor("7"), Ok(7));
        assert!(parse_divisor("0").is_err());
        assert!(parse_divisor("-1").is_err());
        assert!(parse_divisor("x").is_err());
    }

    #[test]
    fn order_parsing() {
        assert_eq!(parse_order("ascending"), Ok(EliminationOrder::Ascending));
        assert_eq!(parse_order("DESC"), Ok(EliminationOrder::Descending));
        assert_eq!(parse_order("3, 1,2"), Ok(EliminationOrder::Explicit(vec![3, 1, 2])));
        assert!(parse_order("1,,2").is_err());
    }

    #[test]
    fn synthesize_and_report() {
        let s = parse_settings(&args(&["--base=binary", "--order=ascending", "2"])).unwrap();
        let regex = s.synthesize().unwrap();
        assert_eq!(regex, "^(0|11*0)(0|11*0)*$");
        let json = serde_json::to_value(s.report(regex)).unwrap();
        assert_eq!(json["base"], "binary");
        assert_eq!(json["divisor"], 2);
        assert_eq!(json["length"], 19);
    }

    #[test]
    fn bad_explicit_order_fails_synthesis() {
        let s = parse_settings(&args(&["--base=d", "--order=1", "3"])).unwrap();
        assert!(matches!(
            s.synthesize(),
            Err(DivisibilityError::InvalidEliminationOrder(_))
        ));
    }
}
