//! Stylesparser - editor styles from stylesheet rules
//!
//! Usage: stylesparser <COMMAND> <FILE>

use std::env;
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

use stylesparser_plugin::{editor_config, summary, PluginSettings, SelectorSet};
use stylesparser_styles::{
    compile_styles_set, diagnose, validate_styles, StylesError, UniquenessPolicy,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        return ExitCode::FAILURE;
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    let result = match command {
        "--help" | "-h" => {
            print_usage(&args[0]);
            return ExitCode::SUCCESS;
        }
        "--version" | "-V" => {
            println!("Stylesparser {}", VERSION);
            return ExitCode::SUCCESS;
        }
        "compile" => with_file(&args[0], command, rest, run_compile),
        "check" => with_file(&args[0], command, rest, run_check),
        "suggest" => with_file(&args[0], command, rest, run_suggest),
        "config" => with_file(&args[0], command, rest, run_config),
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage(&args[0]);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_usage(program: &str) {
    println!(
        r#"Stylesparser {} - editor styles from stylesheet rules

USAGE:
    {} <COMMAND> <FILE> [OPTIONS]

COMMANDS:
    compile <FILE>            Print the styles set for a rules file
    check <FILE>              Validate a rules file
    suggest <CSS>             Suggest rules from a stylesheet
    config <SETTINGS>         Print the editor config for plugin settings

OPTIONS:
    -h, --help                Print this help message
    -V, --version             Print version information
    --case-insensitive        (check) Treat names differing in case as duplicates
    --valid <ELEMENTS>        (suggest) Comma-separated elements to keep
    --skip <ELEMENTS>         (suggest) Comma-separated elements to drop

Use - as FILE to read from stdin.

EXAMPLES:
    {} compile styles.txt
    {} check styles.txt --case-insensitive
    {} suggest themes/a/style.css --valid p,span --skip body
    {} config settings.json

"#,
        VERSION, program, program, program, program, program
    );
}

fn with_file(
    program: &str,
    command: &str,
    rest: &[String],
    run: fn(&str, &[String]) -> CliResult,
) -> CliResult {
    let Some(path) = rest.first() else {
        return Err(format!("Usage: {} {} <FILE>", program, command).into());
    };
    let input = read_input(path)?;
    log::debug!("Read {} bytes from {}", input.len(), path);
    run(&input, &rest[1..])
}

fn read_input(path: &str) -> io::Result<String> {
    if path == "-" {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        Ok(input)
    } else {
        fs::read_to_string(path)
    }
}

/// Print the styles set JSON for a rules file
fn run_compile(input: &str, _options: &[String]) -> CliResult {
    match compile_styles_set(input) {
        Ok(set) => {
            println!("{}", serde_json::to_string_pretty(&set)?);
            Ok(())
        }
        Err(e) => {
            report_diagnostics(input);
            Err(e.into())
        }
    }
}

/// Validate a rules file without printing the result
fn run_check(input: &str, options: &[String]) -> CliResult {
    let policy = if options.iter().any(|o| o == "--case-insensitive") {
        UniquenessPolicy::CaseInsensitive
    } else {
        UniquenessPolicy::CaseSensitive
    };

    match validate_styles(input, policy) {
        Ok(rules) => {
            println!("OK: {} styles", rules.len());
            Ok(())
        }
        Err(e) => {
            if e == StylesError::Syntax {
                report_diagnostics(input);
            }
            Err(e.into())
        }
    }
}

/// Print suggested rules for a stylesheet
fn run_suggest(input: &str, options: &[String]) -> CliResult {
    let settings = PluginSettings {
        validselectors: option_list(options, "--valid")?,
        skipselectors: option_list(options, "--skip")?,
        ..Default::default()
    };

    let rules = settings.seed_styles(input)?;
    log::info!("Suggested {} rules", rules.lines().count());
    println!("{}", rules);
    Ok(())
}

/// Print the editor config and summary for a settings file
fn run_config(input: &str, _options: &[String]) -> CliResult {
    let blob: serde_json::Value = serde_json::from_str(input)?;
    let settings = if blob.get("plugins").is_some() {
        PluginSettings::from_editor_settings(input)?
    } else {
        PluginSettings::from_json(input)?
    };

    let config = editor_config(&settings)?;
    println!("{}", config.to_json()?);
    eprintln!("{}", summary(&settings));
    Ok(())
}

fn report_diagnostics(input: &str) {
    for diag in diagnose(input) {
        eprintln!("  {}", diag);
    }
}

/// Read a `--flag a,b,c` option into a selector set
fn option_list(options: &[String], flag: &str) -> Result<Option<SelectorSet>, String> {
    let Some(idx) = options.iter().position(|o| o == flag) else {
        return Ok(None);
    };
    let value = options
        .get(idx + 1)
        .ok_or_else(|| format!("{} needs a comma-separated list", flag))?;
    Ok(Some(SelectorSet::new(value.split(','))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_option_list() {
        let options = strings(&["--valid", "p, span", "--skip", "body"]);
        let valid = option_list(&options, "--valid").unwrap().unwrap();
        assert_eq!(valid.elements(), ["p", "span"]);
        let skip = option_list(&options, "--skip").unwrap().unwrap();
        assert_eq!(skip.elements(), ["body"]);
        assert_eq!(option_list(&options, "--other").unwrap(), None);
    }

    #[test]
    fn test_option_list_missing_value() {
        let options = strings(&["--valid"]);
        assert!(option_list(&options, "--valid").is_err());
    }

    #[test]
    fn test_commands_on_input() {
        assert!(run_compile("p|Paragraph", &[]).is_ok());
        assert!(run_compile("p Paragraph", &[]).is_err());
        assert!(run_check("p|Lead\nspan|lead", &[]).is_ok());
        assert!(run_check("p|Lead\nspan|lead", &strings(&["--case-insensitive"])).is_err());
        assert!(run_config(r#"{"plugins": {"stylesheetparser": {"stylesheet": "a.css"}}}"#, &[]).is_ok());
        assert!(run_suggest("p.a { }", &strings(&["--valid", "p"])).is_ok());
    }
}
