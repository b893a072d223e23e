//! Command-line front end: scan one file and print the licenses found in
//! it, one per line, with the percentage of the text each match covers.
//! Finding no licenses is not an error.

use std::fs;
use std::process::ExitCode;

use lichen::report;

const USAGE: &str = "usage: lichen [-v] [--json] <file>";

struct Args {
    verbose: bool,
    json: bool,
    path: Option<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        verbose: false,
        json: false,
        path: None,
    };
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "-v" | "--verbose" => args.verbose = true,
            "--json" => args.json = true,
            "-h" | "--help" => return Err(String::new()),
            _ if arg.starts_with('-') => return Err(format!("unknown flag: {arg}")),
            _ => {
                if args.path.replace(arg).is_some() {
                    return Err("expected exactly one file".to_string());
                }
            }
        }
    }
    if args.path.is_none() {
        return Err("expected exactly one file".to_string());
    }
    Ok(args)
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            if !msg.is_empty() {
                eprintln!("lichen: {msg}");
            }
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    let path = args.path.unwrap();
    let contents = match fs::read(&path) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("lichen: {path}: {e}");
            return ExitCode::from(1);
        }
    };

    let cov = lichen::scan(&contents);
    let rendered = if args.json {
        match report::render_json(&cov) {
            Ok(json) => json + "\n",
            Err(e) => {
                eprintln!("lichen: {e}");
                return ExitCode::from(1);
            }
        }
    } else if args.verbose {
        report::render_verbose(&cov)
    } else {
        report::render_lines(&cov)
    };
    print!("{rendered}");
    ExitCode::SUCCESS
}
