// numera-normalize: Apply a Russian normalization grammar to inputs.
//
// Reads inputs from stdin (one per line) unless INPUT arguments are given,
// and prints the best output (or the top K with --all) for each.
//
// Usage:
//   numera-normalize [-d DATA_DIR] [--class CLASS] [--all] [-n K] [--fields] [INPUT...]
//
// Options:
//   -d, --data-dir PATH    Data directory containing numbers/ and electronic/
//   -c, --class CLASS      cardinal, ordinal, telephone or electronic (default: cardinal)
//   --all                  Ranked alternatives instead of a single output
//   -n, --top-k K          Number of alternatives with --all
//   --fields               Print tagged fields as name=value lines
//   -h, --help             Print help

use std::io::{self, BufRead, Write};

use numera_core::token::parse_tagged;
use numera_ru::handle::{GrammarClass, GrammarHandle};

fn main() {
    numera_cli::init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (data_dir, args) = numera_cli::parse_data_path(&args);
    let (class, args) = numera_cli::parse_option(&args, "--class", "-c");
    let (top_k, mut args) = numera_cli::parse_option(&args, "--top-k", "-n");
    let all = numera_cli::take_flag(&mut args, "--all");
    let fields = numera_cli::take_flag(&mut args, "--fields");

    if numera_cli::wants_help(&args) {
        println!("numera-normalize: Russian numeral, telephone and electronic normalization.");
        println!();
        println!(
            "Usage: numera-normalize [-d DATA_DIR] [--class CLASS] [--all] [-n K] [--fields] [INPUT...]"
        );
        println!();
        println!("If INPUT arguments are given, normalizes each input.");
        println!("Otherwise reads inputs from stdin (one per line).");
        println!();
        println!("Options:");
        println!("  -d, --data-dir PATH    Data directory containing numbers/ and electronic/");
        println!("  -c, --class CLASS      cardinal, ordinal, telephone or electronic");
        println!("  --all                  Print ranked alternatives with their weights");
        println!("  -n, --top-k K          Number of alternatives with --all");
        println!("  --fields               Print tagged fields as name=value lines");
        println!("  -h, --help             Print this help");
        return;
    }

    let class: GrammarClass = match class {
        Some(name) => name.parse().unwrap_or_else(|e: String| numera_cli::fatal(&e)),
        None => GrammarClass::Cardinal,
    };
    let top_k: Option<usize> = top_k.map(|k| {
        k.parse()
            .unwrap_or_else(|_| numera_cli::fatal(&format!("invalid top-k value: {k}")))
    });

    let inputs: Vec<String> = args.iter().filter(|a| !a.starts_with("--")).cloned().collect();

    let handle = numera_cli::load_handle(data_dir.as_deref(), |options| {
        if all {
            options.deterministic = false;
        }
        if let Some(k) = top_k {
            options.top_k = k;
        }
    })
    .unwrap_or_else(|e| numera_cli::fatal(&e));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let normalize = |input: &str, handle: &GrammarHandle, out: &mut io::BufWriter<io::StdoutLock<'_>>| {
        let results = match handle.apply(class, input) {
            Ok(r) => r,
            Err(e) => {
                let _ = writeln!(out, "{input}: (error: {e})");
                return;
            }
        };
        if results.is_empty() {
            let _ = writeln!(out, "{input}: (no output)");
            return;
        }
        if !all {
            print_output(out, input, &results[0].0, fields);
            return;
        }
        let _ = writeln!(out, "{input}:");
        for (output, weight) in &results {
            let _ = writeln!(out, "  {weight:.3}\t{output}");
        }
    };

    if inputs.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("error reading stdin: {e}");
                    break;
                }
            };
            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            normalize(input, &handle, &mut out);
        }
    } else {
        for input in &inputs {
            normalize(input, &handle, &mut out);
        }
    }
}

fn print_output(out: &mut impl Write, input: &str, output: &str, fields: bool) {
    if !fields {
        let _ = writeln!(out, "{input}\t{output}");
        return;
    }
    match parse_tagged(output) {
        Ok(token) => {
            let _ = writeln!(out, "{input}: {}", token.class);
            for field in &token.fields {
                let _ = writeln!(out, "  {}={}", field.name, field.value);
            }
        }
        Err(_) => {
            let _ = writeln!(out, "{input}\t{output}");
        }
    }
}
