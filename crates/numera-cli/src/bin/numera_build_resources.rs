// numera-build-resources: Write the reference arithmetic resources.
//
// Builds the factorization, restricted arithmetic, acceptor and leaf
// transducers for 0..999 and writes util_arithmetic.far and g.fst.
//
// Usage:
//   numera-build-resources [-d OUT_DIR]
//
// Options:
//   -d, --data-dir PATH    Output directory (default: current directory)
//   -h, --help             Print help

use std::path::PathBuf;

use numera_ru::Resources;
use numera_ru::resources::{ACCEPTOR_FILE, ARITHMETIC_ARCHIVE};

fn main() {
    numera_cli::init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (out_dir, args) = numera_cli::parse_data_path(&args);

    if numera_cli::wants_help(&args) {
        println!("numera-build-resources: Write the reference arithmetic resources.");
        println!();
        println!("Usage: numera-build-resources [-d OUT_DIR]");
        println!();
        println!("Writes {ARITHMETIC_ARCHIVE} and {ACCEPTOR_FILE} into OUT_DIR.");
        println!();
        println!("Options:");
        println!("  -d, --data-dir PATH    Output directory (default: current directory)");
        println!("  -h, --help             Print this help");
        return;
    }
    if let Some(extra) = args.first() {
        numera_cli::fatal(&format!("unexpected argument: {extra}"));
    }

    let out_dir = out_dir.map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

    let resources =
        Resources::reference().unwrap_or_else(|e| numera_cli::fatal(&e.to_string()));
    resources
        .write(&out_dir)
        .unwrap_or_else(|e| numera_cli::fatal(&e.to_string()));

    println!(
        "wrote {} and {} to {}",
        ARITHMETIC_ARCHIVE,
        ACCEPTOR_FILE,
        out_dir.display()
    );
}
