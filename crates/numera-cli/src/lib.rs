// numera-cli: shared utilities for CLI tools.

use std::path::{Path, PathBuf};
use std::process;

use numera_ru::handle::GrammarHandle;
use numera_ru::numbers::NOMINATIVE_FILE;
use numera_ru::CompileOptions;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Environment variable naming the data directory.
pub const DATA_ENV: &str = "NUMERA_DATA_DIR";

/// Environment variable holding the log filter (`warn` if unset).
pub const LOG_ENV: &str = "NUMERA_LOG";

/// Install the stderr log subscriber.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Find a data directory and compile a GrammarHandle from it.
///
/// `configure` runs on the options read from the directory's `numera.toml`
/// so command-line flags can override them.
///
/// Search order:
/// 1. `data_dir` argument (if provided)
/// 2. `NUMERA_DATA_DIR` environment variable
/// 3. `~/.numera/data`
/// 4. `/usr/share/numera/data`
/// 5. `./data` and the current directory
pub fn load_handle(
    data_dir: Option<&str>,
    configure: impl FnOnce(&mut CompileOptions),
) -> Result<GrammarHandle, String> {
    let search_paths = build_search_paths(data_dir);
    let Some(dir) = search_paths.iter().find(|dir| is_data_dir(dir)) else {
        return Err(format!(
            "could not find {} in any of the search paths:\n{}",
            NOMINATIVE_FILE,
            search_paths
                .iter()
                .map(|p| format!("  - {}", p.display()))
                .collect::<Vec<_>>()
                .join("\n")
        ));
    };

    info!(dir = %dir.display(), "using data directory");
    let mut options = CompileOptions::load(dir).map_err(|e| e.to_string())?;
    configure(&mut options);
    GrammarHandle::open_with(dir, options)
        .map_err(|e| format!("failed to compile grammars from {}: {e}", dir.display()))
}

fn is_data_dir(dir: &Path) -> bool {
    dir.join(NOMINATIVE_FILE).is_file()
}

/// Build the list of directories to search for grammar data.
fn build_search_paths(data_dir: Option<&str>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(p) = data_dir {
        paths.push(PathBuf::from(p));
    }

    if let Ok(env_path) = std::env::var(DATA_ENV) {
        paths.push(PathBuf::from(env_path));
    }

    if let Some(home) = home_dir() {
        paths.push(home.join(".numera").join("data"));
    }

    paths.push(PathBuf::from("/usr/share/numera/data"));

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join("data"));
        paths.push(cwd);
    }

    paths
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

/// Remove `--long=VALUE`, `--long VALUE` or `-s VALUE` from `args`.
///
/// Returns `(value, remaining_args)`. The last occurrence wins.
pub fn parse_option(args: &[String], long: &str, short: &str) -> (Option<String>, Vec<String>) {
    let prefix = format!("{long}=");
    let mut value = None;
    let mut remaining = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if let Some(val) = arg.strip_prefix(&prefix) {
            value = Some(val.to_string());
        } else if arg == long || arg == short {
            match iter.next() {
                Some(val) => value = Some(val.clone()),
                None => fatal(&format!("{arg} requires a value")),
            }
        } else {
            remaining.push(arg.clone());
        }
    }

    (value, remaining)
}

/// Parse a `--data-dir=PATH` or `-d PATH` argument.
pub fn parse_data_path(args: &[String]) -> (Option<String>, Vec<String>) {
    parse_option(args, "--data-dir", "-d")
}

/// Remove a boolean flag; returns whether it was present.
pub fn take_flag(args: &mut Vec<String>, name: &str) -> bool {
    let before = args.len();
    args.retain(|a| a != name);
    args.len() != before
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
    fn data_path_forms() {
        let (dir, rest) = parse_data_path(&args(&["-d", "/tmp/data", "230"]));
        assert_eq!(dir.as_deref(), Some("/tmp/data"));
        assert_eq!(rest, args(&["230"]));

        let (dir, rest) = parse_data_path(&args(&["--data-dir=/srv/numera", "--all"]));
        assert_eq!(dir.as_deref(), Some("/srv/numera"));
        assert_eq!(rest, args(&["--all"]));

        let (dir, rest) = parse_data_path(&args(&["8-913-985-56-78"]));
        assert_eq!(dir, None);
        assert_eq!(rest, args(&["8-913-985-56-78"]));
    }

    #[test]
    fn last_option_wins() {
        let (class, rest) = parse_option(
            &args(&["--class", "cardinal", "5", "--class=ordinal"]),
            "--class",
            "-c",
        );
        assert_eq!(class.as_deref(), Some("ordinal"));
        assert_eq!(rest, args(&["5"]));
    }

    #[test]
    fn flags() {
        let mut list = args(&["--all", "5", "--all"]);
        assert!(take_flag(&mut list, "--all"));
        assert_eq!(list, args(&["5"]));
        assert!(!take_flag(&mut list, "--all"));
        assert!(wants_help(&args(&["x", "-h"])));
        assert!(!wants_help(&args(&["x"])));
    }

    #[test]
    fn explicit_dir_is_searched_first() {
        let paths = build_search_paths(Some("/opt/numera"));
        assert_eq!(paths[0], PathBuf::from("/opt/numera"));
    }

    #[test]
    fn missing_data_is_reported() {
        let err = match load_handle(Some("/nonexistent/numera"), |_| {}) {
            Ok(_) => return,
            Err(e) => e,
        };
        assert!(err.contains("/nonexistent/numera"));
    }
}
