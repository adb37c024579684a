//! Command-line argument parsing.

use std::env;
use std::path::PathBuf;

/// What the binary should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List local turbines and panels.
    List,
    /// Resolve a turbine and print it.
    Turbine {
        spec: String,
        smooth: bool,
        curve_out: Option<PathBuf>,
    },
    /// Resolve a catalog query and store the turbine locally.
    Download { query: String },
    /// Resolve a local panel and print its capacity.
    Panel { name: String },
}

#[derive(Debug)]
pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub command: Command,
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(args)
}

pub fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut config = None;
    let mut command: Option<String> = None;
    let mut positional = None;
    let mut smooth = false;
    let mut curve_out = None;

    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --config (expected a TOML file path)")?;
                if config.replace(PathBuf::from(path)).is_some() {
                    return Err("--config provided more than once".to_string());
                }
            }
            "--smooth" => smooth = true,
            "--curve-out" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --curve-out (expected a file path)")?;
                if curve_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--curve-out provided more than once".to_string());
                }
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            flag if flag.starts_with("--") => return Err(format!("unknown argument: {flag}")),
            value => {
                if command.is_none() {
                    command = Some(value.to_string());
                } else if positional.replace(value.to_string()).is_some() {
                    return Err(format!("unexpected argument: {value}"));
                }
            }
        }
        i += 1;
    }

    let command = match (command.as_deref(), positional) {
        (None, _) => return Err("missing command (expected list, turbine, download or panel)".to_string()),
        (Some("list"), None) => Command::List,
        (Some("turbine"), Some(spec)) => Command::Turbine {
            spec,
            smooth,
            curve_out: curve_out.take(),
        },
        (Some("download"), Some(query)) => Command::Download { query },
        (Some("panel"), Some(name)) => Command::Panel { name },
        (Some(cmd @ ("turbine" | "download" | "panel")), None) => {
            return Err(format!("command `{cmd}` needs an argument"));
        }
        (Some("list"), Some(extra)) => return Err(format!("unexpected argument: {extra}")),
        (Some(other), _) => return Err(format!("unknown command: {other}")),
    };

    if (smooth || curve_out.is_some()) && !matches!(command, Command::Turbine { .. }) {
        return Err("--smooth and --curve-out only apply to `turbine`".to_string());
    }

    Ok(CliOptions { config, command })
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("renewable-assets: resolve wind turbine and solar panel models");
    eprintln!();
    eprintln!("Usage: renewable-assets [--config <path>] <command>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  list                                        List local turbines and panels");
    eprintln!("  turbine <spec> [--smooth] [--curve-out <path>]");
    eprintln!("                                              Resolve a turbine (local name or oedb:<query>)");
    eprintln!("  download <query>                            Fetch a catalog turbine and store it locally");
    eprintln!("  panel <name>                                Show a local panel and its rated capacity");
    eprintln!();
    eprintln!("Set RUST_LOG to control log output (default: renewable_assets=info).");
}
