//! Command-line surface: a single flat `clap` derive struct, mirroring
//! y-lang's `src/bin/yfmt.rs::YFmtArgs` shape rather than the
//! subcommand-based `why/cli.rs::Cli` — this compiler is one command,
//! not a multi-binary split.

use std::path::{Path, PathBuf};

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "argonc", author, version, about = "Source-to-source compiler for the Argon language.")]
pub struct Cli {
    /// Source file to compile.
    #[arg(index = 1)]
    pub input: PathBuf,

    /// Output path [default: out.<ext>]
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Also emit a best-effort DOT graph of the AST.
    #[arg(short = 'd', long = "dot")]
    pub dot: Option<PathBuf>,

    /// Verbose progress (sets log level to Debug).
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Compilation options built directly from parsed CLI arguments, passed
/// by value through the pipeline rather than read back out of `Cli`/a
/// global.
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    pub dot: Option<PathBuf>,
    pub log_level: log::Level,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        let output = cli.output.unwrap_or_else(|| default_output_path(&cli.input));
        let log_level = if cli.verbose { log::Level::Debug } else { log::Level::Info };
        Config { input: cli.input, output, dot: cli.dot, log_level }
    }
}

/// `out.<ext>`, where `<ext>` is the input file's own extension (falling
/// back to `out` with no extension for an extensionless input), matching
/// the `[default: out.<ext>]` CLI help text.
fn default_output_path(input: &Path) -> PathBuf {
    match input.extension().and_then(|e| e.to_str()) {
        Some(ext) => PathBuf::from(format!("out.{ext}")),
        None => PathBuf::from("out"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_path_keeps_the_input_extension() {
        assert_eq!(default_output_path(Path::new("main.argon")), PathBuf::from("out.argon"));
    }

    #[test]
    fn default_output_path_falls_back_without_an_extension() {
        assert_eq!(default_output_path(Path::new("main")), PathBuf::from("out"));
    }

    #[test]
    fn verbose_flag_selects_debug_level() {
        let cli = Cli { input: PathBuf::from("a.argon"), output: None, dot: None, verbose: true };
        let config: Config = cli.into();
        assert_eq!(config.log_level, log::Level::Debug);
    }

    #[test]
    fn explicit_output_path_overrides_the_default() {
        let cli = Cli {
            input: PathBuf::from("a.argon"),
            output: Some(PathBuf::from("build/a.cpp")),
            dot: None,
            verbose: false,
        };
        let config: Config = cli.into();
        assert_eq!(config.output, PathBuf::from("build/a.cpp"));
        assert_eq!(config.log_level, log::Level::Info);
    }
}
