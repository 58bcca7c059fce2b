use clap::{Args, Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use crate::config::Config;
use crate::output::OutputFormat;

/// A CLI tool to generate and render README for a GitHub project
#[derive(Debug, Parser)]
#[command(name = "mdtool", author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to <config dir>/mdtool/config.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Shorthand for --log-level info
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate README for the repo
    Readme(ReadmeArgs),
}

/// Arguments of `mdtool readme`
#[derive(Debug, Args)]
pub struct ReadmeArgs {
    /// Repository name in format 'owner/repo'
    #[arg(short, long)]
    pub repo: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Preview)]
    pub output: OutputFormat,

    /// Save README to README.md in the current directory
    #[arg(short, long)]
    pub save: bool,

    /// Completion model (overrides GROQ_MODEL and the config file)
    #[arg(long)]
    pub model: Option<String>,

    /// GitHub token (overrides GITHUB_TOKEN)
    #[arg(short = 't', long)]
    pub github_token: Option<String>,

    /// Deepest directory level to scan
    #[arg(long, conflicts_with = "shallow")]
    pub max_depth: Option<usize>,

    /// Only scan files in the repository root
    #[arg(long)]
    pub shallow: bool,

    /// Completion request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl Cli {
    /// Effective log level after `--verbose`
    pub fn log_level(&self) -> &str {
        if self.verbose {
            "info"
        } else {
            &self.log_level
        }
    }
}

impl ReadmeArgs {
    /// Applies command-line overrides on top of the loaded configuration
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(model) = &self.model {
            config.default_model = model.clone();
        }
        if let Some(token) = &self.github_token {
            config.github_token = Some(token.clone());
        }
        if self.shallow {
            config.processing.max_depth = 0;
        } else if let Some(depth) = self.max_depth {
            config.processing.max_depth = depth;
        }
        if let Some(timeout) = self.timeout {
            config.completion.timeout_secs = timeout;
        }
    }
}

/// Exit status for an argument-parsing outcome.
///
/// Help and version output exit 0; every real parse error exits 1 like any
/// other failure.
pub fn usage_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}

/// Prints a success message in green
pub fn print_success(message: &str) {
    println!("{}", message.green());
}

/// Prints a warning message in yellow on stderr
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "WARNING:".yellow().bold(), message.yellow());
}

/// Prints an error message in red on stderr
pub fn print_error(message: &str) {
    eprintln!("{} {}", "ERROR:".red().bold(), message.red());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_readme_defaults() {
        let cli = Cli::try_parse_from(["mdtool", "readme", "-r", "octocat/Hello-World"]).unwrap();
        let Commands::Readme(args) = cli.command;
        assert_eq!(args.repo, "octocat/Hello-World");
        assert_eq!(args.output, OutputFormat::Preview);
        assert!(!args.save);
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn test_short_flags_and_overrides() {
        let cli = Cli::try_parse_from([
            "mdtool", "-v", "readme", "-r", "octocat/Hello-World", "-o", "raw", "-s", "--shallow",
            "--model", "llama-3.1-8b-instant", "--timeout", "5",
        ])
        .unwrap();
        assert_eq!(cli.log_level(), "info");

        let Commands::Readme(args) = cli.command;
        assert_eq!(args.output, OutputFormat::Raw);
        assert!(args.save);

        let mut config = Config::default();
        args.apply_to(&mut config);
        assert_eq!(config.processing.max_depth, 0);
        assert_eq!(config.default_model, "llama-3.1-8b-instant");
        assert_eq!(config.completion.timeout_secs, 5);
    }

    #[test]
    fn test_repo_is_required_and_format_is_checked() {
        let missing = Cli::try_parse_from(["mdtool", "readme"]).unwrap_err();
        assert_eq!(usage_exit_code(&missing), 1);

        let bad_format =
            Cli::try_parse_from(["mdtool", "readme", "-r", "a/b", "-o", "html"]).unwrap_err();
        assert_eq!(usage_exit_code(&bad_format), 1);
    }

    #[test]
    fn test_help_and_version_exit_cleanly() {
        let help = Cli::try_parse_from(["mdtool", "--help"]).unwrap_err();
        assert_eq!(usage_exit_code(&help), 0);

        let version = Cli::try_parse_from(["mdtool", "--version"]).unwrap_err();
        assert_eq!(usage_exit_code(&version), 0);
    }
}
