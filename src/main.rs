use mdtool::{
    cli::{print_error, print_success, print_warning, usage_exit_code, Cli, Commands, ReadmeArgs},
    error::Result,
    logging,
    output::{self, OutputFormat, README_FILENAME},
    Config, ReadmeGenerator, RepositoryReference,
};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use std::io;
use std::path::Path;
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            process::exit(usage_exit_code(&e));
        }
    };
    logging::init(cli.log_level());

    if let Err(e) = run(cli).await {
        print_error(&e.to_string());
        if e.is_transient() {
            print_warning("This looks temporary, try again later");
        }
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    // the spinner would interleave with log lines
    let quiet_logs = logging::parse_log_level(cli.log_level()) <= LevelFilter::Warn;

    match cli.command {
        Commands::Readme(args) => generate_readme(args, config, quiet_logs).await,
    }
}

async fn generate_readme(args: ReadmeArgs, mut config: Config, show_progress: bool) -> Result<()> {
    args.apply_to(&mut config);
    config.validate()?;

    let repo = RepositoryReference::parse(&args.repo)?;
    let generator = ReadmeGenerator::new(&config)?;

    let pb = create_spinner(show_progress && args.output == OutputFormat::Preview);
    pb.set_message(format!("Scanning repository {}...", repo));

    let result: Result<String> = async {
        let snapshot = generator.fetch(&repo).await?;
        pb.set_message(format!("Generating README from {} files...", snapshot.files.len()));
        generator.generate_from(&snapshot).await
    }
    .await;
    pb.finish_and_clear();

    let content = result?;
    if content.is_empty() {
        print_warning("No README content was generated");
        return Ok(());
    }

    output::display(&mut io::stdout().lock(), &content, args.output)?;

    if args.save {
        output::save_readme(Path::new(README_FILENAME), &content)?;
        print_success(&format!("\n{} saved successfully!", README_FILENAME));
    }

    Ok(())
}

fn create_spinner(visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    let template = "{spinner:.green} [{elapsed_precise}] {msg}";
    if let Ok(style) = ProgressStyle::default_spinner().template(template) {
        pb.set_style(style.tick_strings(&["-", "\\", "|", "/", "-", "\\", "|", "/"]));
    }
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
