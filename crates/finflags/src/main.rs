//! `finflags` - CLI for the Financial Analysis Model
//!
//! This binary plays the part of the browser: it holds the upload page,
//! submits files to the analysis endpoint and prints the rendered views.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::Path;

use clap::Parser;
use tokio::io::BufReader;

use finflags::cli::{
    interactive, Cli, Command, ConfigCommand, EvaluateCommand, OutputFormat, RenderCommand,
};
use finflags::{
    init_logging, view, AnalysisResult, Config, Error, HttpUploader, SelectedFile, Session,
    SubmitOutcome,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::Upload(cmd) => {
            let file = SelectedFile::from_path(&cmd.file).await?;
            let surface = cmd.show_errors || config.display.surface_errors;
            handle_submit(&config, Some(file), cmd.format, surface).await?;
        }
        Command::Submit(cmd) => {
            let surface = cmd.show_errors || config.display.surface_errors;
            handle_submit(&config, None, cmd.format, surface).await?;
        }
        Command::Session(cmd) => {
            let surface = cmd.show_errors || config.display.surface_errors;
            let session = Session::new(HttpUploader::new(&config)?);
            let stdin = BufReader::new(tokio::io::stdin());
            interactive::run(&session, stdin, tokio::io::stdout(), surface).await?;
        }
        Command::Render(cmd) => handle_render(&cmd).await?,
        Command::Evaluate(cmd) => handle_evaluate(&cmd).await?,
        Command::Config(cmd) => handle_config(&config, cmd)?,
    }
    Ok(())
}

async fn handle_submit(
    config: &Config,
    file: Option<SelectedFile>,
    format: OutputFormat,
    surface_errors: bool,
) -> Result<(), Error> {
    let session = Session::new(HttpUploader::new(config)?);
    session.select_file(file);

    match session.submit().await {
        SubmitOutcome::Succeeded(result) if format == OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(result.raw())?);
        }
        SubmitOutcome::Failed(error) if surface_errors => return Err(error),
        SubmitOutcome::Failed(_) if format == OutputFormat::Json => {}
        _ => {
            let snapshot = session.snapshot();
            print!(
                "{}",
                view::render_page(
                    snapshot.route,
                    snapshot.result.as_ref(),
                    snapshot.selected.as_deref()
                )
            );
        }
    }
    Ok(())
}

async fn read_file(path: &Path) -> Result<Vec<u8>, Error> {
    tokio::fs::read(path)
        .await
        .map_err(|e| Error::read_file(path, e))
}

async fn handle_render(cmd: &RenderCommand) -> Result<(), Error> {
    let body: serde_json::Value = serde_json::from_slice(&read_file(&cmd.file).await?)?;
    let result = AnalysisResult::from_value(body);

    match cmd.format {
        OutputFormat::Plain => print!("{}", view::render_result(&result)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result.flags())?),
    }
    Ok(())
}

async fn handle_evaluate(cmd: &EvaluateCommand) -> Result<(), Error> {
    let report = finflags_rules::evaluate_slice(&read_file(&cmd.file).await?)?;
    let body = serde_json::to_value(report)?;

    match cmd.format {
        OutputFormat::Plain => {
            print!("{}", view::render_result(&AnalysisResult::from_value(body)));
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&body)?),
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Endpoint]");
                println!("  URL:                {}", config.endpoint.url);
                match config.timeout() {
                    Some(timeout) => println!("  Timeout:            {}s", timeout.as_secs()),
                    None => println!("  Timeout:            none"),
                }
                println!();
                println!("[Display]");
                println!("  Surface errors:     {}", config.display.surface_errors);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
