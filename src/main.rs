use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rmcp::{ServiceExt, transport::stdio};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use portfolio_forge::{
    GeneratorConfig, PortfolioForgeServer, ProjectGenerator, fetch::fetch_job_description,
    mcp::server::render_summary,
};

/// Portfolio-Forge: generate MCP project specs from job descriptions
#[derive(Parser, Debug)]
#[command(name = "portfolio-forge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a project spec from a job description
    #[command(name = "generate")]
    Generate {
        #[command(flatten)]
        args: GenerateArgs,
    },

    /// Run the MCP server over stdio
    #[command(name = "serve")]
    Serve {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Job description text
    #[arg(short, long, conflicts_with_all = ["file", "url"])]
    job_description: Option<String>,

    /// Read the job description from a file
    #[arg(short, long, conflicts_with = "url")]
    file: Option<PathBuf>,

    /// Fetch the job description from a public URL
    #[arg(short, long)]
    url: Option<String>,

    /// Preferred project name (otherwise inferred from the generated spec)
    #[arg(short, long)]
    name: Option<String>,

    /// Output root directory for generated specs
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip writing the spec to disk
    #[arg(long)]
    no_save: bool,

    /// Print the full generation record as JSON instead of the summary
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Serve { config }) => handle_serve_command(config).await,
        Some(Command::Generate { args }) => handle_generate_command(args).await,
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            eprintln!("Example: portfolio-forge generate --job-description \"Backend engineer, Python/K8s\"");
            std::process::exit(1);
        }
    }
}

async fn handle_serve_command(config_path: Option<PathBuf>) -> Result<()> {
    // stdout carries the MCP protocol, so logs go to stderr
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let server = match config_path {
        Some(path) => {
            let config = GeneratorConfig::load_with_env(Some(&path))
                .context(format!("Failed to load config from {path:?}"))?;
            PortfolioForgeServer::with_config(config)
        }
        None => PortfolioForgeServer::new(),
    };

    info!("Starting portfolio-forge MCP server on stdio");
    let service = server
        .serve(stdio())
        .await
        .context("Failed to start MCP server")?;
    service.waiting().await?;
    Ok(())
}

/// Resolve the job description from --job-description, --file, or --url
async fn resolve_job_description(args: &GenerateArgs, config: &GeneratorConfig) -> Result<String> {
    if let Some(text) = &args.job_description {
        return Ok(text.clone());
    }

    if let Some(path) = &args.file {
        let content =
            std::fs::read_to_string(path).context(format!("Failed to read: {path:?}"))?;
        return Ok(content.trim().to_string());
    }

    if let Some(url) = &args.url {
        let timeout = Duration::from_secs(config.fetch.timeout_secs);
        let text = fetch_job_description(url, timeout)
            .await
            .context("Failed to fetch job description from URL")?;
        anyhow::ensure!(
            !text.is_empty(),
            "Fetched page appears to be empty or could not be parsed into text."
        );
        return Ok(text);
    }

    anyhow::bail!("One of --job-description, --file, or --url is required")
}

async fn handle_generate_command(args: GenerateArgs) -> Result<()> {
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let mut config = GeneratorConfig::load_with_env(args.config.as_ref())?;
    if let Some(output) = &args.output {
        config.output.root = output.clone();
    }

    let job_description = resolve_job_description(&args, &config).await?;
    info!(
        "Generating project spec ({} chars of input)",
        job_description.chars().count()
    );

    let generator = ProjectGenerator::from_config(&config);
    let record = generator
        .generate(&job_description, args.name.as_deref(), !args.no_save)
        .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!("{}", render_summary(&record));
    }
    Ok(())
}
