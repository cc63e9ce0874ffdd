//! Folio CLI - Jupyter notebook showcase renderer
//!
//! Resolves notebook slugs, loads the documents and writes standalone HTML pages.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use folio_cli::{exit_code, title_from_location, Catalog, Config};
use folio_render::{render_not_found, LogTelemetry, NotebookViewer, Renderer, ViewOutcome};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Verbosity level for output control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Verbosity {
    /// Suppress all output except errors
    Quiet,
    /// Normal output (default)
    Normal,
    /// Verbose output with extra details
    Verbose,
}

impl Verbosity {
    /// Create from CLI flags
    const fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Check if output should be shown (not quiet)
    const fn should_show_output(self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Default log filter when `RUST_LOG` is unset
    const fn log_filter(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "debug",
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "folio",
    about = "Render Jupyter notebooks to standalone HTML pages",
    long_about = "Render published Jupyter notebooks to standalone HTML pages.\n\
                  \n\
                  Notebooks are addressed by slug (see `folio list`) or rendered\n\
                  directly from a URL or path with `folio convert`.",
    version
)]
struct Args {
    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Show detailed processing information
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Render settings that override the configuration file
#[derive(clap::Args, Debug, Default)]
struct RenderArgs {
    /// Prefix for notebook image assets (default: /notebooks/images)
    #[arg(long, value_name = "PREFIX")]
    asset_prefix: Option<String>,

    /// Syntax highlighting theme
    #[arg(long, value_name = "THEME")]
    theme: Option<String>,

    /// Render code cells without syntax highlighting
    #[arg(long)]
    no_highlight: bool,

    /// Request timeout in seconds for remote notebooks
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a published notebook by slug
    #[command(long_about = "Render a published notebook by slug.\n\
                      \n\
                      The page is written to stdout unless -o is given. If the notebook\n\
                      cannot be loaded, an error page is written instead and the exit\n\
                      code is 5. Unknown slugs write a not-found page and exit with 3.\n\
                      \n\
                      Examples:\n\
                        folio render titanic-survival\n\
                        folio render titanic-survival -o titanic.html --force")]
    Render {
        /// Notebook slug
        #[arg(value_name = "SLUG")]
        slug: String,

        /// Output file (default: stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Overwrite the output file if it exists
        #[arg(long)]
        force: bool,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Render a notebook from a URL or path
    #[command(long_about = "Render a notebook from an http(s) URL, file:// URL or path.\n\
                      \n\
                      Examples:\n\
                        folio convert analysis.ipynb\n\
                        folio convert https://host/nb/demo.ipynb -o demo.html --title Demo")]
    Convert {
        /// Notebook URL or path
        #[arg(value_name = "LOCATION")]
        location: String,

        /// Output file (default: stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Page title (default: derived from the file name)
        #[arg(long, value_name = "TITLE")]
        title: Option<String>,

        /// Overwrite the output file if it exists
        #[arg(long)]
        force: bool,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// List published notebooks
    List,

    /// Manage configuration settings
    #[command(long_about = "Manage folio configuration files.\n\
                      \n\
                      Configuration files are loaded in this order (later overrides earlier):\n\
                        1. User config: ~/.folio.toml\n\
                        2. Project config: ./.folio.toml\n\
                        3. Command-line arguments")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Create a new .folio.toml with commented defaults
    Init {
        /// Create in the home directory (~/.folio.toml) instead of the current directory
        #[arg(long)]
        global: bool,

        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Display the effective configuration
    Show,

    /// Show the configuration file paths
    Path,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let verbosity = Verbosity::from_flags(args.quiet, args.verbose);
    init_logging(verbosity);

    let config = Config::discover();

    match args.command {
        Commands::Render {
            slug,
            output,
            force,
            render,
        } => render_command(&config, &slug, output.as_deref(), force, &render, verbosity),
        Commands::Convert {
            location,
            output,
            title,
            force,
            render,
        } => convert_command(
            &config,
            &location,
            output.as_deref(),
            title,
            force,
            &render,
            verbosity,
        ),
        Commands::List => list_command(&config),
        Commands::Config { action } => config_command(action, &config, verbosity),
        Commands::Completions { shell } => completion_command(shell),
    }
}

fn init_logging(verbosity: Verbosity) {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(verbosity.log_filter()),
    )
    .target(env_logger::Target::Stderr)
    .init();
}

/// Viewer configured from the config file with CLI overrides applied
fn build_viewer(config: &Config, render: &RenderArgs) -> NotebookViewer {
    let mut options = config.render_options();
    if let Some(prefix) = &render.asset_prefix {
        options = options.with_asset_prefix(prefix.as_str());
    }
    if let Some(theme) = &render.theme {
        options = options.with_theme(theme.as_str());
    }
    if render.no_highlight {
        options = options.with_highlight(false);
    }

    let mut load_options = config.load_options();
    if let Some(secs) = render.timeout {
        load_options = load_options.with_timeout(Some(Duration::from_secs(secs)));
    }

    NotebookViewer::new(Renderer::new(options))
        .with_load_options(load_options)
        .with_telemetry(Arc::new(LogTelemetry))
}

fn render_command(
    config: &Config,
    slug: &str,
    output: Option<&Path>,
    force: bool,
    render: &RenderArgs,
    verbosity: Verbosity,
) -> Result<()> {
    check_output_path(output, force);

    let catalog = catalog_from_config(config);
    let entry = match catalog.resolve(slug) {
        Ok(entry) => entry,
        Err(e) => {
            write_page(&render_not_found(slug), output)?;
            eprintln!("{} {e}", "Error:".red().bold());
            eprintln!(
                "{} Run `folio list` to see published notebooks",
                "Hint:".cyan().bold()
            );
            std::process::exit(exit_code::NOT_FOUND);
        }
    };

    let location = entry.location(config.document_root());
    log::debug!("Resolved '{slug}' to {location}");
    let outcome = build_viewer(config, render).view(&entry.title, &location);
    finish_view(&outcome, output, verbosity)
}

fn convert_command(
    config: &Config,
    location: &str,
    output: Option<&Path>,
    title: Option<String>,
    force: bool,
    render: &RenderArgs,
    verbosity: Verbosity,
) -> Result<()> {
    check_output_path(output, force);

    let title = title.unwrap_or_else(|| title_from_location(location));
    let outcome = build_viewer(config, render).view(&title, location);
    finish_view(&outcome, output, verbosity)
}

/// Write the page for a view, exiting with the load-error code on failure
fn finish_view(outcome: &ViewOutcome, output: Option<&Path>, verbosity: Verbosity) -> Result<()> {
    write_page(outcome.html(), output)?;

    match outcome {
        ViewOutcome::Rendered { notebook, .. } => {
            if verbosity.should_show_output() {
                if let Some(path) = output {
                    eprintln!(
                        "{} Rendered {} blocks to {}",
                        "Success:".green().bold(),
                        notebook.blocks.len(),
                        path.display()
                    );
                }
            }
            Ok(())
        }
        ViewOutcome::Failed { error, .. } => {
            eprintln!("{} Failed to load notebook: {error}", "Error:".red().bold());
            std::process::exit(exit_code::LOAD_ERROR);
        }
    }
}

fn check_output_path(output: Option<&Path>, force: bool) {
    if let Some(path) = output {
        if path.exists() && !force {
            eprintln!(
                "{} Output file already exists: {}",
                "Error:".red().bold(),
                path.display()
            );
            eprintln!("{} Use --force to overwrite", "Hint:".cyan().bold());
            std::process::exit(exit_code::GENERAL_ERROR);
        }
    }
}

fn write_page(html: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => fs::write(path, html)
            .with_context(|| format!("Failed to write output file: {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(html.as_bytes())
                .context("Failed to write to stdout")?;
            stdout.flush().context("Failed to flush stdout")
        }
    }
}

fn catalog_from_config(config: &Config) -> Catalog {
    match &config.notebooks {
        Some(notebooks) => Catalog::builtin().with_overrides(notebooks),
        None => Catalog::builtin(),
    }
}

#[allow(
    clippy::unnecessary_wraps,
    reason = "consistent return type for CLI commands"
)]
fn list_command(config: &Config) -> Result<()> {
    let catalog = catalog_from_config(config);
    let document_root = config.document_root();
    let width = catalog.entries().map(|e| e.slug.len()).max().unwrap_or(0);

    for entry in catalog.entries() {
        println!(
            "{}  {}",
            format!("{:<width$}", entry.slug).cyan().bold(),
            entry.title
        );
        println!(
            "{}  {}",
            " ".repeat(width),
            entry.location(document_root).bright_black()
        );
    }
    Ok(())
}

fn config_command(action: ConfigAction, config: &Config, verbosity: Verbosity) -> Result<()> {
    match action {
        ConfigAction::Init { global, force } => config_init(global, force, verbosity),
        ConfigAction::Show => config_show(config),
        ConfigAction::Path => config_path(),
    }
}

/// Create a new configuration file with commented defaults
fn config_init(global: bool, force: bool, verbosity: Verbosity) -> Result<()> {
    let config_path = if global {
        Config::user_config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?
    } else {
        Config::project_config_path()
    };

    if config_path.exists() && !force {
        eprintln!(
            "{} Configuration file already exists: {}",
            "Error:".red().bold(),
            config_path.display()
        );
        eprintln!("{} Use --force to overwrite", "Hint:".cyan().bold());
        std::process::exit(exit_code::GENERAL_ERROR);
    }

    fs::write(&config_path, folio_cli::config::CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    if verbosity.should_show_output() {
        println!(
            "{} Created configuration file: {}",
            "Success:".green().bold(),
            config_path.display()
        );
    }
    Ok(())
}

/// Display the effective configuration
fn config_show(config: &Config) -> Result<()> {
    let toml = toml::to_string_pretty(config).context("Failed to serialize configuration")?;
    if toml.trim().is_empty() {
        println!("# No configuration set; built-in defaults apply");
    } else {
        println!("{toml}");
    }
    Ok(())
}

/// Show configuration file paths with existence status
#[allow(
    clippy::unnecessary_wraps,
    reason = "consistent return type for CLI commands"
)]
fn config_path() -> Result<()> {
    let status = |path: &Path| {
        if path.exists() {
            "exists".green()
        } else {
            "not found".yellow()
        }
    };

    if let Some(user) = Config::user_config_path() {
        println!(
            "  {} {} ({})",
            "User:".bright_black(),
            user.display(),
            status(&user)
        );
    }
    let project = Config::project_config_path();
    println!(
        "  {} {} ({})",
        "Project:".bright_black(),
        project.display(),
        status(&project)
    );
    Ok(())
}

#[allow(
    clippy::unnecessary_wraps,
    reason = "consistent return type for CLI commands"
)]
fn completion_command(shell: Shell) -> Result<()> {
    let mut cmd = Args::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
    Ok(())
}
