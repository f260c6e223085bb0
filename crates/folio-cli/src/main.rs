use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use colored::Colorize;
use folio_core::verifier::{self, Severity};
use folio_core::{Catalog, CatalogConfig, DisplayProject, LookupMode};
use tracing_subscriber::EnvFilter;

mod config;

use config::ConfigLoader;

/// Folio — portfolio project catalog CLI
///
/// List, look up, normalize, and verify the project data behind a portfolio site.
#[derive(Parser)]
#[command(name = "folio", version, about, long_about = None)]
struct Cli {
    /// Suppress human-readable output (exit codes still apply)
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Log normalization details to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Configuration file (defaults to ./folio.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Detail lookup mode: strict (explicit ids) or listing (synthesized ids too)
    #[arg(long, global = true)]
    lookup: Option<LookupMode>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List project cards in data file order
    List {
        /// Path to the projects JSON file
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one project's detail page
    Show {
        /// Path to the projects JSON file
        file: PathBuf,
        /// Project id, as it appears in the detail route
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the canonical listing as JSON
    Normalize {
        /// Path to the projects JSON file
        file: PathBuf,
    },

    /// Check the data file for duplicate ids, unreachable projects, and gaps
    Verify {
        /// Path to the projects JSON file
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

const EXIT_OK: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_ERROR: i32 = 2;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match cli.command {
        Commands::Version => {
            println!(
                "folio {} (folio-core {})",
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_VERSION")
            );
            EXIT_OK
        }
        ref command => match load_config(cli.config.as_deref(), cli.lookup) {
            Ok(config) => run(command, config, cli.quiet),
            Err(e) => report_error(&e),
        },
    };

    process::exit(exit_code);
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("folio_core=debug,folio_cli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}

fn load_config(path: Option<&Path>, lookup: Option<LookupMode>) -> folio_core::Result<CatalogConfig> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = path {
        loader = loader.with_config_path(path);
    }
    let mut config = loader.load()?;
    if let Some(lookup) = lookup {
        config.lookup = lookup;
    }
    Ok(config)
}

fn run(command: &Commands, config: CatalogConfig, quiet: bool) -> i32 {
    let (file, catalog) = match command {
        Commands::List { file, .. }
        | Commands::Show { file, .. }
        | Commands::Normalize { file }
        | Commands::Verify { file, .. } => match Catalog::from_path(file) {
            Ok(catalog) => (file, catalog.configured(config)),
            Err(e) => return report_error(&e),
        },
        Commands::Version => return EXIT_OK,
    };

    match command {
        Commands::List { json, .. } => cmd_list(&catalog, *json, quiet),
        Commands::Show { id, json, .. } => cmd_show(&catalog, id, *json, quiet),
        Commands::Normalize { .. } => print_json(&catalog.projects()),
        Commands::Verify { json, .. } => cmd_verify(&catalog, file, *json, quiet),
        Commands::Version => EXIT_OK,
    }
}

// ── Commands ──────────────────────────────────────────────

fn cmd_list(catalog: &Catalog, json: bool, quiet: bool) -> i32 {
    let projects = catalog.projects();
    if json {
        return print_json(&projects);
    }
    if quiet {
        return EXIT_OK;
    }
    if projects.is_empty() {
        println!("{}", "no projects".dimmed());
    }
    for project in &projects {
        print_card(project);
    }
    EXIT_OK
}

fn cmd_show(catalog: &Catalog, id: &str, json: bool, quiet: bool) -> i32 {
    let Some(detail) = catalog.detail(id) else {
        if json {
            print_json(&serde_json::json!({ "found": false, "id": id }));
        }
        if !quiet {
            eprintln!("{} Project not found: {}", "✗".red(), id);
        }
        return EXIT_FAILURE;
    };

    if json {
        return print_json(&detail);
    }
    if quiet {
        return EXIT_OK;
    }

    let summary = &detail.summary;
    println!("{} {}", detail.title_lead.bold(), detail.title_rest.cyan().bold());
    println!("  {} · {}", summary.category.to_uppercase(), summary.id.dimmed());
    if !summary.description.is_empty() {
        println!("  {}", summary.description);
    }
    if let Some(image) = &detail.hero_image {
        println!("  hero: {}", image);
    }
    if let Some(live) = &summary.live_site {
        println!("  live: {}", live);
    }
    if let Some(repo) = &detail.repo {
        println!("  repo: {}", repo);
    }
    if !summary.technologies.is_empty() {
        println!("  tech: {}", summary.technologies.join(", "));
    }
    for entry in &detail.meta {
        println!("  {}: {}", entry.label.dimmed(), entry.value);
    }
    print_section("Key Features", detail.features.iter().map(|f| {
        if f.description.is_empty() {
            f.title.clone()
        } else {
            format!("{} — {}", f.title, f.description)
        }
    }));
    print_section("Challenges", detail.challenges.iter().cloned());
    print_section("Solutions", detail.solutions.iter().cloned());
    print_section("Roadmap", detail.roadmap.iter().map(|r| match &r.step {
        Some(step) => format!("{}. {}", step, r.title),
        None => r.title.clone(),
    }));
    if let Some(prev) = &detail.previous {
        println!("  ← {} ({})", prev.title, prev.id.dimmed());
    }
    if let Some(next) = &detail.next {
        println!("  → {} ({})", next.title, next.id.dimmed());
    }
    EXIT_OK
}

fn cmd_verify(catalog: &Catalog, file: &Path, json: bool, quiet: bool) -> i32 {
    let result = verifier::verify(catalog);
    let exit_code = if result.is_valid() { EXIT_OK } else { EXIT_FAILURE };

    if json {
        let output = serde_json::json!({
            "valid": result.is_valid(),
            "projects": catalog.len(),
            "errors": result.errors().len(),
            "warnings": result.warnings().len(),
            "diagnostics": result.diagnostics,
        });
        print_json(&output);
        return exit_code;
    }

    if !quiet {
        for diagnostic in &result.diagnostics {
            match diagnostic.severity {
                Severity::Error => eprintln!("{}", diagnostic.to_string().red()),
                Severity::Warning => eprintln!("{}", diagnostic.to_string().yellow()),
            }
        }
        let mark = if result.is_valid() { "✓".green() } else { "✗".red() };
        println!(
            "{} {}: {} projects, {} errors, {} warnings",
            mark,
            file.display(),
            catalog.len(),
            result.errors().len(),
            result.warnings().len()
        );
    }
    exit_code
}

// ── Output helpers ────────────────────────────────────────

fn print_card(project: &DisplayProject) {
    println!(
        "{}  {} [{}]",
        project.id.cyan(),
        project.title.bold(),
        project.category
    );
    if !project.description.is_empty() {
        println!("    {}", project.description);
    }
    if !project.technologies.is_empty() {
        println!("    {}", project.technologies.join(" · ").dimmed());
    }
    if let Some(live) = &project.live_site {
        println!("    {}", live.underline());
    }
}

fn print_section(heading: &str, items: impl Iterator<Item = String>) {
    let items: Vec<String> = items.collect();
    if items.is_empty() {
        return;
    }
    println!("  {}", heading.bold());
    for item in items {
        println!("    • {}", item);
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            EXIT_OK
        }
        Err(e) => {
            eprintln!("{} Serialization error: {}", "error:".red().bold(), e);
            EXIT_ERROR
        }
    }
}

fn report_error(err: &folio_core::Error) -> i32 {
    eprintln!("{} {}", "error:".red().bold(), err);
    EXIT_ERROR
}
