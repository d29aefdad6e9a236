use cabbages::types::Entry;
use cabbages::{accent, config, entries, output, render};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Options for the `render` command.
#[derive(clap::Args)]
struct RenderArgs {
    /// CMS export: one entry object or an array of entries
    entries: PathBuf,

    /// Directory for the rendered `{id}.html` files
    #[arg(long, default_value = "dist/email")]
    output: PathBuf,

    /// Only render entries flagged `publishToEmail`, newest first
    #[arg(long)]
    email_only: bool,

    /// Maximum number of entries with --email-only
    #[arg(long, default_value_t = 20)]
    limit: usize,
}

#[derive(Parser)]
#[command(name = "cabbages")]
#[command(about = "Render cabbages.info log entries as email-safe HTML")]
#[command(long_about = "\
Render cabbages.info log entries as email-safe HTML

Input is a JSON export from the CMS: a single entry or an array of entries.
Each entry becomes one self-contained HTML document with inline styles,
suitable as an email body or as feed item content.

Entry shape:

  {
    \"_id\": \"5d0a5c1e\",
    \"date\": \"2024-03-05\",
    \"title\": \"New EP out now\",
    \"tags\": [\"release\"],
    \"publishToEmail\": true,
    \"blocks\": [
      { \"_type\": \"textBlock\",  \"text\": \"markdown\" },
      { \"_type\": \"embedBlock\", \"url\": \"https://youtu.be/...\" },
      { \"_type\": \"imageBlock\", \"imageUrl\": \"https://...\", \"size\": \"medium\" },
      { \"_type\": \"audioBlock\", \"audioUrl\": \"https://...\" }
    ]
  }

Entries without blocks fall back to the legacy fields imageUrl, embedUrl,
content and audioUrl.

Run 'cabbages gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Site config file (stock defaults if missing)
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render entries to HTML files
    Render(RenderArgs),
    /// Validate an export without rendering
    Check {
        /// CMS export: one entry object or an array of entries
        entries: PathBuf,
    },
    /// Print the accent colour for an entry id
    Accent {
        id: String,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cabbages=warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Render(args) => {
            let site_config = config::load_config(&cli.config)?;
            let loaded = entries::load_entries(&args.entries)?;
            let selected: Vec<&Entry> = if args.email_only {
                entries::select_for_email(&loaded, args.limit)
            } else {
                loaded.iter().collect()
            };

            entries::check_file_stems(&selected)?;
            std::fs::create_dir_all(&args.output)?;
            for entry in &selected {
                let html = render::render_entry_html(entry, &site_config);
                let path = args
                    .output
                    .join(format!("{}.html", entries::file_stem(&entry.id)));
                std::fs::write(&path, html)?;
                tracing::debug!(id = %entry.id, path = %path.display(), "wrote entry");
            }
            output::print_render_output(&selected, &args.output);
        }
        Command::Check { entries: path } => {
            config::load_config(&cli.config)?;
            let loaded = entries::load_entries(&path)?;
            let all: Vec<_> = loaded.iter().collect();
            output::print_check_output(&all);
        }
        Command::Accent { id } => {
            println!("{}", accent::glow_color(&id));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
