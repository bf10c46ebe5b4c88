use std::path::PathBuf;

use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use estimate_cli::commands::{company, estimate, saved, settings, transfer};
use estimate_store_json::JsonFileStore;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Quote/estimate generator.
///
/// Reads an estimate draft from a TOML file, computes subtotal, tax, total
/// and gross margin, renders a printable estimate sheet, and keeps company
/// branding and saved estimates in a local data directory.
#[derive(Debug, Parser)]
#[command(name = "estimate", version)]
struct Cli {
    /// Data directory for settings, company info and saved estimates.
    /// Defaults to the platform data dir.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Debug-level log output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Calculate and print the totals for a draft file.
    Calc {
        /// Estimate draft (TOML).
        draft: PathBuf,
    },

    /// Render the printable estimate sheet for a draft file.
    Sheet {
        /// Estimate draft (TOML).
        draft: PathBuf,

        /// Write the sheet to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Calculate a draft and save it with a frozen totals snapshot.
    Save {
        /// Estimate draft (TOML).
        draft: PathBuf,

        /// Display name; defaults to "<client> 見積書".
        #[arg(long)]
        name: Option<String>,
    },

    /// List saved estimates.
    List,

    /// Show a saved estimate's stored snapshot.
    Show {
        id: Uuid,

        /// Re-emit the estimate as an editable draft file.
        #[arg(long)]
        as_toml: bool,
    },

    /// Delete a saved estimate.
    Delete { id: Uuid },

    /// Show or update company branding.
    Company {
        #[command(subcommand)]
        action: CompanyAction,
    },

    /// Show or update application settings.
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Export company info, saved estimates and settings to a JSON bundle.
    Export { file: PathBuf },

    /// Import a JSON bundle, overwriting current data.
    Import {
        file: PathBuf,

        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },

    /// Delete all stored company info, settings and saved estimates.
    Reset {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
enum CompanyAction {
    /// Print the stored company fields.
    Show,

    /// Update company fields; omitted flags are left unchanged.
    Set {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        postal: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        fax: Option<String>,
        /// Logo image file (PNG/JPG/GIF, at most 5 MB).
        #[arg(long)]
        logo: Option<PathBuf>,
        /// Seal (印影) image file (PNG/JPG/GIF, at most 5 MB).
        #[arg(long)]
        stamp: Option<PathBuf>,
        #[arg(long, conflicts_with = "logo")]
        remove_logo: bool,
        #[arg(long, conflicts_with = "stamp")]
        remove_stamp: bool,
    },
}

#[derive(Debug, Subcommand)]
enum SettingsAction {
    /// Print the stored settings.
    Show,

    /// Update settings; omitted flags are left unchanged.
    Set {
        #[arg(long)]
        debug: Option<bool>,
        /// Timeout for the PDF rendering pipeline, in seconds (5–120).
        #[arg(long)]
        pdf_timeout: Option<u32>,
    },
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` (or `debug` with --verbose / the stored debug
///   setting) so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("", "", "estimate-suite")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".estimate-suite"))
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let data_dir = cli.data_dir.clone().unwrap_or_else(default_data_dir);

    // The stored debug flag raises the default log level, like the
    // original's debug panel. It is peeked before the store is opened so
    // the subscriber exists by the time the store starts logging.
    let stored_debug = estimate_store_json::store::peek_settings(&data_dir).debug_mode;
    init_tracing(cli.verbose || stored_debug);
    debug!(data_dir = %data_dir.display(), "using data directory");

    let store = JsonFileStore::open(&data_dir)?;

    match cli.command {
        Command::Calc { draft } => estimate::calc(&draft),
        Command::Sheet { draft, output } => estimate::sheet(&store, &draft, output.as_deref()),
        Command::Save { draft, name } => estimate::save(&store, &draft, name.as_deref()),
        Command::List => saved::list(&store),
        Command::Show { id, as_toml } => saved::show(&store, id, as_toml),
        Command::Delete { id } => saved::delete(&store, id),
        Command::Company { action } => match action {
            CompanyAction::Show => company::show(&store),
            CompanyAction::Set {
                name,
                postal,
                address,
                phone,
                fax,
                logo,
                stamp,
                remove_logo,
                remove_stamp,
            } => company::set(
                &store,
                company::CompanyUpdate {
                    name,
                    postal,
                    address,
                    phone,
                    fax,
                    logo,
                    stamp,
                    remove_logo,
                    remove_stamp,
                },
            ),
        },
        Command::Settings { action } => match action {
            SettingsAction::Show => settings::show(&store),
            SettingsAction::Set { debug, pdf_timeout } => {
                settings::set(&store, debug, pdf_timeout)
            }
        },
        Command::Export { file } => transfer::export_data(&store, &file),
        Command::Import { file, yes } => transfer::import_data(&store, &file, yes),
        Command::Reset { yes } => transfer::reset(&store, yes),
    }
}
