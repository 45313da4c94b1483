use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use txreport::config::{config_dir, load_config, resolve_output_dir, Config, CONFIG_TEMPLATE};
use txreport::error::{ReportError, Result};
use txreport::pdf::generate_report_pdf;
use txreport::report::{allocate, build_report, load_transactions, Transaction, TransactionFilter};
use txreport::text::{render_columns, render_page_summary, render_report};

#[derive(Parser)]
#[command(name = "txreport")]
#[command(version, about = "Paginated income/expense reports for construction projects", long_about = None)]
struct Cli {
    /// Path to config directory (default: XDG config dir)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct FilterArgs {
    /// Only include transactions of this project
    #[arg(long)]
    project: Option<String>,

    /// Only include transactions from this date (YYYY-MM-DD)
    #[arg(long)]
    from: Option<String>,

    /// Only include transactions up to this date (YYYY-MM-DD)
    #[arg(long)]
    to: Option<String>,

    /// Only include one transaction type (gelir, gider)
    #[arg(long = "type", value_name = "TYPE")]
    kind: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with a template config.toml
    Init,

    /// Show config location and page geometry
    Status,

    /// Show the column width plan for a transaction file
    Columns {
        /// JSON file with an array of transactions
        file: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show how transactions split into pages, with carryover balances
    Pages {
        /// JSON file with an array of transactions
        file: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Print the paginated report
    Show {
        /// JSON file with an array of transactions
        file: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,

        /// Report title (default: [report].title)
        #[arg(long)]
        title: Option<String>,
    },

    /// Export the paginated report as PDF (or JSON)
    Export {
        /// JSON file with an array of transactions
        file: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,

        /// Report title (default: [report].title)
        #[arg(long)]
        title: Option<String>,

        /// Banner text under the title (default: derived from filters)
        #[arg(long)]
        filter_info: Option<String>,

        /// Custom output file path (default: output_dir/RAPOR-<date>.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the paginated report as JSON instead of PDF
        #[arg(long)]
        json: bool,

        /// Open generated file with system default viewer
        #[arg(long)]
        open: bool,
    },
}

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Status => cmd_status(&cfg_dir),
        Commands::Columns { file, filter } => cmd_columns(&cfg_dir, &file, &filter),
        Commands::Pages { file, filter } => cmd_pages(&cfg_dir, &file, &filter),
        Commands::Show {
            file,
            filter,
            title,
        } => cmd_show(&cfg_dir, &file, &filter, title),
        Commands::Export {
            file,
            filter,
            title,
            filter_info,
            output,
            json,
            open,
        } => cmd_export(
            &cfg_dir,
            &file,
            &filter,
            ExportOptions {
                title,
                filter_info,
                output,
                json,
                open,
            },
        ),
    }
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(ReportError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::create_dir_all(cfg_dir.join("output"))?;
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;

    println!("Initialized txreport config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Edit your letterhead and page layout:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!("  2. Export a report:  txreport export <transactions.json>");

    Ok(())
}

/// Show config location and derived page geometry
fn cmd_status(cfg_dir: &Path) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let layout = &config.layout;

    println!("Report Status");
    println!("{}", "-".repeat(50));
    println!("Config directory:  {}", cfg_dir.display());
    println!("Company:           {}", config.company.name);
    println!("Report title:      {}", config.report.title);
    println!(
        "Page:              {} x {} mm (padding {} mm)",
        layout.page_width_mm, layout.page_height_mm, layout.page_padding_mm
    );
    println!("Content width:     {}px", layout.content_width_px());
    println!("Rows area, first:  {:.1}px", layout.available_height(true));
    println!("Rows area, later:  {:.1}px", layout.available_height(false));
    println!(
        "Output directory:  {}",
        resolve_output_dir(&config.report.output_dir, cfg_dir).display()
    );

    Ok(())
}

/// Load config and the filtered transaction list
fn load_inputs(
    cfg_dir: &Path,
    file: &Path,
    args: &FilterArgs,
) -> Result<(Config, Vec<Transaction>, TransactionFilter)> {
    let config = load_config(cfg_dir)?;
    let filter = TransactionFilter::from_args(
        args.project.clone(),
        args.from.as_deref(),
        args.to.as_deref(),
        args.kind.as_deref(),
    )?;

    let all = load_transactions(file)?;
    let transactions = if filter.is_empty() {
        all
    } else {
        filter.apply(&all)
    };

    Ok((config, transactions, filter))
}

/// Print the column width plan
fn cmd_columns(cfg_dir: &Path, file: &Path, filter: &FilterArgs) -> Result<()> {
    let (config, transactions, _) = load_inputs(cfg_dir, file, filter)?;
    let plan = allocate(&transactions, &config.layout, &config.report.currency_symbol);

    println!("{}", render_columns(&plan));
    Ok(())
}

/// Print one summary line per page
fn cmd_pages(cfg_dir: &Path, file: &Path, filter: &FilterArgs) -> Result<()> {
    let (config, transactions, filter) = load_inputs(cfg_dir, file, filter)?;
    let report = build_report(
        &transactions,
        &config.layout,
        &config.report.currency_symbol,
        &config.report.title,
        filter.describe(),
    );

    if report.is_empty() {
        println!("No transactions found with the given filters.");
        return Ok(());
    }

    println!(
        "{}",
        render_page_summary(&report.pages, &report.totals, &config.report.currency_symbol)
    );
    println!(
        "{} transactions on {} page(s)",
        transactions.len(),
        report.pages.len()
    );

    Ok(())
}

/// Print the full paginated report
fn cmd_show(
    cfg_dir: &Path,
    file: &Path,
    filter: &FilterArgs,
    title: Option<String>,
) -> Result<()> {
    let (config, transactions, filter) = load_inputs(cfg_dir, file, filter)?;
    let title = title.unwrap_or_else(|| config.report.title.clone());
    let report = build_report(
        &transactions,
        &config.layout,
        &config.report.currency_symbol,
        &title,
        filter.describe(),
    );

    if report.is_empty() {
        println!("No transactions found with the given filters.");
        return Ok(());
    }

    let data = report.to_data(&today_display());
    print!("{}", render_report(&data));

    Ok(())
}

struct ExportOptions {
    title: Option<String>,
    filter_info: Option<String>,
    output: Option<PathBuf>,
    json: bool,
    open: bool,
}

/// Export the paginated report as PDF or JSON
fn cmd_export(cfg_dir: &Path, file: &Path, filter: &FilterArgs, opts: ExportOptions) -> Result<()> {
    let (config, transactions, filter) = load_inputs(cfg_dir, file, filter)?;
    let title = opts.title.unwrap_or_else(|| config.report.title.clone());
    let filter_info = opts.filter_info.or_else(|| filter.describe());
    let report = build_report(
        &transactions,
        &config.layout,
        &config.report.currency_symbol,
        &title,
        filter_info,
    );

    if report.is_empty() {
        return Err(ReportError::NothingToExport);
    }

    let data = report.to_data(&today_display());

    let extension = if opts.json { "json" } else { "pdf" };
    let output_path = match opts.output {
        Some(path) => path,
        None => {
            let output_dir = resolve_output_dir(&config.report.output_dir, cfg_dir);
            std::fs::create_dir_all(&output_dir)?;
            let today = chrono::Local::now().format("%Y-%m-%d");
            output_dir.join(format!("RAPOR-{today}.{extension}"))
        }
    };

    if opts.json {
        let json = serde_json::to_string_pretty(&data)?;
        std::fs::write(&output_path, json)?;
    } else {
        generate_report_pdf(&data, &config.company, &config.layout, &output_path)?;
    }

    println!("Generated report '{}'", title);
    println!("  Transactions: {}", transactions.len());
    println!("  Pages:        {}", report.pages.len());
    println!(
        "  Net balance:  {}",
        txreport::money::format_amount(report.totals.net_balance, &config.report.currency_symbol)
    );
    println!("  Saved:        {}", output_path.display());

    if opts.open {
        open_path(&output_path)?;
    }

    Ok(())
}

fn today_display() -> String {
    chrono::Local::now().format("%d.%m.%Y %H:%M").to_string()
}

fn open_path(path: &Path) -> Result<()> {
    // Open with system default viewer
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(path).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(path).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", ""])
            .arg(path)
            .spawn()?;
    }
    Ok(())
}
