use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::net::SocketAddr;
use std::path::PathBuf;

use ddf_dashboard::app;
use ddf_dashboard::client::DashboardClient;
use ddf_dashboard::config::{DEFAULT_BIND, DEFAULT_SERVER_URL, DEFAULT_WORKBOOK, DashboardConfig};
use ddf_dashboard::dataset::{self, Dataset, NormalizeOptions};
use ddf_dashboard::export;
use ddf_dashboard::layout::{LayoutDetail, find_layout};
use ddf_dashboard::logging::init_tracing;
use ddf_dashboard::rows::DimensionScope;
use ddf_dashboard::server;
use ddf_dashboard::ui;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve every sheet of the workbook as JSON
    Serve {
        /// Excel workbook path
        #[arg(long, short = 'w', env = "DDF_WORKBOOK", default_value = DEFAULT_WORKBOOK)]
        workbook: PathBuf,

        /// Address to listen on
        #[arg(long, short = 'b', env = "DDF_BIND", default_value = DEFAULT_BIND)]
        bind: SocketAddr,

        /// Where combined sizes like 1920x1080 are split: both, header, value or off
        #[arg(long, env = "DDF_DIMENSION_MATCH", default_value = "both")]
        dimension_match: DimensionScope,

        /// Log as JSON lines instead of plain text
        #[arg(long)]
        log_json: bool,
    },

    /// Browse the dashboard in the terminal
    View {
        /// Base URL of a running `serve`
        #[arg(long, short = 's', env = "DDF_SERVER", default_value = DEFAULT_SERVER_URL)]
        server: String,

        /// View to open first
        #[arg(long, short = 'd', default_value = "layouts")]
        dataset: Dataset,
    },

    /// Print one dataset's rows as JSON, without a server
    Export {
        /// layouts, categories, electronics, jcd, vendor-list or promos
        dataset: Dataset,

        /// Excel workbook path
        #[arg(long, short = 'w', env = "DDF_WORKBOOK", default_value = DEFAULT_WORKBOOK)]
        workbook: PathBuf,
    },

    /// Write one layout's display specification to an xlsx file
    Spec {
        /// Layout name, matched case-insensitively
        layout: String,

        /// Output file
        #[arg(long, short = 'o')]
        output: PathBuf,

        /// Excel workbook path
        #[arg(long, short = 'w', env = "DDF_WORKBOOK", default_value = DEFAULT_WORKBOOK)]
        workbook: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            workbook,
            bind,
            dimension_match,
            log_json,
        } => {
            init_tracing(log_json);

            let config = DashboardConfig::new(workbook)
                .with_bind_addr(bind)
                .with_dimension_scope(dimension_match);

            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("failed to start the async runtime")?;
            runtime.block_on(server::serve(config))
        }

        Commands::View { server, dataset } => {
            if !std::io::stdout().is_terminal() {
                eprintln!("ddf-dashboard error: `view` needs a terminal; use `export` when piping.");
                std::process::exit(1);
            }

            let client = DashboardClient::new(&server)
                .with_context(|| format!("invalid server URL: {server}"))?;
            let app_state = app::AppState::new(client, dataset);
            ui::run_app(app_state)
        }

        Commands::Export { dataset, workbook } => {
            let rows = dataset::load_rows(&workbook, dataset, NormalizeOptions::default())
                .with_context(|| format!("failed to load {}", dataset.label()))?;

            println!("{}", export::serialize_to_json(&rows)?);
            Ok(())
        }

        Commands::Spec {
            layout,
            output,
            workbook,
        } => {
            let rows = dataset::load_rows(&workbook, Dataset::Layouts, NormalizeOptions::default())
                .context("failed to load layouts")?;
            let row = find_layout(&rows, &layout)
                .with_context(|| format!("layout not found: {layout}"))?;

            let detail = LayoutDetail::from_row(row.clone());
            export::export_specification_xlsx(&detail, &output)?;

            println!("Specification for {} saved to {}", detail.name(), output.display());
            Ok(())
        }
    }
}
