use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use arronax::share::parse_link;
use arronax::table::{render_row, RenderOptions};
use arronax::{parser, Entity, Explorer, HttpApi};

mod args;

#[derive(Parser)]
#[command(name = "arronax")]
#[command(about = "Browse, filter and export ledger data from a Conseil indexer")]
#[command(version)]
struct Cli {
    /// Explorer config file
    #[arg(long, env = "ARRONAX_CONFIG", default_value = "arronax.yaml")]
    config: PathBuf,

    /// Network to use instead of the config's default
    #[arg(long)]
    network: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct QueryArgs {
    /// Entity to query, e.g. blocks or operations
    entity: Option<String>,

    /// Filter as name:op[:v1,v2], repeatable
    #[arg(long = "filter")]
    filters: Vec<String>,

    /// Sort as field[:asc|desc], repeatable
    #[arg(long = "sort")]
    sorts: Vec<String>,

    /// Start from a shared link instead of the entity default
    #[arg(long)]
    share: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the entities of the selected network
    Entities,
    /// Run a query and print one page of results
    Query {
        #[command(flatten)]
        query: QueryArgs,

        /// Zero-based page number
        #[arg(long, default_value = "0")]
        page: usize,

        /// Rows per page
        #[arg(long, default_value = "10")]
        page_size: usize,

        /// Print full hashes and untrimmed numbers
        #[arg(long)]
        full: bool,
    },
    /// Print a shareable link for a query
    Share {
        #[command(flatten)]
        query: QueryArgs,

        /// Explorer origin the link points at
        #[arg(long, default_value = "http://localhost:3000")]
        origin: String,
    },
    /// Print the entity and query carried by a shared link
    Decode {
        link: String,
    },
    /// Export query results as CSV
    Export {
        #[command(flatten)]
        query: QueryArgs,

        /// Output file
        #[arg(long, default_value = "arronax-results.csv")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("arronax=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Commands::Decode { link } = &cli.command {
        return decode(link);
    }

    let config = parser::parse_file(&cli.config)
        .with_context(|| format!("loading config {}", cli.config.display()))?;
    let api = HttpApi::new().context("building HTTP client")?;
    let mut explorer = Explorer::new(api, config);
    if let Some(network) = &cli.network {
        explorer = explorer.with_network(network)?;
    }

    match cli.command {
        Commands::Entities => {
            explorer.init_load(None).await?;
            for entity in explorer.entities() {
                println!("{:<20} {:<24} {}", entity.name, entity.plural_name(), entity.count);
            }
        }
        Commands::Query { query, page, page_size, full } => {
            prepare(&mut explorer, &query).await?;
            print_page(&mut explorer, page, page_size, full)?;
        }
        Commands::Share { query, origin } => {
            prepare(&mut explorer, &query).await?;
            println!("{}", explorer.share_report(&origin)?);
        }
        Commands::Decode { .. } => {}
        Commands::Export { query, out } => {
            prepare(&mut explorer, &query).await?;
            let csv = explorer.export_csv().await?;
            std::fs::write(&out, csv).with_context(|| format!("writing {}", out.display()))?;
            info!(file = %out.display(), "Exported CSV");
        }
    }

    Ok(())
}

fn decode(link: &str) -> Result<()> {
    let shared = parse_link(link)?;
    let query = shared.decode()?;
    println!("entity: {}", shared.entity);
    println!("{}", serde_json::to_string_pretty(&query)?);
    Ok(())
}

/// Load the requested entity and apply command-line filters and sorts
async fn prepare(explorer: &mut Explorer<HttpApi>, opts: &QueryArgs) -> Result<()> {
    let link = opts.share.as_deref().map(parse_link).transpose()?;
    explorer.init_load(link.as_ref()).await?;

    if let Some(name) = &opts.entity {
        explorer.change_tab(&Entity::from(name.as_str())).await?;
    }
    let entity = explorer
        .selected_entity()
        .cloned()
        .ok_or_else(|| anyhow!("the network reports no entities"))?;

    if !opts.filters.is_empty() {
        let attributes = explorer.attributes(&entity);
        let filters = opts
            .filters
            .iter()
            .map(|f| args::parse_filter(f, attributes))
            .collect::<Result<Vec<_>>>()?;
        explorer.set_filters(filters)?;
    }
    if !opts.sorts.is_empty() {
        let sort = opts.sorts.iter().map(|s| args::parse_sort(s)).collect::<Result<Vec<_>>>()?;
        explorer.set_sort(sort)?;
    }
    if !opts.filters.is_empty() || !opts.sorts.is_empty() {
        explorer.submit_query().await?;
    }
    Ok(())
}

fn print_page(explorer: &mut Explorer<HttpApi>, page: usize, page_size: usize, full: bool) -> Result<()> {
    let entity = explorer
        .selected_entity()
        .cloned()
        .ok_or_else(|| anyhow!("no entity selected"))?;
    let state = explorer.current_mut().ok_or_else(|| anyhow!("entity '{}' is not loaded", entity))?;
    state.table.change_rows_per_page(page_size);
    state.table.change_page(page);

    let options = if full { RenderOptions::default().full() } else { RenderOptions::default() };
    let visible = state.table.visible_page(&state.items);

    let header: Vec<&str> = state.columns.iter().map(|c| c.display_name.as_str()).collect();
    println!("{}", header.join(" | "));
    for row in &visible.rows {
        let cells = render_row(&entity, row, &state.columns, &options);
        let text: Vec<&str> = cells.iter().map(|c| c.text()).collect();
        println!("{}", text.join(" | "));
    }
    println!(
        "-- page {} of {} ({} rows)",
        visible.page + 1,
        visible.page_count().max(1),
        visible.total
    );
    Ok(())
}
