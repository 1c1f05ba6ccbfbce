//! Tillroll operator CLI.

use std::{fmt, process::ExitCode, str::FromStr};

use clap::{Args, Parser, Subcommand};
use rust_decimal::{Decimal, RoundingStrategy};
use tabled::{Table, Tabled, settings::Style};
use tracing_subscriber::EnvFilter;

use tillroll::{
    builder::{OrderBuilder, OrderError},
    catalog::Catalog,
    client::PosClient,
    config::BackendConfig,
    orders::Customer,
    prelude::{ApiError, OrderApi},
};

#[derive(Debug, Parser)]
#[command(name = "tillroll", about = "Tillroll order client", long_about = None)]
struct Cli {
    /// Backend connection settings.
    #[command(flatten)]
    backend: BackendConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the purchasable items and their stock levels
    Catalog,

    /// Build an order and submit it to the backend
    Submit(SubmitArgs),
}

#[derive(Debug, Args)]
struct SubmitArgs {
    /// Customer e-mail address
    #[arg(long)]
    email: String,

    /// Customer first name
    #[arg(long)]
    first_name: String,

    /// Customer last name
    #[arg(long)]
    last_name: String,

    /// Item to order, as ID:QTY; repeat for multiple items
    #[arg(long = "item", value_name = "ID:QTY", required = true)]
    items: Vec<ItemSpec>,
}

/// An `ID:QTY` pair from the command line.
#[derive(Clone, Debug)]
struct ItemSpec {
    item_id: u64,
    quantity: u32,
}

impl FromStr for ItemSpec {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (id, qty) = raw
            .split_once(':')
            .ok_or_else(|| format!("expected ID:QTY, got {raw:?}"))?;

        let item_id = id
            .parse()
            .map_err(|_| format!("invalid item id {id:?}"))?;

        let quantity: u32 = qty
            .parse()
            .map_err(|_| format!("invalid quantity {qty:?}"))?;

        if quantity == 0 {
            return Err("quantity must be at least 1".to_string());
        }

        Ok(Self { item_id, quantity })
    }
}

#[derive(Debug, Tabled)]
struct CatalogRow {
    #[tabled(rename = "ID")]
    id: u64,

    #[tabled(rename = "Item")]
    name: String,

    #[tabled(rename = "Price")]
    price: String,

    #[tabled(rename = "Discount")]
    discount: String,

    #[tabled(rename = "In stock")]
    stock: u32,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _env = dotenvy::dotenv();

    init_tracing();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");

            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .compact()
        .with_target(true)
        .with_env_filter(filter)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let client = PosClient::new(cli.backend.api_config());

    match cli.command {
        Commands::Catalog => print_catalog(&client).await,
        Commands::Submit(args) => submit(&client, args).await,
    }
}

async fn print_catalog(client: &PosClient) -> Result<(), CliError> {
    let items = client.load_catalog().await?;

    let rows: Vec<CatalogRow> = items
        .iter()
        .map(|item| CatalogRow {
            id: item.id,
            name: item.name.clone(),
            price: format_amount(item.price),
            discount: format!("{}%", item.discount_percent()),
            stock: item.quantity_in_stock,
        })
        .collect();

    println!("{}", Table::new(rows).with(Style::rounded()));

    Ok(())
}

async fn submit(client: &PosClient, args: SubmitArgs) -> Result<(), CliError> {
    let catalog = Catalog::new(client.load_catalog().await?);

    let mut builder = OrderBuilder::new();

    builder.set_customer(Customer {
        email: args.email,
        first_name: args.first_name,
        last_name: args.last_name,
    });

    for spec in &args.items {
        let item = catalog
            .get(spec.item_id)
            .ok_or(CliError::UnknownItem(spec.item_id))?;

        for _ in 0..spec.quantity {
            builder.add_item(item);
        }
    }

    let total = builder.total_price().map_err(OrderError::Pricing)?;
    let receipt = builder.submit(client, &catalog).await?;

    println!("{}", receipt.message);
    println!(
        "Order for {} {} <{}>, total {}",
        receipt.customer.first_name,
        receipt.customer.last_name,
        receipt.customer.email,
        format_amount(total),
    );

    Ok(())
}

fn format_amount(amount: Decimal) -> String {
    format!(
        "{:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

#[derive(Debug)]
enum CliError {
    UnknownItem(u64),
    Catalog(ApiError),
    Order(OrderError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownItem(item_id) => {
                write!(f, "item {item_id} is not in the catalog")
            }
            Self::Catalog(error) => write!(f, "failed to load catalog: {error}"),
            Self::Order(OrderError::Api(ApiError::Validation(fields))) => {
                writeln!(f, "the backend rejected the order:")?;

                for (field, message) in fields {
                    writeln!(f, "  {field}: {message}")?;
                }

                Ok(())
            }
            Self::Order(error) => write!(f, "failed to submit order: {error}"),
        }
    }
}

impl From<ApiError> for CliError {
    fn from(error: ApiError) -> Self {
        Self::Catalog(error)
    }
}

impl From<OrderError> for CliError {
    fn from(error: OrderError) -> Self {
        Self::Order(error)
    }
}
