//! Snack Ledger CLI - bookkeeping for a small snack business.
//!
//! # Usage
//!
//! ```bash
//! # Price lookups and overrides
//! sl-cli prices list
//! sl-cli prices set cheese 100 38
//!
//! # Orders
//! sl-cli order add --customer "Asha" --delivery 2026-11-02 --variant retail --pack 100=2
//! sl-cli order list --search asha
//!
//! # Money in and out
//! sl-cli income add --customer "Asha" --amount 50 --order <ORDER_ID>
//! sl-cli expense add --item "Gas refill" --amount 950
//!
//! # Production
//! sl-cli batch estimate --weight 12000
//! sl-cli batch record --kg 5
//!
//! # Totals
//! sl-cli dashboard
//! ```
//!
//! # Commands
//!
//! - `prices` - Unit price table
//! - `order` - Orders, quotes and margins
//! - `income` - Money received
//! - `expense` - Money spent
//! - `material` - Raw materials and stock
//! - `batch` - Production estimates and the batch log
//! - `dashboard` - Profit and order overview
//!
//! Configuration is read from the environment; see [`config`].

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use snack_ledger_core::{
    ExpenseFilter, ExpenseId, ExpenseKind, IncomeFilter, IncomeId, OrderFilter, OrderId,
    OrderStatus, PacketSize, Variant,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod store;

use commands::{Context, parse_pack, today};
use config::LedgerConfig;
use store::JsonStore;

#[derive(Parser)]
#[command(name = "sl-cli")]
#[command(author, version, about = "Snack Ledger bookkeeping tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up and override unit prices
    Prices {
        #[command(subcommand)]
        action: PricesAction,
    },
    /// Manage orders
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Record money received
    Income {
        #[command(subcommand)]
        action: IncomeAction,
    },
    /// Record money spent
    Expense {
        #[command(subcommand)]
        action: ExpenseAction,
    },
    /// Manage raw materials
    Material {
        #[command(subcommand)]
        action: MaterialAction,
    },
    /// Production estimates and the batch log
    Batch {
        #[command(subcommand)]
        action: BatchAction,
    },
    /// Show profit and order totals
    Dashboard,
}

#[derive(Subcommand)]
enum PricesAction {
    /// Show price columns
    List {
        /// Only this variant
        #[arg(short, long)]
        variant: Option<Variant>,
    },
    /// Show one price
    Get { variant: Variant, size: PacketSize },
    /// Override one price
    Set {
        variant: Variant,
        size: PacketSize,
        price: Decimal,
    },
    /// Apply a YAML price list
    Import { path: PathBuf },
}

#[derive(Subcommand)]
enum OrderAction {
    /// Price a cart without saving it
    Quote {
        #[arg(short, long, default_value = "retail")]
        variant: Variant,

        /// Packets as SIZE=QTY, repeatable
        #[arg(short, long = "pack", value_parser = parse_pack)]
        packs: Vec<(PacketSize, u32)>,
    },
    /// Create an order
    Add {
        #[arg(short, long)]
        customer: String,

        /// Delivery date (YYYY-MM-DD)
        #[arg(short, long)]
        delivery: NaiveDate,

        #[arg(short, long, default_value = "retail")]
        variant: Variant,

        /// Packets as SIZE=QTY, repeatable
        #[arg(short, long = "pack", value_parser = parse_pack)]
        packs: Vec<(PacketSize, u32)>,
    },
    /// List orders
    List {
        /// Match customer name or variant
        #[arg(short, long)]
        search: Option<String>,

        /// `pending` or `completed`
        #[arg(long)]
        status: Option<OrderStatus>,

        #[arg(long)]
        variant: Option<Variant>,
    },
    /// Flip between pending and completed
    Toggle { id: OrderId },
    /// Delete an order
    Delete { id: OrderId },
    /// Estimated production cost and margin
    Margin { id: OrderId },
}

#[derive(Subcommand)]
enum IncomeAction {
    /// Record money received
    Add {
        #[arg(short, long)]
        customer: String,

        #[arg(short, long)]
        amount: Decimal,

        /// Defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Order this payment is for
        #[arg(short, long)]
        order: Option<OrderId>,

        #[arg(short, long)]
        remarks: Option<String>,
    },
    /// List income
    List {
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Delete an income entry
    Delete { id: IncomeId },
}

#[derive(Subcommand)]
enum ExpenseAction {
    /// Record money spent
    Add {
        #[arg(short, long)]
        item: String,

        #[arg(short, long)]
        amount: Decimal,

        /// Defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Personal spend, excluded from profit
        #[arg(long)]
        extra: bool,

        #[arg(short, long)]
        remarks: Option<String>,
    },
    /// List expenses
    List {
        #[arg(short, long)]
        search: Option<String>,

        /// `all`, `business` or `extra`
        #[arg(short, long, default_value = "all")]
        kind: ExpenseKind,
    },
    /// Flip between business and extra
    Toggle { id: ExpenseId },
    /// Delete an expense
    Delete { id: ExpenseId },
}

#[derive(Subcommand)]
enum MaterialAction {
    /// List materials
    List,
    /// Add a material
    Add {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        unit: String,

        /// Price per unit
        #[arg(short, long)]
        price: Decimal,
    },
    /// Change a material's unit price
    SetPrice { name: String, price: Decimal },
    /// Add purchased stock
    AddStock { name: String, quantity: Decimal },
}

#[derive(Subcommand)]
enum BatchAction {
    /// Materials and cost for a finished weight
    Estimate {
        /// Finished product weight in grams
        #[arg(short, long)]
        weight: u64,
    },
    /// Log a fried batch
    Record {
        /// Flour used, in kg
        #[arg(short, long)]
        kg: Decimal,

        /// Defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Show the batch log
    List,
}

fn main() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    // JSON lines when LEDGER_LOG_JSON is set, plain text otherwise
    let json = std::env::var_os("LEDGER_LOG_JSON").is_some();
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = LedgerConfig::from_env()?;
    let ctx = Context {
        store: JsonStore::open(&config.data_dir)?,
        profile: config.profile,
    };
    tracing::debug!(data_dir = %ctx.store.dir().display(), "loaded configuration");

    match cli.command {
        Commands::Prices { action } => match action {
            PricesAction::List { variant } => commands::prices::list(&ctx, variant.as_ref()),
            PricesAction::Get { variant, size } => commands::prices::get(&ctx, &variant, size),
            PricesAction::Set {
                variant,
                size,
                price,
            } => commands::prices::set(&ctx, &variant, size, price)?,
            PricesAction::Import { path } => {
                commands::prices::import(&ctx, &path)?;
            }
        },
        Commands::Order { action } => match action {
            OrderAction::Quote { variant, packs } => {
                commands::orders::quote(&ctx, &variant, &packs);
            }
            OrderAction::Add {
                customer,
                delivery,
                variant,
                packs,
            } => {
                commands::orders::add(&ctx, &customer, delivery, variant, &packs)?;
            }
            OrderAction::List {
                search,
                status,
                variant,
            } => commands::orders::list(
                &ctx,
                &OrderFilter {
                    search,
                    status,
                    variant,
                },
            )?,
            OrderAction::Toggle { id } => commands::orders::toggle(&ctx, id)?,
            OrderAction::Delete { id } => commands::orders::delete(&ctx, id)?,
            OrderAction::Margin { id } => commands::orders::margin(&ctx, id)?,
        },
        Commands::Income { action } => match action {
            IncomeAction::Add {
                customer,
                amount,
                date,
                order,
                remarks,
            } => {
                commands::income::add(
                    &ctx,
                    &customer,
                    amount,
                    date.unwrap_or_else(today),
                    order,
                    remarks.as_deref(),
                )?;
            }
            IncomeAction::List { search } => {
                commands::income::list(&ctx, &IncomeFilter { search })?;
            }
            IncomeAction::Delete { id } => commands::income::delete(&ctx, id)?,
        },
        Commands::Expense { action } => match action {
            ExpenseAction::Add {
                item,
                amount,
                date,
                extra,
                remarks,
            } => {
                commands::expenses::add(
                    &ctx,
                    &item,
                    amount,
                    date.unwrap_or_else(today),
                    extra,
                    remarks.as_deref(),
                )?;
            }
            ExpenseAction::List { search, kind } => {
                commands::expenses::list(&ctx, &ExpenseFilter { search, kind })?;
            }
            ExpenseAction::Toggle { id } => commands::expenses::toggle(&ctx, id)?,
            ExpenseAction::Delete { id } => commands::expenses::delete(&ctx, id)?,
        },
        Commands::Material { action } => match action {
            MaterialAction::List => commands::materials::list(&ctx),
            MaterialAction::Add { name, unit, price } => {
                commands::materials::add(&ctx, &name, &unit, price)?;
            }
            MaterialAction::SetPrice { name, price } => {
                commands::materials::set_price(&ctx, &name, price)?;
            }
            MaterialAction::AddStock { name, quantity } => {
                commands::materials::add_stock(&ctx, &name, quantity)?;
            }
        },
        Commands::Batch { action } => match action {
            BatchAction::Estimate { weight } => commands::batches::estimate(&ctx, weight),
            BatchAction::Record { kg, date } => {
                commands::batches::record(&ctx, kg, date.unwrap_or_else(today))?;
            }
            BatchAction::List => commands::batches::list(&ctx)?,
        },
        Commands::Dashboard => commands::dashboard::show(&ctx)?,
    }
    Ok(())
}
