use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{ArgGroup, Args, Parser, Subcommand};

use stockmanager::config::Config;
use stockmanager::inventory::{Inventory, SubmitError};
use stockmanager::logging::init_tracing;
use stockmanager::record::{
    Category, FormMode, NewRecord, RecordForm, RecordPatch, DEFAULT_MIN_QUANTITY,
};
use stockmanager::remote::{HttpStore, RecordStore};
use stockmanager::view::{
    filter_by_status, render_detail, render_stats, render_table, StatusFilter,
};

#[derive(Parser)]
#[command(
    name = "stockmanager",
    version,
    about = "Stock inventory management over a hosted document store"
)]
struct Cli {
    /// Config file (default: ~/.config/stockmanager/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List records, newest first
    List {
        /// all, in-stock, low-stock or out-of-stock
        #[arg(long, short, default_value = "all")]
        filter: StatusFilter,
    },
    /// Show totals by stock status
    Stats,
    /// Search by name, SKU or category
    Search {
        text: String,
        /// all, in-stock, low-stock or out-of-stock
        #[arg(long, short, default_value = "all")]
        filter: StatusFilter,
    },
    /// Show one or more records in detail
    Show {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Create a record
    Add(AddArgs),
    /// Edit a record; only the given fields are sent to the store
    Edit(EditArgs),
    /// Delete a record
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Args)]
struct AddArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    sku: String,
    #[arg(long)]
    category: Category,
    #[arg(long, allow_negative_numbers = true)]
    quantity: i64,
    #[arg(long, default_value_t = i64::from(DEFAULT_MIN_QUANTITY), allow_negative_numbers = true)]
    min_quantity: i64,
    #[arg(long, allow_negative_numbers = true)]
    price: f64,
    #[arg(long)]
    supplier: Option<String>,
    #[arg(long)]
    description: Option<String>,
}

#[derive(Args)]
#[command(group(
    ArgGroup::new("changes")
        .required(true)
        .multiple(true)
        .args([
            "name",
            "sku",
            "category",
            "quantity",
            "min_quantity",
            "price",
            "supplier",
            "description",
        ])
))]
struct EditArgs {
    id: String,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    sku: Option<String>,
    #[arg(long)]
    category: Option<Category>,
    #[arg(long, allow_negative_numbers = true)]
    quantity: Option<i64>,
    #[arg(long, allow_negative_numbers = true)]
    min_quantity: Option<i64>,
    #[arg(long, allow_negative_numbers = true)]
    price: Option<f64>,
    /// Empty string clears the supplier
    #[arg(long)]
    supplier: Option<String>,
    /// Empty string clears the description
    #[arg(long)]
    description: Option<String>,
}

impl AddArgs {
    fn into_form(self) -> RecordForm {
        RecordForm {
            name: self.name,
            sku: self.sku,
            category: Some(self.category),
            quantity: self.quantity,
            min_quantity: self.min_quantity,
            price: self.price,
            supplier: self.supplier.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
        }
    }
}

impl EditArgs {
    /// Lays the given fields over a form prefilled from the stored record.
    fn overlay(&self, form: &mut RecordForm) {
        if let Some(name) = &self.name {
            form.name = name.clone();
        }
        if let Some(sku) = &self.sku {
            form.sku = sku.clone();
        }
        if let Some(category) = self.category {
            form.category = Some(category);
        }
        if let Some(quantity) = self.quantity {
            form.quantity = quantity;
        }
        if let Some(min_quantity) = self.min_quantity {
            form.min_quantity = min_quantity;
        }
        if let Some(price) = self.price {
            form.price = price;
        }
        if let Some(supplier) = &self.supplier {
            form.supplier = supplier.clone();
        }
        if let Some(description) = &self.description {
            form.description = description.clone();
        }
    }

    /// Patch with only the given fields, in their validated form.
    fn patch(&self, payload: NewRecord) -> RecordPatch {
        RecordPatch {
            name: self.name.as_ref().map(|_| payload.name.clone()),
            sku: self.sku.as_ref().map(|_| payload.sku.clone()),
            category: self.category.map(|_| payload.category),
            quantity: self.quantity.map(|_| payload.quantity),
            min_quantity: self.min_quantity.map(|_| payload.min_quantity),
            price: self.price.map(|_| payload.price),
            supplier: self
                .supplier
                .as_ref()
                .map(|_| payload.supplier.clone().unwrap_or_default()),
            description: self
                .description
                .as_ref()
                .map(|_| payload.description.clone().unwrap_or_default()),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => {
            if !path.exists() {
                bail!("Config file '{}' does not exist", path.display());
            }
            Config::load_from(&path)?
        }
        None => Config::load()?,
    };
    config.apply_env_overrides();
    config.validate()?;

    for warning in config.warnings() {
        tracing::warn!("{warning}");
    }
    Ok(config)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config)?;
    let store = HttpStore::new(&config)?;
    let inventory = Inventory::new(Arc::new(store));

    match cli.command {
        Command::List { filter } => {
            inventory.refresh().await?;
            inventory.select_filter(filter).await?;
            print_list(&inventory);
        }
        Command::Stats => {
            inventory.refresh().await?;
            let state = inventory.snapshot();
            println!("{}", render_stats(&state.counts(), &state.items));
        }
        Command::Search { text, filter } => {
            inventory.search(&text).await?;
            if filter != StatusFilter::All {
                // Filter locally without leaving search mode
                let state = inventory.snapshot();
                let matches = filter_by_status(&state.items, filter);
                println!("{}", render_stats(&state.counts(), &state.items));
                print!("{}", render_table(&matches));
                return Ok(());
            }
            print_list(&inventory);
        }
        Command::Show { ids } => {
            let records = if let [id] = ids.as_slice() {
                vec![inventory.detail(id).await?]
            } else {
                inventory.store().get_by_ids(&ids).await?
            };
            if records.is_empty() {
                bail!("No records found");
            }
            for record in &records {
                print!("{}", render_detail(record));
            }
        }
        Command::Add(args) => {
            let record = inventory
                .submit(FormMode::Create, &args.into_form())
                .await?;
            println!("Created {} ({})", record.name, record.id);
        }
        Command::Edit(args) => {
            // Validate the full overlaid form, send only the given fields
            let current = inventory.detail(&args.id).await?;
            let mut form = RecordForm::from_record(&current);
            args.overlay(&mut form);
            let payload = form.validate().map_err(SubmitError::from)?;
            let record = inventory.modify(&args.id, args.patch(payload)).await?;
            println!("Updated {} ({})", record.name, record.id);
        }
        Command::Delete { id, yes } => {
            if !yes {
                let record = inventory.detail(&id).await?;
                if !confirm(&format!("Delete '{}' ({})?", record.name, record.id))? {
                    println!("Cancelled");
                    return Ok(());
                }
            }
            inventory
                .remove(&id)
                .await
                .with_context(|| format!("Could not delete '{id}'"))?;
            println!("Deleted {id}");
        }
    }

    Ok(())
}

fn print_list<S: RecordStore>(inventory: &Inventory<S>) {
    let state = inventory.snapshot();
    println!("{}", render_stats(&state.counts(), &state.items));
    print!("{}", render_table(&state.visible_items()));
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
