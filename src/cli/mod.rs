use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use crate::application::{Ledger, load_theme, save_theme};
use crate::domain::{
    Category, CategoryFilter, Cents, Theme, TransactionInput, TransactionType, format_signed_amount,
    parse_cents,
};
use crate::storage::SqliteStore;

pub mod render;

use render::{render_summary, render_transaction, render_transactions};

/// Pocketbook - Income and Expense Ledger
#[derive(Parser)]
#[command(name = "pocketbook")]
#[command(about = "A local-first income and expense ledger")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "pocketbook.db")]
    pub database: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Record a new income or expense
    Add {
        /// Amount (e.g., "4.50" or "2000"); the sign comes from --type
        amount: String,

        /// Description of the transaction
        #[arg(short, long)]
        description: String,

        /// Type: income, expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: String,

        /// Category: food, transport, shopping, bills, entertainment, healthcare, education, other
        #[arg(short, long, default_value = "other")]
        category: String,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Edit an existing transaction; omitted fields keep their current value
    Edit {
        /// Transaction ID
        id: String,

        /// New amount
        #[arg(short, long)]
        amount: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New type: income, expense
        #[arg(short = 't', long = "type")]
        kind: Option<String>,

        /// New category
        #[arg(short, long)]
        category: Option<String>,

        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },

    /// Show detailed transaction information
    Show {
        /// Transaction ID
        id: String,
    },

    /// List transactions, newest first
    List {
        /// Category to show, or "all"
        #[arg(short, long, default_value = CategoryFilter::ALL_SENTINEL)]
        category: String,
    },

    /// Show balance, income and expense totals
    Summary,

    /// Export transactions
    Export {
        /// Format: json, csv
        format: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Category to export (csv only), or "all"
        #[arg(short, long, default_value = CategoryFilter::ALL_SENTINEL)]
        category: String,
    },

    /// Import transactions from a JSON export
    Import {
        /// Input file (stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,

        /// Preview without importing
        #[arg(long)]
        dry_run: bool,

        /// Skip records whose id already exists
        #[arg(long)]
        skip_duplicates: bool,
    },

    /// Show or set the color theme
    Theme {
        /// light or dark (omit to show the current theme)
        value: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Init => {
                SqliteStore::create_at(&self.database).await?;
                println!("Database initialized: {}", self.database);
            }

            Commands::Add {
                amount,
                description,
                kind,
                category,
                date,
            } => {
                let mut ledger = open_ledger(&self.database).await?;
                let input = TransactionInput {
                    description,
                    amount: parse_amount(&amount)?,
                    kind: parse_kind(&kind)?,
                    category: parse_category(&category)?,
                    date: match date {
                        Some(d) => parse_date(&d)?,
                        None => Local::now().date_naive(),
                    },
                };

                let transaction = ledger.submit(None, input).await?;
                println!(
                    "Added transaction: {} {} ({})",
                    transaction.description,
                    format_signed_amount(transaction.amount),
                    transaction.id
                );
            }

            Commands::Edit {
                id,
                amount,
                description,
                kind,
                category,
                date,
            } => {
                let mut ledger = open_ledger(&self.database).await?;
                let current = ledger
                    .get(&id)
                    .with_context(|| format!("Transaction not found: {}", id))?;

                // Start from the record's own values, like a pre-filled form
                let mut input = TransactionInput::from_transaction(current);
                if let Some(amount) = amount {
                    input.amount = parse_amount(&amount)?;
                }
                if let Some(description) = description {
                    input.description = description;
                }
                if let Some(kind) = kind {
                    input.kind = parse_kind(&kind)?;
                }
                if let Some(category) = category {
                    input.category = parse_category(&category)?;
                }
                if let Some(date) = date {
                    input.date = parse_date(&date)?;
                }

                let transaction = ledger.submit(Some(id.as_str()), input).await?;
                print!("{}", render_transaction(&transaction));
            }

            Commands::Delete { id } => {
                let mut ledger = open_ledger(&self.database).await?;
                match ledger.delete(&id).await? {
                    Some(removed) => println!("Deleted transaction: {}", removed.description),
                    None => println!("No transaction with id {}", id),
                }
            }

            Commands::Show { id } => {
                let ledger = open_ledger(&self.database).await?;
                let transaction = ledger
                    .get(&id)
                    .with_context(|| format!("Transaction not found: {}", id))?;
                print!("{}", render_transaction(transaction));
            }

            Commands::List { category } => {
                let ledger = open_ledger(&self.database).await?;
                let transactions = ledger.list(&CategoryFilter::parse(&category));
                print!("{}", render_transactions(&transactions));
            }

            Commands::Summary => {
                let ledger = open_ledger(&self.database).await?;
                print!("{}", render_summary(&ledger.summary()));
            }

            Commands::Export {
                format,
                output,
                category,
            } => {
                let ledger = open_ledger(&self.database).await?;
                run_export_command(&ledger, &format, output.as_deref(), &category)?;
            }

            Commands::Import {
                input,
                dry_run,
                skip_duplicates,
            } => {
                let mut ledger = open_ledger(&self.database).await?;
                run_import_command(&mut ledger, input.as_deref(), dry_run, skip_duplicates)
                    .await?;
            }

            Commands::Theme { value } => {
                let store = open_store(&self.database).await?;
                run_theme_command(&store, value).await?;
            }
        }

        Ok(())
    }
}

async fn open_store(database: &str) -> Result<SqliteStore> {
    SqliteStore::open_at(database)
        .await
        .with_context(|| format!("Cannot open '{}'. Run `pocketbook init` first", database))
}

async fn open_ledger(database: &str) -> Result<Ledger<SqliteStore>> {
    let store = open_store(database).await?;
    Ok(Ledger::load(store).await?)
}

async fn run_theme_command(store: &SqliteStore, value: Option<String>) -> Result<()> {
    match value {
        Some(value) => {
            let theme = Theme::from_str(&value).with_context(|| {
                format!("Invalid theme '{}'. Valid themes: light, dark", value)
            })?;
            save_theme(store, theme).await?;
            println!("Theme set to {}", theme);
        }
        None => println!("{}", load_theme(store).await?),
    }
    Ok(())
}

fn run_export_command(
    ledger: &Ledger<SqliteStore>,
    format: &str,
    output: Option<&str>,
    category: &str,
) -> Result<()> {
    use crate::io::Exporter;
    use std::fs::File;
    use std::io::{Write, stdout};

    let exporter = Exporter::new(ledger);

    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    let count = match format {
        "json" => exporter.export_json(writer)?,
        "csv" => exporter.export_csv(writer, &CategoryFilter::parse(category))?,
        _ => anyhow::bail!("Invalid export format '{}'. Valid formats: json, csv", format),
    };

    if output.is_some() {
        eprintln!("Exported {} transactions", count);
    }
    Ok(())
}

async fn run_import_command(
    ledger: &mut Ledger<SqliteStore>,
    input: Option<&str>,
    dry_run: bool,
    skip_duplicates: bool,
) -> Result<()> {
    use crate::io::{ImportOptions, Importer};
    use std::fs::File;
    use std::io::{Read, stdin};

    let reader: Box<dyn Read> = match input {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("Failed to open input file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdin()),
    };

    let options = ImportOptions {
        dry_run,
        skip_duplicates,
    };
    let result = Importer::new(ledger).import_json(reader, options).await?;

    if dry_run {
        println!("Dry run: {} transaction(s) would be imported", result.imported);
    } else {
        println!("Imported {} transaction(s)", result.imported);
    }
    if result.skipped > 0 {
        println!("Skipped {} duplicate(s)", result.skipped);
    }
    if !result.errors.is_empty() {
        println!("{} record(s) rejected:", result.errors.len());
        for error in &result.errors {
            println!(
                "  #{} ({}): {}",
                error.index,
                error.id.as_deref().unwrap_or("no id"),
                error.error
            );
        }
    }
    Ok(())
}

fn parse_amount(amount: &str) -> Result<Cents> {
    parse_cents(amount)
        .with_context(|| format!("Invalid amount '{}'. Use '4.50' or '2000'", amount))
}

fn parse_kind(kind: &str) -> Result<TransactionType> {
    TransactionType::from_str(kind)
        .with_context(|| format!("Invalid type '{}'. Valid types: income, expense", kind))
}

/// Only the closed set of categories can be entered from the command line.
fn parse_category(category: &str) -> Result<String> {
    let parsed = Category::from_str(category).with_context(|| {
        let valid: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        format!(
            "Invalid category '{}'. Valid categories: {}",
            category,
            valid.join(", ")
        )
    })?;
    Ok(parsed.as_str().to_string())
}

fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .with_context(|| format!("Invalid date format '{}'. Use YYYY-MM-DD", date_str))
}
