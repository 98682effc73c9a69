//! stockpile: command-line front end for the inventory.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use stockpile::{
    init_logging, Inventory, InventoryConfig, LogConfig, LogDestination, Quantity, Removal,
    DEFAULT_LOW_STOCK_THRESHOLD,
};
use tracing::info;

/// Track item quantities in a JSON inventory file.
#[derive(Parser, Debug)]
#[command(name = "stockpile")]
#[command(about = "Track item quantities in a JSON inventory file")]
struct Args {
    /// Inventory document
    #[arg(long, default_value = stockpile::persistence::DEFAULT_DATA_PATH)]
    data: PathBuf,

    /// Diagnostic log file (appended)
    #[arg(long, default_value = stockpile::telemetry::DEFAULT_LOG_PATH)]
    log_file: PathBuf,

    /// Write diagnostics to stderr instead of the log file
    #[arg(long)]
    log_stderr: bool,

    /// Log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Low-stock threshold
    #[arg(long, default_value_t = DEFAULT_LOW_STOCK_THRESHOLD, allow_negative_numbers = true)]
    threshold: Quantity,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add units of an item (negative amounts allowed)
    Add {
        item: String,
        #[arg(allow_negative_numbers = true)]
        quantity: Quantity,
    },

    /// Remove units of an item, deleting it at zero or below
    Remove {
        item: String,
        #[arg(allow_negative_numbers = true)]
        quantity: Quantity,
    },

    /// Print the quantity of an item
    Get { item: String },

    /// List items below the threshold
    LowStock {
        #[arg(long, allow_negative_numbers = true)]
        threshold: Option<Quantity>,
    },

    /// Print every item and its quantity
    Report,

    /// Run the demonstration sequence against the data file
    Demo,
}

impl Args {
    fn config(&self) -> InventoryConfig {
        let destination = if self.log_stderr {
            LogDestination::Stderr
        } else {
            LogDestination::File(self.log_file.clone())
        };

        InventoryConfig {
            data_path: self.data.clone(),
            low_stock_threshold: self.threshold,
            log: LogConfig {
                destination,
                filter: self.log_level.clone(),
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = args.config();

    init_logging(&config.log).context("failed to initialize logging")?;

    let mut inventory = Inventory::open(config.clone())
        .with_context(|| format!("failed to load {}", config.data_path.display()))?;

    let stdout = io::stdout();
    let stderr = io::stderr();
    run(args.command, &mut inventory, &mut stdout.lock(), &mut stderr.lock())
}

/// Execute one subcommand against a loaded inventory.
///
/// Mutations are saved to the configured data path. Skipped operations are
/// reported on `err` and do not fail the command.
fn run(
    command: Command,
    inventory: &mut Inventory,
    out: &mut impl Write,
    err: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Command::Add { item, quantity } => {
            if let Some(entry) = recoverable(inventory.add(&item, quantity), err)? {
                writeln!(out, "{}", entry)?;
                save(inventory)?;
            }
        }
        Command::Remove { item, quantity } => {
            if let Some(removal) = recoverable(inventory.remove(&item, quantity), err)? {
                match removal {
                    Removal::Depleted => writeln!(out, "{} removed", item)?,
                    Removal::Remaining(left) => writeln!(out, "{} remaining: {}", item, left)?,
                }
                save(inventory)?;
            }
        }
        Command::Get { item } => {
            writeln!(out, "{}", inventory.quantity(&item))?;
        }
        Command::LowStock { threshold } => {
            let items = match threshold {
                Some(threshold) => inventory.low_stock(threshold),
                None => inventory.low_stock_default(),
            };
            for item in items {
                writeln!(out, "{}", item)?;
            }
        }
        Command::Report => {
            write!(out, "{}", inventory.report())?;
        }
        Command::Demo => demo(inventory, out, err)?,
    }

    Ok(())
}

/// Report a skipped operation on `err`; pass fatal errors through.
fn recoverable<T>(
    result: stockpile::Result<T>,
    err: &mut impl Write,
) -> anyhow::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_recoverable() => {
            writeln!(err, "skipped: {}", e)?;
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn save(inventory: &Inventory) -> anyhow::Result<()> {
    inventory
        .save_default()
        .with_context(|| format!("failed to save {}", inventory.config().data_path.display()))
}

fn demo(
    inventory: &mut Inventory,
    out: &mut impl Write,
    err: &mut impl Write,
) -> anyhow::Result<()> {
    recoverable(inventory.add("apple", 10), err)?;
    recoverable(inventory.add("banana", -2), err)?;
    // Rejected: empty item name.
    recoverable(inventory.add("", 10), err)?;
    recoverable(inventory.remove("apple", 3), err)?;
    recoverable(inventory.remove("orange", 1), err)?;

    info!("Apple stock: {}", inventory.quantity("apple"));
    info!("Low items: {:?}", inventory.low_stock_default());

    save(inventory)?;
    inventory
        .load_default()
        .context("failed to reload inventory")?;
    write!(out, "{}", inventory.report())?;

    info!("Program execution completed successfully.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    fn open(dir: &TempDir) -> Inventory {
        let config = InventoryConfig {
            data_path: dir.path().join("inventory.json"),
            ..InventoryConfig::default()
        };
        Inventory::open(config).unwrap()
    }

    /// Run a command line, returning (stdout, stderr).
    fn exec(inventory: &mut Inventory, argv: &[&str]) -> (String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        run(parse(argv).command, inventory, &mut out, &mut err).unwrap();
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    // --- Mutations ---

    #[test]
    fn test_add_prints_audit_line_and_saves() {
        let dir = TempDir::new().unwrap();
        let mut inventory = open(&dir);

        let (out, err) = exec(&mut inventory, &["stockpile", "add", "apple", "10"]);

        assert!(out.trim_end().ends_with(": Added 10 of apple"));
        assert!(err.is_empty());
        assert_eq!(open(&dir).quantity("apple"), 10);
    }

    #[test]
    fn test_remove_saves_remaining_and_depleted() {
        let dir = TempDir::new().unwrap();
        let mut inventory = open(&dir);
        exec(&mut inventory, &["stockpile", "add", "apple", "10"]);

        let (out, _) = exec(&mut inventory, &["stockpile", "remove", "apple", "3"]);
        assert_eq!(out, "apple remaining: 7\n");
        assert_eq!(open(&dir).quantity("apple"), 7);

        let (out, _) = exec(&mut inventory, &["stockpile", "remove", "apple", "7"]);
        assert_eq!(out, "apple removed\n");
        assert!(!open(&dir).contains("apple"));
    }

    #[test]
    fn test_negative_amount_parses() {
        let dir = TempDir::new().unwrap();
        let mut inventory = open(&dir);

        exec(&mut inventory, &["stockpile", "add", "banana", "-2"]);
        assert_eq!(open(&dir).quantity("banana"), -2);
    }

    // --- Skipped operations ---

    #[test]
    fn test_remove_missing_reports_on_stderr() {
        let dir = TempDir::new().unwrap();
        let mut inventory = open(&dir);
        exec(&mut inventory, &["stockpile", "add", "apple", "1"]);

        let (out, err) = exec(&mut inventory, &["stockpile", "remove", "orange", "1"]);

        assert!(out.is_empty());
        assert_eq!(err, "skipped: Item not found: orange\n");
        assert_eq!(open(&dir).quantity("apple"), 1);
    }

    #[test]
    fn test_invalid_add_does_not_save() {
        let dir = TempDir::new().unwrap();
        let mut inventory = open(&dir);

        let (out, err) = exec(&mut inventory, &["stockpile", "add", "", "4"]);

        assert!(out.is_empty());
        assert!(err.starts_with("skipped: Invalid input: "));
        assert!(!dir.path().join("inventory.json").exists());
    }

    // --- Queries ---

    #[test]
    fn test_low_stock_threshold_flag() {
        let dir = TempDir::new().unwrap();
        let mut inventory = open(&dir);
        exec(&mut inventory, &["stockpile", "add", "apple", "10"]);
        exec(&mut inventory, &["stockpile", "add", "pear", "4"]);

        let (out, _) = exec(&mut inventory, &["stockpile", "low-stock"]);
        assert_eq!(out, "pear\n");

        let (out, _) = exec(&mut inventory, &["stockpile", "low-stock", "--threshold", "11"]);
        assert_eq!(out, "apple\npear\n");

        let (out, _) = exec(&mut inventory, &["stockpile", "low-stock", "--threshold", "-1"]);
        assert!(out.is_empty());
    }

    #[test]
    fn test_get_and_report() {
        let dir = TempDir::new().unwrap();
        let mut inventory = open(&dir);
        exec(&mut inventory, &["stockpile", "add", "apple", "3"]);

        assert_eq!(exec(&mut inventory, &["stockpile", "get", "apple"]).0, "3\n");
        assert_eq!(exec(&mut inventory, &["stockpile", "get", "fig"]).0, "0\n");
        assert_eq!(
            exec(&mut inventory, &["stockpile", "report"]).0,
            "Items Report:\napple -> 3\n"
        );
    }

    #[test]
    fn test_global_flags_map_to_config() {
        let args = parse(&[
            "stockpile",
            "--data",
            "stock.json",
            "--log-stderr",
            "--threshold",
            "-3",
            "report",
        ]);
        let config = args.config();

        assert_eq!(config.data_path, PathBuf::from("stock.json"));
        assert_eq!(config.low_stock_threshold, -3);
        assert_eq!(config.log.destination, LogDestination::Stderr);
        assert_eq!(config.log.filter, "info");
    }

    // --- Demo ---

    #[test]
    fn test_demo_sequence() {
        let dir = TempDir::new().unwrap();
        let mut inventory = open(&dir);

        let (out, err) = exec(&mut inventory, &["stockpile", "demo"]);

        assert_eq!(out, "Items Report:\napple -> 7\nbanana -> -2\n");

        // The empty-name add is skipped before the missing orange removal.
        let skipped: Vec<&str> = err.lines().collect();
        assert_eq!(skipped.len(), 2);
        assert!(skipped[0].starts_with("skipped: Invalid input: "));
        assert_eq!(skipped[1], "skipped: Item not found: orange");

        let reloaded = open(&dir);
        let items: Vec<(String, Quantity)> = reloaded
            .iter()
            .map(|(item, quantity)| (item.to_string(), quantity))
            .collect();
        assert_eq!(items, vec![("apple".to_string(), 7), ("banana".to_string(), -2)]);
    }
}
