//! Reading and writing the ledger document.

use crate::error::{InventoryError, Result};
use crate::ledger::StockLedger;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Default location of the inventory document.
pub const DEFAULT_DATA_PATH: &str = "inventory.json";

/// Indentation used for the saved document.
const INDENT: &[u8] = b"    ";

/// Render a ledger as the indented JSON document written by [`save_ledger`].
pub fn to_pretty_json(ledger: &StockLedger) -> Result<String> {
    let mut buf = Vec::new();
    write_document(&mut buf, ledger)?;
    String::from_utf8(buf).map_err(|e| InventoryError::Serialization(e.to_string()))
}

/// Write the ledger to `path`, replacing any existing file.
pub fn save_ledger(path: impl AsRef<Path>, ledger: &StockLedger) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_document(&mut writer, ledger)?;
    writer.flush()?;

    tracing::debug!(
        path = %path.as_ref().display(),
        items = ledger.len(),
        "wrote inventory document"
    );
    Ok(())
}

/// Read a ledger from `path`.
///
/// Returns `Ok(None)` when the file does not exist. Malformed content is a
/// [`InventoryError::Parse`].
pub fn load_ledger(path: impl AsRef<Path>) -> Result<Option<StockLedger>> {
    let path = path.as_ref();

    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) if e.kind() == io::ErrorKind::InvalidData => {
            return Err(InventoryError::Parse(format!(
                "{} is not valid UTF-8: {}",
                path.display(),
                e
            )))
        }
        Err(e) => return Err(e.into()),
    };

    let ledger: StockLedger = serde_json::from_str(&text)
        .map_err(|e| InventoryError::Parse(format!("{}: {}", path.display(), e)))?;

    tracing::debug!(path = %path.display(), items = ledger.len(), "read inventory document");
    Ok(Some(ledger))
}

fn write_document<W: Write>(writer: &mut W, ledger: &StockLedger) -> Result<()> {
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut *writer, formatter);
    ledger.serialize(&mut serializer)?;
    writer.write_all(b"\n")?;
    Ok(())
}
