use anyhow::{Context, Result, bail};
use optenv_schema::OptionTable;
use std::fs;
use std::path::Path;

/// Read and parse an option table from a JSON file.
pub fn load_table(path: &Path) -> Result<OptionTable> {
    if !path.exists() {
        bail!("option table not found: {}", path.display());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read option table: {}", path.display()))?;
    let table = OptionTable::from_json_str(&contents)
        .with_context(|| format!("failed to parse option table JSON: {}", path.display()))?;

    if table.name.trim().is_empty() {
        bail!("option table has no name: {}", path.display());
    }

    Ok(table)
}
