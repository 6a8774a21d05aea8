//! Scan command

use anyhow::Result;
use qmlprov_core::Config;

use super::ScanSettings;
use crate::ScanArgs;

/// Run the scanner and print its output as pretty JSON.
///
/// # Errors
///
/// Fails if the scan fails.
pub fn scan(args: &ScanArgs, config: &Config) -> Result<()> {
    let settings = ScanSettings::resolve(args, config)?;
    let data = settings.scan()?;
    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}
