use super::Dashboard;
use crate::Result;
use core::fmt::Write;

pub fn generate<W: Write>(dashboard: &Dashboard, writer: &mut W) -> Result<()> {
    writeln!(writer, "{}", serde_json::to_string_pretty(dashboard)?)?;
    Ok(())
}
