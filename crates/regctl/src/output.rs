use anyhow::Result;
use serde::Serialize;
use std::io::Write;

pub fn json<T: Serialize>(out: &mut dyn Write, value: &T) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

pub fn ok(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "ok")?;
    Ok(())
}

pub fn created(out: &mut dyn Write, what: &str) -> Result<()> {
    writeln!(out, "created: {}", what)?;
    Ok(())
}
