use serde::Serialize;

/// Print a serializable value as pretty JSON.
pub fn output<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
