use crate::domain::models::JsonOut;
use crate::registry::RegistryError;
use serde::Serialize;

pub fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}

pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        println!("{}", row(&data));
    }
    Ok(())
}

/// Error counterpart of the `{ ok, data }` envelope. Codes stay stable so
/// callers can branch on them.
pub fn error_envelope(e: &anyhow::Error) -> serde_json::Value {
    serde_json::json!({
        "ok": false,
        "error": {
            "code": error_code(e),
            "message": e.to_string()
        }
    })
}

pub fn print_err(json: bool, e: &anyhow::Error) {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&error_envelope(e)).unwrap_or_default()
        );
    } else {
        eprintln!("error: {:#}", e);
    }
}

fn error_code(e: &anyhow::Error) -> &'static str {
    match e.downcast_ref::<RegistryError>() {
        Some(RegistryError::Unavailable(_)) => "REGISTRY_UNAVAILABLE",
        Some(RegistryError::EntryNotFound(_)) => "NOT_REVIEWED",
        None => "ERROR",
    }
}
