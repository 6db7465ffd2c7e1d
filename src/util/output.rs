#![allow(clippy::print_stdout)]

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/* Summary fields for --json, keyed so the document comes out in a stable
 * order regardless of when each field was set. */
static JSON_OUTPUT: Mutex<BTreeMap<String, Value>> = Mutex::new(BTreeMap::new());
static PRINT_OUTPUT: AtomicBool = AtomicBool::new(true);

/// Silences `outln!` when stdout is reserved for the JSON document.
pub fn set_should_print_output(should_print: bool) {
    PRINT_OUTPUT.store(should_print, Ordering::Relaxed);
}

pub fn print_output(printed_output: &str) {
    if PRINT_OUTPUT.load(Ordering::Relaxed) {
        println!("{}", printed_output);
    }
}

pub fn set_json_output(key: &str, value: &Value) {
    JSON_OUTPUT
        .lock()
        .expect("Failed to lock JSON_OUTPUT")
        .insert(key.to_string(), value.clone());
}

#[macro_export]
macro_rules! outln {
    ( $fmt:expr $(, $args:expr)*) => {
        $crate::util::print_output(&format!($fmt $(, $args)*))
    };
}

fn take_json_output() -> Value {
    let fields =
        std::mem::take(&mut *JSON_OUTPUT.lock().expect("Failed to lock JSON_OUTPUT"));
    Value::Object(fields.into_iter().collect::<Map<String, Value>>())
}

/// Prints every field set so far as one JSON object and clears them.
pub fn print_json_output() -> Result<()> {
    let document = take_json_output();
    println!(
        "{}",
        serde_json::to_string_pretty(&document).context("Error serializing JSON")?
    );
    Ok(())
}
