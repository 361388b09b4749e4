use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use cubby::{KeyValueStore, MemoryStore};

/// Keys whose values are stored as raw strings rather than JSON.
const RAW_VALUE_PREFIXES: &[&str] = &["currentWord_"];

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: {} <path-to-storage-snapshot>", args[0]);
        eprintln!("\nExample: {} ./local-storage.json", args[0]);
        eprintln!("\nThe snapshot is a JSON object of key to string value, e.g. the output of");
        eprintln!("`JSON.stringify({{...localStorage}})` in the browser console.");
        std::process::exit(1);
    }

    let file_path = PathBuf::from(&args[1]);

    if !file_path.exists() {
        eprintln!("Error: File '{}' does not exist", file_path.display());
        std::process::exit(1);
    }

    let mut file = match File::open(&file_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error opening file '{}': {}", file_path.display(), e);
            std::process::exit(1);
        }
    };

    let mut contents = String::new();
    if let Err(e) = file.read_to_string(&mut contents) {
        eprintln!("Error reading file '{}': {}", file_path.display(), e);
        std::process::exit(1);
    }

    let store: MemoryStore = match serde_json::from_str(&contents) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: snapshot is not a JSON object of strings: {e}");
            std::process::exit(1);
        }
    };

    println!("CubbyScope - Local Storage Snapshot Analyzer");
    println!("============================================");
    println!("File: {}", file_path.display());
    println!(
        "Size: {} bytes ({:.2} KB)",
        contents.len(),
        contents.len() as f64 / 1024.0
    );
    println!("Keys: {}", store.len());
    println!();

    if store.is_empty() {
        println!("  Snapshot is empty");
        return;
    }

    // Group by prefix, so `shownWords_french` and `shownWords_german` land together
    let mut keys_by_group: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for key in store.keys() {
        let group = match key.split_once('_') {
            Some((prefix, _)) => format!("{prefix}_*"),
            None => key.clone(),
        };
        keys_by_group.entry(group).or_default().push(key);
    }

    let mut malformed = 0;
    for (group, keys) in &keys_by_group {
        println!("  {group}");
        println!("  -------");
        for key in keys {
            let Some(value) = store.get(key) else {
                continue;
            };
            let raw = RAW_VALUE_PREFIXES
                .iter()
                .any(|prefix| key.starts_with(prefix));
            let status = if raw {
                "raw string".to_string()
            } else {
                match serde_json::from_str::<serde_json::Value>(&value) {
                    Ok(serde_json::Value::Array(items)) => {
                        format!("✅ JSON array, {} items", items.len())
                    }
                    Ok(serde_json::Value::Object(fields)) => {
                        format!("✅ JSON object, {} fields", fields.len())
                    }
                    Ok(_) => "✅ JSON scalar".to_string(),
                    Err(e) => {
                        malformed += 1;
                        format!("❌ not valid JSON ({e})")
                    }
                }
            };
            println!("    {key}: {} bytes, {status}", value.len());
        }
        println!();
    }

    println!("Summary:");
    println!("--------");
    if malformed == 0 {
        println!("  ✅ All JSON values parse");
    } else {
        println!("  ❌ {malformed} value(s) failed to parse and will be read as empty");
    }
}
