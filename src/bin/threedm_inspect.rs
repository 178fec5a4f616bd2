//! Print a summary of a .3dm document: layers, object kinds and what the
//! generic conversion makes of them.
//!
//! Usage: threedm-inspect <file.3dm>

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use threedm_bridge::io::Reader3dm;
use threedm_bridge::{ConvertConfig, Converter, NotificationCollection, NotificationType};

fn main() -> Result<()> {
    let mut args = std::env::args_os().skip(1);
    let Some(path) = args.next().map(PathBuf::from) else {
        bail!("usage: threedm-inspect <file.3dm>");
    };

    let doc = Reader3dm::from_file(&path)
        .and_then(Reader3dm::read)
        .with_context(|| format!("failed to read {}", path.display()))?;

    println!("{}", path.display());
    println!("  version      {}", doc.version);
    println!("  application  {}", doc.application_name);
    if !doc.notes.is_empty() {
        println!("  notes        {}", doc.notes);
    }

    println!("\nLayers ({}):", doc.layers.len());
    for layer in doc.layers.iter() {
        let mut state = Vec::new();
        if !layer.visible {
            state.push("hidden");
        }
        if layer.locked {
            state.push("locked");
        }
        println!("  {:>3}  {:<30} {}  {}", layer.index, layer.name, layer.color, state.join(", "));
    }

    let converter = Converter::new(ConvertConfig::default().with_version(doc.version));
    let mut log = NotificationCollection::new();
    let mut kinds: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for object in doc.objects() {
        let entry = kinds.entry(object.geometry.kind_name()).or_default();
        entry.0 += 1;
        if converter.to_generic(&object.geometry, &mut log).is_some() {
            entry.1 += 1;
        }
    }

    println!("\nObjects ({}):", doc.object_count());
    for (kind, (count, converted)) in &kinds {
        println!("  {kind:<24} {count:>6}   converted {converted:>6}");
    }

    log.extend(doc.notifications.clone());
    if !log.is_empty() {
        println!("\nNotifications:");
        for note in log.iter() {
            println!("  {note}");
        }
    }

    let errors = log.of_type(NotificationType::Error).len();
    println!("\n--- Summary ---");
    println!("Objects: {}, errors: {errors}", doc.object_count());
    Ok(())
}
