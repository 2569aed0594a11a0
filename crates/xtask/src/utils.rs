//! Utility functions for xtask commands

use anyhow::{Context, Result};
use console::style;
use game_content::ContentFactory;
use game_props::{PropertyHandle, PropertyRegistry};
use std::path::Path;

/// Open the content data directory, reading its `config.toml` if present
pub fn open_factory(data_dir: &Path) -> Result<ContentFactory> {
    if !data_dir.is_dir() {
        anyhow::bail!(
            "Data directory does not exist: {}\n\
             Pass --data-dir to point at a content directory.",
            data_dir.display()
        );
    }

    ContentFactory::open(data_dir)
        .with_context(|| format!("Failed to open content directory: {}", data_dir.display()))
}

/// Print every property of a registry, one per line, in declaration order
pub fn print_registry(registry: &PropertyRegistry, indent: usize) {
    let pad = " ".repeat(indent);

    for (name, handle) in registry.iter() {
        match handle {
            PropertyHandle::Multi(multi) => {
                println!(
                    "{pad}{} {}",
                    style(name).bold(),
                    style(format!("[{} rows]", multi.len())).dim()
                );
                for row in multi.rows() {
                    let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
                    println!("{pad}  - {}", cells.join(" "));
                }
            }
            PropertyHandle::Section(section) => {
                println!(
                    "{pad}{} {}",
                    style(name).bold(),
                    style(format!("[{} entries]", section.len())).dim()
                );
                for (index, entry) in section.entries().iter().enumerate() {
                    println!("{pad}  {}", style(format!("#{}", index + 1)).yellow());
                    print_registry(entry, indent + 4);
                }
            }
            scalar => {
                let tag = scalar.tag().map(|tag| tag.to_string()).unwrap_or_default();
                println!("{pad}{} = {} {}", style(name).bold(), scalar, style(tag).dim());
            }
        }
    }
}
