//! Print a class override chain
//!
//! Walks the parent links of a class from the class itself up to its root
//! ancestor and lists the raw assignments each class contributes.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use crate::utils;

/// Print a class override chain and its raw assignments
#[derive(Parser)]
pub struct Chain {
    /// Class name to inspect (e.g., rep_inf_ep3_rifleman)
    #[arg(value_name = "CLASS")]
    class: String,

    /// Content data directory
    #[arg(short, long, value_name = "DIR", default_value = "./data")]
    data_dir: PathBuf,
}

impl Chain {
    pub fn execute(self) -> Result<()> {
        let factory = utils::open_factory(&self.data_dir)?;
        let classes = factory.load_classes()?;

        let chain = classes
            .chain(&self.class)
            .with_context(|| format!("Class not found: {}", self.class))?;

        println!("{}", style(format!("Class chain: {}", self.class)).bold().cyan());
        println!("  {} {}", style("Depth:").bold(), chain.depth());
        println!(
            "  {} {}",
            style("Path:").bold(),
            chain.names().collect::<Vec<_>>().join(" -> ")
        );
        println!();

        for class in chain.classes() {
            let header = match &class.parent {
                Some(parent) => format!("{} (parent: {})", class.name, parent),
                None => class.name.clone(),
            };
            println!("{}", style(header).bold().yellow());

            if class.properties.is_empty() {
                println!("  {}", style("(no assignments)").dim());
            }
            for (name, value) in &class.properties {
                println!("  {} = {}", style(name).bold(), value);
            }
            println!();
        }

        Ok(())
    }
}
