//! Bind a class against its entity property set
//!
//! Loads the data directory, binds the class chain into the property set of
//! the chosen entity kind, optionally spawns a named instance, and prints
//! every resulting property.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;

use game_content::{
    ClassProperties, ContentResolver, EntityClass, Grenade, Instance, Soldier,
};
use game_props::BindReport;

use crate::utils;

/// Bind a class (and optionally an instance) and print every property
#[derive(Parser)]
pub struct Bind {
    /// Entity kind whose property set to bind
    #[arg(value_enum)]
    kind: EntityKind,

    /// Class name to bind (e.g., rep_inf_ep3_rifleman)
    #[arg(value_name = "CLASS")]
    class: String,

    /// Instance to spawn from the bound class
    #[arg(short, long, value_name = "NAME")]
    instance: Option<String>,

    /// Content data directory
    #[arg(short, long, value_name = "DIR", default_value = "./data")]
    data_dir: PathBuf,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum EntityKind {
    /// Infantry unit
    Soldier,
    /// Thrown explosive
    Grenade,
}

impl Bind {
    pub fn execute(self) -> Result<()> {
        match self.kind {
            EntityKind::Soldier => self.run::<Soldier>(),
            EntityKind::Grenade => self.run::<Grenade>(),
        }
    }

    fn run<E: EntityClass>(&self) -> Result<()> {
        let factory = utils::open_factory(&self.data_dir)?;
        let classes = factory.load_classes()?;
        let scene = factory.load_scene()?;
        let assets = factory.asset_cache();
        let resolver = ContentResolver::new(&classes, &scene, &assets);

        let chain = classes
            .chain(&self.class)
            .with_context(|| format!("Class not found: {}", self.class))?;
        let bound = ClassProperties::<E>::bind(&chain, &resolver);

        println!(
            "{}",
            style(format!("{} class: {}", E::LABEL, bound.name())).bold().cyan()
        );
        utils::print_registry(bound.properties(), 2);
        print_report(bound.report());

        let Some(instance_name) = &self.instance else {
            return Ok(());
        };

        let instances = factory.load_instances()?;
        let def = instances
            .iter()
            .find(|def| def.name.eq_ignore_ascii_case(instance_name))
            .with_context(|| format!("Instance not found: {}", instance_name))?;
        let instance = Instance::spawn(&bound, def, &resolver);

        println!();
        println!(
            "{}",
            style(format!("Instance: {} ({})", instance.name(), instance.class_name()))
                .bold()
                .cyan()
        );
        utils::print_registry(instance.properties(), 2);
        print_report(instance.report());

        Ok(())
    }
}

fn print_report(report: &BindReport) {
    println!();
    println!(
        "  {} {} applied, {} unset, {} failed",
        style("Bind:").bold(),
        report.applied,
        report.unset,
        report.failed.len()
    );
    for (name, error) in &report.failed {
        println!("    {} {}: {}", style("✗").red(), name, error);
    }
}
