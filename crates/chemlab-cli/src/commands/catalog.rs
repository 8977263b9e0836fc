use crate::cli::{CatalogArgs, CatalogCommands};
use crate::error::Result;
use chemlab::core::catalog::Catalog;
use std::path::Path;
use tracing::info;

pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    let catalog = match path {
        Some(path) => {
            info!("Loading catalog from {:?}", path);
            Catalog::load(path)?
        }
        None => Catalog::builtin()?,
    };
    info!(
        "Catalog ready: {} elements, {} compounds, {} equipment items.",
        catalog.elements().len(),
        catalog.compounds().len(),
        catalog.equipment().len()
    );
    Ok(catalog)
}

pub async fn run(args: CatalogArgs) -> Result<()> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    for line in listing(&catalog, &args.command) {
        println!("{}", line);
    }
    Ok(())
}

fn listing(catalog: &Catalog, command: &CatalogCommands) -> Vec<String> {
    match command {
        CatalogCommands::Elements { search } => {
            let elements = match search {
                Some(term) => catalog.search_elements(term),
                None => catalog.elements().iter().collect(),
            };
            elements
                .into_iter()
                .map(|e| {
                    format!(
                        "{:<3} {:>3}  {:<12} {}",
                        e.symbol, e.atomic_number, e.name, e.category
                    )
                })
                .collect()
        }
        CatalogCommands::Compounds { search } => {
            let compounds = match search {
                Some(term) => catalog.search_compounds(term),
                None => catalog.compounds().iter().collect(),
            };
            compounds
                .into_iter()
                .map(|c| format!("{:<10} {:<24} {}", c.formula, c.name, c.kind))
                .collect()
        }
        CatalogCommands::Equipment { grade } => catalog
            .equipment_for_grade(*grade)
            .into_iter()
            .map(|e| {
                format!(
                    "{} {:<22} {:<12} {}",
                    e.icon, e.name, e.category, e.description
                )
            })
            .collect(),
    }
}
