// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Checklist catalog commands
//!
//! Prints the named `(status, extra)` configurations each checklist tab may
//! be in, per admission context.

use anyhow::Result;
use clap::{Subcommand, ValueEnum};
use colored::Colorize;
use std::fmt::Write;

use admission_core::domain::shared::checklist::{CatalogueChecklist, ConfigurationStatutChecklist};
use admission_core::domain::{doctorat, formation_continue, formation_generale};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ContexteArg {
    Doctorat,
    Generale,
    Continue,
}

impl ContexteArg {
    fn catalogue(self) -> &'static CatalogueChecklist {
        match self {
            Self::Doctorat => doctorat::checklist::catalogue(),
            Self::Generale => formation_generale::checklist::catalogue(),
            Self::Continue => formation_continue::checklist::catalogue(),
        }
    }
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// Show checklist configurations
    Show {
        /// Admission context (default: all)
        #[arg(long, value_enum)]
        context: Option<ContexteArg>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn handle_command(command: CatalogCommand) -> Result<()> {
    match command {
        CatalogCommand::Show { context, json } => {
            let catalogues: Vec<&CatalogueChecklist> = match context {
                Some(contexte) => vec![contexte.catalogue()],
                None => ContexteArg::value_variants().iter().map(|c| c.catalogue()).collect(),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&catalogues)?);
            } else {
                for catalogue in catalogues {
                    print!("{}", render(catalogue));
                }
            }
            Ok(())
        }
    }
}

fn ligne(config: &ConfigurationStatutChecklist) -> String {
    let statut = config
        .statut
        .map(|s| s.name().to_string())
        .unwrap_or_else(|| "-".to_string());
    let mut ligne = format!("    {:<28} {:<20} {}", config.identifiant, statut, config.libelle);
    if !config.extra.is_empty() {
        let extra: Vec<String> = config.extra.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        let _ = write!(ligne, " [{}]", extra.join(", "));
    }
    ligne
}

/// Human-readable listing of one catalog.
pub fn render(catalogue: &CatalogueChecklist) -> String {
    let mut sortie = String::new();
    let _ = writeln!(sortie, "{}", format!("Context: {}", catalogue.contexte).bold());
    for onglet in &catalogue.onglets {
        let _ = writeln!(sortie, "  {}", onglet.identifiant.cyan());
        for config in &onglet.statuts {
            let _ = writeln!(sortie, "{}", ligne(config));
        }
    }
    let _ = writeln!(sortie);
    sortie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_lists_every_tab() {
        colored::control::set_override(false);
        let catalogue = ContexteArg::Continue.catalogue();
        let sortie = render(catalogue);

        for onglet in &catalogue.onglets {
            assert!(sortie.contains(&onglet.identifiant));
        }
        assert!(sortie.contains("PRISE_EN_CHARGE"));
    }

    #[test]
    fn test_doctorate_catalog_has_cdd_decision() {
        colored::control::set_override(false);
        let sortie = render(ContexteArg::Doctorat.catalogue());
        assert!(sortie.contains("decision_cdd"));
        assert!(sortie.contains("CLOTURE"));
    }
}
