// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Access-title evaluation
//!
//! Evaluates the access-title matrix of a training type against the
//! conditions given with `--flag`, without any candidate record.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fmt::Write;

use admission_core::domain::shared::titres_acces::{
    matrix, AdmissionConditionsDTO, ConditionAcces, Titres, TrainingType,
};

#[derive(Args)]
pub struct TitresAccesArgs {
    /// Training type (e.g. BACHELOR, MASTER_M1, PHD)
    #[arg(value_name = "TRAINING_TYPE")]
    pub training_type: TrainingType,

    /// Access condition the candidate fulfils (repeatable)
    #[arg(long = "flag", value_name = "CONDITION")]
    pub flags: Vec<ConditionAcces>,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn handle_command(args: TitresAccesArgs) -> Result<()> {
    let titres = evaluer(args.training_type, &args.flags);
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "training_type": args.training_type,
                "valide": titres.est_valide(),
                "sans_condition": titres.sans_condition,
                "admissibles": titres.types,
                "remplies": titres.remplies(),
            }))?
        );
    } else {
        print!("{}", render(args.training_type, &titres));
    }
    Ok(())
}

pub fn evaluer(training_type: TrainingType, flags: &[ConditionAcces]) -> Titres {
    matrix().titres(training_type, AdmissionConditionsDTO::avec(flags))
}

pub fn render(training_type: TrainingType, titres: &Titres) -> String {
    let mut sortie = String::new();
    let _ = writeln!(sortie, "{}", format!("Training type: {}", training_type).bold());
    if titres.sans_condition {
        let _ = writeln!(sortie, "  {}", "No access condition required".dimmed());
    } else if titres.types.is_empty() {
        let _ = writeln!(sortie, "  {}", "No admissible condition in the matrix".dimmed());
    }
    for condition in &titres.types {
        if titres.conditions.flag(*condition) {
            let _ = writeln!(sortie, "  {} {}", "✓".green(), condition);
        } else {
            let _ = writeln!(sortie, "  {} {}", "·".dimmed(), condition);
        }
    }
    let verdict = if titres.est_valide() {
        "✓ Access granted".green()
    } else {
        "✗ No access title".red()
    };
    let _ = writeln!(sortie, "{}", verdict);
    sortie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bachelor_with_belgian_secondary_diploma() {
        let titres = evaluer(TrainingType::Bachelor, &[ConditionAcces::DiplomationSecondaireBelge]);
        assert!(titres.est_valide());
        assert_eq!(titres.remplies(), vec![ConditionAcces::DiplomationSecondaireBelge]);
    }

    #[test]
    fn test_bachelor_without_flags_has_no_title() {
        colored::control::set_override(false);
        let titres = evaluer(TrainingType::Bachelor, &[]);
        assert!(!titres.est_valide());
        assert!(render(TrainingType::Bachelor, &titres).contains("No access title"));
    }

    #[test]
    fn test_training_type_parses_from_cli_spelling() {
        let parsed: TrainingType = "master-m1".parse().unwrap();
        assert_eq!(parsed, TrainingType::MasterM1);
    }
}
