//! Code command: show how a kinship code reads as atomic steps

use clap::Args;
use kinnet_core::step::render_path;
use kinnet_core::{
    reciprocal_path, AtomicStep, KinshipCode, KinshipCodeId, KinshipCounts, KinshipSource,
    MourningPolicy, RelationClassifier, TermSimplifier, WeightedMourningPolicy,
};
use kinnet_storage::SqliteStorage;
use serde::Serialize;

use crate::config::Config;
use crate::output::{format_json, OutputFormat};
use crate::Cli;

#[derive(Args)]
pub struct CodeArgs {
    /// Numeric code (looked up in the database) or an abbreviation such as FB+S
    pub code: String,
}

/// How one kinship code is classified
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<KinshipCodeId>,
    pub kin_rel: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kin_rel_chn: Option<String>,
    pub steps: Vec<AtomicStep>,
    pub relationship_path: String,
    /// The same relation read from the other person's side
    pub reciprocal_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simplified_term: Option<String>,
    pub counts: KinshipCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mourning_degree: Option<u8>,
    pub low_confidence: bool,
}

impl CodeReport {
    pub fn new(
        code: Option<&KinshipCode>,
        kin_rel: &str,
        steps: Vec<AtomicStep>,
        simplifier: &TermSimplifier,
    ) -> Self {
        let counts = KinshipCounts::from_steps(&steps);
        Self {
            code: code.map(|c| c.code),
            kin_rel: kin_rel.to_string(),
            kin_rel_chn: code.and_then(|c| c.kin_rel_chn.clone()),
            relationship_path: render_path(&steps),
            reciprocal_path: render_path(&reciprocal_path(&steps)),
            simplified_term: simplifier.simplify(&steps).map(str::to_string),
            mourning_degree: WeightedMourningPolicy::default()
                .degree_of(&KinshipCounts::for_mourning(&steps)),
            low_confidence: steps.iter().any(|s| s.is_unknown()),
            counts,
            steps,
        }
    }

    fn to_text(&self) -> String {
        let mut lines = Vec::new();
        let heading = match (&self.code, &self.kin_rel_chn) {
            (Some(code), Some(chn)) => format!("Code {}: {} {}", code, self.kin_rel, chn),
            (Some(code), None) => format!("Code {}: {}", code, self.kin_rel),
            (None, _) => format!("Abbreviation: {}", self.kin_rel),
        };
        lines.push(heading);

        let names: Vec<String> = self.steps.iter().map(|s| format!("{:?}", s)).collect();
        lines.push(format!("  Steps: {} ({})", self.relationship_path, names.join(", ")));
        lines.push(format!("  Reciprocal: {}", self.reciprocal_path));
        if let Some(term) = &self.simplified_term {
            lines.push(format!("  Term: {}", term));
        }
        lines.push(format!(
            "  Generations: +{} / -{}, collateral: {}, marriage: {}",
            self.counts.generations_up,
            self.counts.generations_down,
            self.counts.collateral_steps,
            self.counts.marriage_links
        ));
        match self.mourning_degree {
            Some(d) => lines.push(format!("  Mourning grade: {}", d)),
            None => lines.push("  Mourning grade: outside the five grades".to_string()),
        }
        if self.low_confidence {
            lines.push("  Warning: contains unreadable parts".to_string());
        }
        lines.join("\n")
    }
}

async fn lookup(cli: &Cli, config: &Config, id: i64) -> anyhow::Result<CodeReport> {
    let db_path = cli.database_path(config);
    if !db_path.exists() {
        anyhow::bail!("Database not found at {}", db_path.display());
    }
    let storage = SqliteStorage::open(&db_path)?;

    let code = storage
        .get_kinship_code(KinshipCodeId(id))
        .await?
        .ok_or_else(|| anyhow::anyhow!("Unknown kinship code: {}", id))?;

    let components = match code.components() {
        Some((first, second)) => {
            let first = storage.get_kinship_code(first).await?;
            let second = storage.get_kinship_code(second).await?;
            first.zip(second)
        }
        None => None,
    };

    let steps = RelationClassifier::new().classify(
        &code,
        components.as_ref().map(|(first, second)| (first, second)),
    );
    Ok(CodeReport::new(
        Some(&code),
        &code.kin_rel,
        steps,
        &TermSimplifier::standard(),
    ))
}

pub async fn run(args: &CodeArgs, cli: &Cli, config: Config) -> anyhow::Result<()> {
    let report = match args.code.trim().parse::<i64>() {
        Ok(id) => lookup(cli, &config, id).await?,
        Err(_) => {
            let steps = RelationClassifier::new().decompose(&args.code);
            CodeReport::new(None, &args.code, steps, &TermSimplifier::standard())
        }
    };

    match cli.output_format() {
        OutputFormat::Json => println!("{}", format_json(&report)?),
        OutputFormat::Table => println!("{}", report.to_text()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbreviation_report() {
        let steps = RelationClassifier::new().decompose("FB+S");
        let report = CodeReport::new(None, "FB+S", steps, &TermSimplifier::standard());

        assert_eq!(report.relationship_path, "FB+S");
        assert_eq!(report.reciprocal_path, "PG-C");
        assert_eq!(report.counts, KinshipCounts::new(1, 1, 1, 0));
        assert_eq!(report.mourning_degree, Some(4));
        assert!(report.simplified_term.is_some());
        assert!(!report.low_confidence);

        let text = report.to_text();
        assert!(text.starts_with("Abbreviation: FB+S"));
        assert!(text.contains("Mourning grade: 4"));
    }

    #[test]
    fn test_chained_abbreviation_grade() {
        let steps = RelationClassifier::new().decompose("FFSS");
        let report = CodeReport::new(None, "FFSS", steps, &TermSimplifier::standard());
        assert_eq!(report.counts, KinshipCounts::new(2, 2, 0, 0));
        assert_eq!(report.mourning_degree, Some(4));
    }

    #[test]
    fn test_unreadable_report() {
        let steps = RelationClassifier::new().decompose("X");
        let report = CodeReport::new(None, "X", steps, &TermSimplifier::standard());
        assert!(report.low_confidence);
        assert_eq!(report.steps, vec![AtomicStep::Unknown]);
        assert!(report.to_text().contains("unreadable"));
    }
}
