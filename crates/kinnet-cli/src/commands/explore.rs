//! Explore command

use std::time::Duration;

use clap::Args;
use kinnet_core::{KinshipExplorer, KinshipFilterOverrides, KinshipSource, PersonId};

use crate::output::{format_json, format_network, OutputFormat};
use crate::{AppContext, Cli};

#[derive(Args)]
pub struct ExploreArgs {
    /// Person ID of the ego
    pub person_id: i64,

    /// Generations upwards
    #[arg(long)]
    pub ancestors: Option<u32>,

    /// Generations downwards
    #[arg(long)]
    pub descendants: Option<u32>,

    /// Sibling steps per path
    #[arg(long)]
    pub collateral: Option<u32>,

    /// Marriage steps per path
    #[arg(long)]
    pub marriage: Option<u32>,

    /// Stored rows chained from the ego
    #[arg(long)]
    pub depth: Option<u32>,

    /// Keep only relatives inside the five mourning grades
    #[arg(long)]
    pub mourning: bool,

    /// Attach conventional kin terms
    #[arg(long)]
    pub simplify: bool,

    /// Only follow rows stored on the ego's side
    #[arg(long)]
    pub no_reciprocal: bool,

    /// Only report relatives recorded directly against the ego
    #[arg(long)]
    pub direct_only: bool,

    /// Filter overrides as JSON, e.g. '{"maxLoopDepth": 2}'
    #[arg(long)]
    pub filters: Option<String>,

    /// Give up after this many milliseconds and print what was found
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

impl ExploreArgs {
    /// Flags take precedence over `--filters`
    pub fn overrides(&self) -> anyhow::Result<KinshipFilterOverrides> {
        let mut overrides = match &self.filters {
            Some(json) => KinshipFilterOverrides::from_json(json)?,
            None => KinshipFilterOverrides::new(),
        };

        if let Some(v) = self.ancestors {
            overrides = overrides.with_max_ancestor_gen(v);
        }
        if let Some(v) = self.descendants {
            overrides = overrides.with_max_descend_gen(v);
        }
        if let Some(v) = self.collateral {
            overrides = overrides.with_max_collateral_links(v);
        }
        if let Some(v) = self.marriage {
            overrides = overrides.with_max_marriage_links(v);
        }
        if let Some(v) = self.depth {
            overrides = overrides.with_max_loop_depth(v);
        }
        if self.mourning {
            overrides = overrides.with_mourning_circle(true);
        }
        if self.simplify {
            overrides = overrides.with_simplify_terms(true);
        }
        if self.no_reciprocal {
            overrides = overrides.with_include_reciprocal(false);
        }
        if self.direct_only {
            overrides = overrides.with_include_derived(false);
        }
        Ok(overrides)
    }
}

pub async fn run(args: &ExploreArgs, cli: &Cli, ctx: &AppContext) -> anyhow::Result<()> {
    let person_id = PersonId(args.person_id);
    let overrides = args.overrides()?;

    let mut explorer =
        KinshipExplorer::new(ctx.storage.clone()).with_defaults(ctx.config.filter_defaults());
    if let Some(ms) = args.timeout_ms.or(ctx.config.timeout_ms) {
        explorer = explorer.with_timeout(Duration::from_millis(ms));
    }

    let result = explorer
        .explore_kinship_network(person_id, &overrides)
        .await?;
    tracing::info!(
        "Explored network of {}: {} relatives in {} ms",
        person_id,
        result.total_count,
        result.processing_time
    );

    match cli.output_format() {
        OutputFormat::Json => println!("{}", format_json(&result)?),
        OutputFormat::Table => {
            let ego = ctx.storage.get_person(person_id).await?;
            println!("{}", format_network(&result, ego.as_ref()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: ExploreArgs,
    }

    fn parse(argv: &[&str]) -> ExploreArgs {
        Harness::parse_from(std::iter::once("explore").chain(argv.iter().copied())).args
    }

    #[test]
    fn test_flags_to_overrides() {
        let args = parse(&["42", "--ancestors", "2", "--mourning", "--no-reciprocal"]);
        let overrides = args.overrides().unwrap();

        assert_eq!(args.person_id, 42);
        assert_eq!(overrides.max_ancestor_gen, Some(2));
        assert_eq!(overrides.mourning_circle, Some(true));
        assert_eq!(overrides.include_reciprocal, Some(false));
        assert_eq!(overrides.max_descend_gen, None);
        assert_eq!(overrides.simplify_terms, None);
    }

    #[test]
    fn test_flags_beat_json() {
        let args = parse(&[
            "1",
            "--filters",
            r#"{"maxLoopDepth": 5, "maxDescendGen": 1}"#,
            "--depth",
            "2",
        ]);
        let overrides = args.overrides().unwrap();
        assert_eq!(overrides.max_loop_depth, Some(2));
        assert_eq!(overrides.max_descend_gen, Some(1));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let args = parse(&["1", "--filters", r#"{"maxLoopDepth": -3}"#]);
        assert!(args.overrides().is_err());
    }
}
