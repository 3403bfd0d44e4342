//! Output formatting utilities

use kinnet_core::{KinshipNetworkNode, PersonKinshipNetworkResult, PersonSummary};
use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Table,
        }
    }
}

/// Pretty JSON for any serializable value
pub fn format_json<T: Serialize>(data: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

/// `Su Shi 蘇軾 (1037-1101)`, falling back to the bare ID
pub fn person_label(
    id: impl std::fmt::Display,
    name: Option<&str>,
    name_chn: Option<&str>,
    birth_year: Option<i32>,
    death_year: Option<i32>,
) -> String {
    let mut label = match (name, name_chn) {
        (Some(n), Some(c)) => format!("{} {}", n, c),
        (Some(n), None) => n.to_string(),
        (None, Some(c)) => c.to_string(),
        (None, None) => format!("#{}", id),
    };
    if birth_year.is_some() || death_year.is_some() {
        let year = |y: Option<i32>| y.map(|y| y.to_string()).unwrap_or_else(|| "?".to_string());
        label.push_str(&format!(" ({}-{})", year(birth_year), year(death_year)));
    }
    label
}

fn node_label(node: &KinshipNetworkNode) -> String {
    person_label(
        node.person_id,
        node.person_name.as_deref(),
        node.person_name_chn.as_deref(),
        node.birth_year,
        node.death_year,
    )
}

/// Plain-text table of a kinship network
pub fn format_network(result: &PersonKinshipNetworkResult, ego: Option<&PersonSummary>) -> String {
    let ego_label = match ego {
        Some(p) => person_label(
            p.person_id,
            p.name.as_deref(),
            p.name_chn.as_deref(),
            p.birth_year,
            p.death_year,
        ),
        None => format!("#{}", result.person_id),
    };

    let mut out = String::new();
    if result.nodes.is_empty() {
        out.push_str(&format!("No relatives found for {}\n", ego_label));
    } else {
        out.push_str(&format!(
            "Kinship network of {} ({} found):\n\n",
            ego_label, result.total_count
        ));

        let show_terms = result.filters.simplify_terms;
        let show_mourning = result.filters.mourning_circle;

        let mut header = format!("{:>10}  {:<12}  {:>4}  ", "ID", "PATH", "DIST");
        if show_terms {
            header.push_str(&format!("{:<32}  ", "TERM"));
        }
        if show_mourning {
            header.push_str("GRADE  ");
        }
        header.push_str("PERSON");
        out.push_str(header.trim_end());
        out.push('\n');

        for node in &result.nodes {
            let info = &node.path_info;
            let mut path = info.relationship_path.clone();
            if !node.is_direct() {
                path.push('*');
            }
            if info.low_confidence {
                path.push('?');
            }

            let mut line = format!("{:>10}  {:<12}  {:>4}  ", node.person_id, path, info.distance);
            if show_terms {
                line.push_str(&format!(
                    "{:<32}  ",
                    info.simplified_term.as_deref().unwrap_or("-")
                ));
            }
            if show_mourning {
                let grade = info
                    .mourning_degree
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string());
                line.push_str(&format!("{:>5}  ", grade));
            }
            line.push_str(&node_label(node));
            out.push_str(&line);
            out.push('\n');
        }
        out.push_str("\n* derived through other relatives\n");
    }

    out.push_str(&format!(
        "{} direct, {} derived, {} total in {} ms",
        result.direct_count, result.derived_count, result.total_count, result.processing_time
    ));
    if result.truncated {
        out.push_str(" (timed out, partial result)");
    }
    out
}
