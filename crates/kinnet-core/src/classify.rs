//! Relation classifier: kinship codes to atomic steps

use crate::kinship::KinshipCode;
use crate::step::AtomicStep;

/// Maps kinship codes to ordered atomic step sequences.
///
/// Stateless. Unrecognized letters become [`AtomicStep::Unknown`] so that an
/// edge is never dropped because its code could not be read.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelationClassifier;

impl RelationClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a code, optionally using its resolved component codes.
    ///
    /// `components` must be the codes named by `kin_pair1`/`kin_pair2`; when
    /// present they take precedence over the code's own abbreviation.
    pub fn classify(
        &self,
        code: &KinshipCode,
        components: Option<(&KinshipCode, &KinshipCode)>,
    ) -> Vec<AtomicStep> {
        match components {
            Some((first, second)) => {
                let mut steps = self.decompose(&first.kin_rel);
                steps.extend(self.decompose(&second.kin_rel));
                steps
            }
            None => self.decompose(&code.kin_rel),
        }
    }

    /// Decompose an abbreviation left to right into atomic steps.
    ///
    /// `P`, `C` and `G` are the gender-neutral parent, child and sibling.
    /// `+`/`-` directly after `B`, `Z` or `G` mark elder/younger. Digits, `*`,
    /// parenthesised notes and non-ASCII marks are modifiers and ignored.
    pub fn decompose(&self, abbreviation: &str) -> Vec<AtomicStep> {
        let mut steps = Vec::new();
        let mut chars = abbreviation.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '(' {
                for inner in chars.by_ref() {
                    if inner == ')' {
                        break;
                    }
                }
                continue;
            }
            if !c.is_ascii_alphabetic() {
                continue;
            }

            let seniority = match chars.peek() {
                Some('+') => Some(true),
                Some('-') => Some(false),
                _ => None,
            };

            let step = match (c, seniority) {
                ('F', _) => AtomicStep::Father,
                ('M', _) => AtomicStep::Mother,
                ('S', _) => AtomicStep::Son,
                ('D', _) => AtomicStep::Daughter,
                ('H', _) => AtomicStep::Husband,
                ('W', _) => AtomicStep::Wife,
                ('P', _) => AtomicStep::Parent,
                ('C', _) => AtomicStep::Child,
                ('B', Some(true)) => AtomicStep::ElderBrother,
                ('B', Some(false)) => AtomicStep::YoungerBrother,
                ('B', None) => AtomicStep::Brother,
                ('Z', Some(true)) => AtomicStep::ElderSister,
                ('Z', Some(false)) => AtomicStep::YoungerSister,
                ('Z', None) => AtomicStep::Sister,
                ('G', Some(true)) => AtomicStep::ElderSibling,
                ('G', Some(false)) => AtomicStep::YoungerSibling,
                ('G', None) => AtomicStep::Sibling,
                _ => AtomicStep::Unknown,
            };

            if matches!(c, 'B' | 'Z' | 'G') && seniority.is_some() {
                chars.next();
            }
            steps.push(step);
        }

        if steps.is_empty() {
            tracing::warn!("Unreadable kinship abbreviation: {:?}", abbreviation);
            steps.push(AtomicStep::Unknown);
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AtomicStep::*;

    #[test]
    fn test_simple_codes() {
        let classifier = RelationClassifier::new();
        for (abbr, step) in [
            ("F", Father),
            ("M", Mother),
            ("S", Son),
            ("D", Daughter),
            ("B", Brother),
            ("Z", Sister),
            ("H", Husband),
            ("W", Wife),
            ("B+", ElderBrother),
            ("B-", YoungerBrother),
            ("Z+", ElderSister),
            ("Z-", YoungerSister),
        ] {
            let code = KinshipCode::new(1, abbr);
            assert_eq!(classifier.classify(&code, None), vec![step], "{}", abbr);
        }
    }

    #[test]
    fn test_compound_by_abbreviation() {
        let classifier = RelationClassifier::new();
        assert_eq!(classifier.decompose("FB"), vec![Father, Brother]);
        assert_eq!(classifier.decompose("FB+S"), vec![Father, ElderBrother, Son]);
        assert_eq!(classifier.decompose("MZ-D"), vec![Mother, YoungerSister, Daughter]);
    }

    #[test]
    fn test_modifiers_ignored() {
        let classifier = RelationClassifier::new();
        assert_eq!(classifier.decompose("S1"), vec![Son]);
        assert_eq!(classifier.decompose("S(adopted)"), vec![Son]);
        assert_eq!(classifier.decompose("B°"), vec![Brother]);
        assert_eq!(classifier.decompose("F*S"), vec![Father, Son]);
    }

    #[test]
    fn test_compound_by_components() {
        let classifier = RelationClassifier::new();
        let father = KinshipCode::new(75, "F");
        let elder_brother = KinshipCode::new(12, "B+");
        let uncle = KinshipCode::new(120, "FB+").with_pair(75, 12);

        let steps = classifier.classify(&uncle, Some((&father, &elder_brother)));
        assert_eq!(steps, vec![Father, ElderBrother]);
    }

    #[test]
    fn test_reads_rendered_paths() {
        let classifier = RelationClassifier::new();
        let path = vec![Parent, YoungerSibling, Child, Wife];
        assert_eq!(classifier.decompose(&crate::step::render_path(&path)), path);
        assert_eq!(classifier.decompose("G+"), vec![ElderSibling]);
    }

    #[test]
    fn test_unknown_letters_kept() {
        let classifier = RelationClassifier::new();
        assert_eq!(classifier.decompose("FX"), vec![Father, Unknown]);
        assert_eq!(classifier.decompose(""), vec![Unknown]);
        assert_eq!(classifier.decompose("*"), vec![Unknown]);
    }
}
