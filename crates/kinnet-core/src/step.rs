//! Atomic kinship steps and their generational semantics

use serde::{Deserialize, Serialize};

/// Direction of a single step across generations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationDelta {
    /// One generation towards the ancestors
    Up,
    /// Same generation
    None,
    /// One generation towards the descendants
    Down,
}

impl GenerationDelta {
    /// Signed value: +1 up, 0 none, -1 down
    pub fn as_i8(self) -> i8 {
        match self {
            Self::Up => 1,
            Self::None => 0,
            Self::Down => -1,
        }
    }

    pub fn inverted(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::None => Self::None,
            Self::Down => Self::Up,
        }
    }
}

/// The smallest indivisible relationship unit.
///
/// Gender- or seniority-neutral variants (`Parent`, `Child`, `Sibling`, ...)
/// appear when a code omits that information or when a step is derived by
/// reading a stored edge backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AtomicStep {
    Father,
    Mother,
    Parent,
    Son,
    Daughter,
    Child,
    ElderBrother,
    YoungerBrother,
    Brother,
    ElderSister,
    YoungerSister,
    Sister,
    ElderSibling,
    YoungerSibling,
    Sibling,
    Husband,
    Wife,
    Unknown,
}

impl AtomicStep {
    pub fn generation_delta(self) -> GenerationDelta {
        match self {
            Self::Father | Self::Mother | Self::Parent => GenerationDelta::Up,
            Self::Son | Self::Daughter | Self::Child => GenerationDelta::Down,
            _ => GenerationDelta::None,
        }
    }

    pub fn is_marriage(self) -> bool {
        matches!(self, Self::Husband | Self::Wife)
    }

    pub fn is_collateral(self) -> bool {
        matches!(
            self,
            Self::ElderBrother
                | Self::YoungerBrother
                | Self::Brother
                | Self::ElderSister
                | Self::YoungerSister
                | Self::Sister
                | Self::ElderSibling
                | Self::YoungerSibling
                | Self::Sibling
        )
    }

    pub fn is_unknown(self) -> bool {
        self == Self::Unknown
    }

    /// Drop seniority, keeping gender where known
    pub fn generalized(self) -> Self {
        match self {
            Self::ElderBrother | Self::YoungerBrother => Self::Brother,
            Self::ElderSister | Self::YoungerSister => Self::Sister,
            Self::ElderSibling | Self::YoungerSibling => Self::Sibling,
            other => other,
        }
    }

    /// Drop both gender and seniority
    pub fn neutral(self) -> Self {
        match self.generation_delta() {
            GenerationDelta::Up => Self::Parent,
            GenerationDelta::Down => Self::Child,
            GenerationDelta::None if self.is_collateral() => Self::Sibling,
            GenerationDelta::None => self,
        }
    }

    /// Short notation used when rendering relationship paths
    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::Father => "F",
            Self::Mother => "M",
            Self::Parent => "P",
            Self::Son => "S",
            Self::Daughter => "D",
            Self::Child => "C",
            Self::ElderBrother => "B+",
            Self::YoungerBrother => "B-",
            Self::Brother => "B",
            Self::ElderSister => "Z+",
            Self::YoungerSister => "Z-",
            Self::Sister => "Z",
            Self::ElderSibling => "G+",
            Self::YoungerSibling => "G-",
            Self::Sibling => "G",
            Self::Husband => "H",
            Self::Wife => "W",
            Self::Unknown => "?",
        }
    }
}

impl std::fmt::Display for AtomicStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Render a step sequence in compact notation, e.g. `FB+S`
pub fn render_path(steps: &[AtomicStep]) -> String {
    steps.iter().map(|s| s.abbreviation()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_semantics() {
        assert_eq!(AtomicStep::Father.generation_delta(), GenerationDelta::Up);
        assert_eq!(AtomicStep::Daughter.generation_delta(), GenerationDelta::Down);
        assert_eq!(AtomicStep::Wife.generation_delta(), GenerationDelta::None);

        assert!(AtomicStep::Husband.is_marriage());
        assert!(!AtomicStep::Husband.is_collateral());
        assert!(AtomicStep::YoungerSister.is_collateral());

        let unknown = AtomicStep::Unknown;
        assert_eq!(unknown.generation_delta().as_i8(), 0);
        assert!(!unknown.is_marriage());
        assert!(!unknown.is_collateral());
    }

    #[test]
    fn test_generalized() {
        assert_eq!(AtomicStep::ElderBrother.generalized(), AtomicStep::Brother);
        assert_eq!(AtomicStep::YoungerSibling.generalized(), AtomicStep::Sibling);
        assert_eq!(AtomicStep::Father.generalized(), AtomicStep::Father);

        assert_eq!(AtomicStep::Mother.neutral(), AtomicStep::Parent);
        assert_eq!(AtomicStep::Daughter.neutral(), AtomicStep::Child);
        assert_eq!(AtomicStep::ElderSister.neutral(), AtomicStep::Sibling);
        assert_eq!(AtomicStep::Wife.neutral(), AtomicStep::Wife);
        assert_eq!(AtomicStep::Unknown.neutral(), AtomicStep::Unknown);
    }

    #[test]
    fn test_render_path() {
        let path = [AtomicStep::Father, AtomicStep::ElderBrother, AtomicStep::Son];
        assert_eq!(render_path(&path), "FB+S");
        assert_eq!(render_path(&[]), "");
    }
}
