//! Hard caps on traversal limits for resource protection

/// Maximum ancestor or descendant generations (10)
pub const MAX_GENERATIONS: u32 = 10;

/// Maximum collateral steps on one path (5)
pub const MAX_COLLATERAL_LINKS: u32 = 5;

/// Maximum marriage links on one path (5)
pub const MAX_MARRIAGE_LINKS: u32 = 5;

/// Maximum number of edges chained from the ego (12)
pub const MAX_LOOP_DEPTH: u32 = 12;

/// Validation error type
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    GenerationsTooLarge { field: &'static str, value: u32, max: u32 },
    CollateralLinksTooLarge { value: u32, max: u32 },
    MarriageLinksTooLarge { value: u32, max: u32 },
    LoopDepthTooLarge { value: u32, max: u32 },
    MalformedFilters(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GenerationsTooLarge { field, value, max } => {
                write!(f, "{} too large: {} (max {})", field, value, max)
            }
            Self::CollateralLinksTooLarge { value, max } => {
                write!(f, "Collateral link limit too large: {} (max {})", value, max)
            }
            Self::MarriageLinksTooLarge { value, max } => {
                write!(f, "Marriage link limit too large: {} (max {})", value, max)
            }
            Self::LoopDepthTooLarge { value, max } => {
                write!(f, "Loop depth too large: {} (max {})", value, max)
            }
            Self::MalformedFilters(msg) => write!(f, "Malformed filters: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate an ancestor/descendant generation limit
pub fn validate_generations(field: &'static str, value: u32) -> Result<(), ValidationError> {
    if value > MAX_GENERATIONS {
        return Err(ValidationError::GenerationsTooLarge {
            field,
            value,
            max: MAX_GENERATIONS,
        });
    }
    Ok(())
}

/// Validate the collateral step limit
pub fn validate_collateral_links(value: u32) -> Result<(), ValidationError> {
    if value > MAX_COLLATERAL_LINKS {
        return Err(ValidationError::CollateralLinksTooLarge {
            value,
            max: MAX_COLLATERAL_LINKS,
        });
    }
    Ok(())
}

/// Validate the marriage link limit
pub fn validate_marriage_links(value: u32) -> Result<(), ValidationError> {
    if value > MAX_MARRIAGE_LINKS {
        return Err(ValidationError::MarriageLinksTooLarge {
            value,
            max: MAX_MARRIAGE_LINKS,
        });
    }
    Ok(())
}

/// Validate the loop depth
pub fn validate_loop_depth(value: u32) -> Result<(), ValidationError> {
    if value > MAX_LOOP_DEPTH {
        return Err(ValidationError::LoopDepthTooLarge {
            value,
            max: MAX_LOOP_DEPTH,
        });
    }
    Ok(())
}
