//! Built-in kinship code table
//!
//! A compact table of the common codes, numbered for this crate. Real
//! datasets bring their own `KINSHIP_CODES` rows.

use kinnet_core::KinshipCode;

pub const FATHER: i64 = 1;
pub const MOTHER: i64 = 2;
pub const SON: i64 = 3;
pub const DAUGHTER: i64 = 4;
pub const BROTHER: i64 = 5;
pub const ELDER_BROTHER: i64 = 6;
pub const YOUNGER_BROTHER: i64 = 7;
pub const SISTER: i64 = 8;
pub const ELDER_SISTER: i64 = 9;
pub const YOUNGER_SISTER: i64 = 10;
pub const HUSBAND: i64 = 11;
pub const WIFE: i64 = 12;
pub const FATHERS_FATHER: i64 = 20;
pub const FATHERS_MOTHER: i64 = 21;
pub const SONS_SON: i64 = 22;
pub const FATHERS_BROTHER: i64 = 23;
pub const FATHERS_ELDER_BROTHER: i64 = 24;
pub const FATHERS_YOUNGER_BROTHER: i64 = 25;
pub const BROTHERS_SON: i64 = 26;
pub const FATHERS_BROTHERS_SON: i64 = 27;
pub const MOTHERS_BROTHER: i64 = 28;
pub const WIFES_FATHER: i64 = 29;
pub const DAUGHTERS_HUSBAND: i64 = 30;

/// The built-in code table
pub fn standard_codes() -> Vec<KinshipCode> {
    let simple = [
        (FATHER, "F", "父"),
        (MOTHER, "M", "母"),
        (SON, "S", "子"),
        (DAUGHTER, "D", "女"),
        (BROTHER, "B", "兄弟"),
        (ELDER_BROTHER, "B+", "兄"),
        (YOUNGER_BROTHER, "B-", "弟"),
        (SISTER, "Z", "姊妹"),
        (ELDER_SISTER, "Z+", "姊"),
        (YOUNGER_SISTER, "Z-", "妹"),
        (HUSBAND, "H", "夫"),
        (WIFE, "W", "妻"),
    ];
    let compound = [
        (FATHERS_FATHER, "FF", "祖父", FATHER, FATHER),
        (FATHERS_MOTHER, "FM", "祖母", FATHER, MOTHER),
        (SONS_SON, "SS", "孫", SON, SON),
        (FATHERS_BROTHER, "FB", "伯叔父", FATHER, BROTHER),
        (FATHERS_ELDER_BROTHER, "FB+", "伯父", FATHER, ELDER_BROTHER),
        (FATHERS_YOUNGER_BROTHER, "FB-", "叔父", FATHER, YOUNGER_BROTHER),
        (BROTHERS_SON, "BS", "姪", BROTHER, SON),
        (FATHERS_BROTHERS_SON, "FBS", "堂兄弟", FATHERS_BROTHER, SON),
        (MOTHERS_BROTHER, "MB", "舅", MOTHER, BROTHER),
        (WIFES_FATHER, "WF", "岳父", WIFE, FATHER),
        (DAUGHTERS_HUSBAND, "DH", "女婿", DAUGHTER, HUSBAND),
    ];

    let mut codes: Vec<KinshipCode> = simple
        .into_iter()
        .map(|(code, rel, chn)| KinshipCode::new(code, rel).with_chinese(chn))
        .collect();
    codes.extend(compound.into_iter().map(|(code, rel, chn, first, second)| {
        KinshipCode::new(code, rel)
            .with_chinese(chn)
            .with_pair(first, second)
    }));
    codes
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinnet_core::{AtomicStep, RelationClassifier};
    use std::collections::HashMap;

    #[test]
    fn test_codes_unique() {
        let codes = standard_codes();
        let mut seen = std::collections::HashSet::new();
        for code in &codes {
            assert!(seen.insert(code.code), "duplicate code {}", code.code);
        }
    }

    #[test]
    fn test_components_agree_with_abbreviation() {
        let codes = standard_codes();
        let by_id: HashMap<_, _> = codes.iter().map(|c| (c.code, c)).collect();
        let classifier = RelationClassifier::new();

        for code in &codes {
            let by_name = classifier.classify(code, None);
            if let Some((first, second)) = code.components() {
                let pair = (by_id[&first], by_id[&second]);
                assert_eq!(classifier.classify(code, Some(pair)), by_name, "{}", code.kin_rel);
            }
            assert!(!by_name.contains(&AtomicStep::Unknown));
        }
    }
}
