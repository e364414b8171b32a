//! Utilitaires de séquences: complément, contenu GC, répétitions et alphabet

use bio::alphabets::Alphabet;
use sha2::{Digest, Sha256};

/// Bases acceptées dans une séquence d'acide nucléique (ADN ou ARN)
pub const NUCLEIC_SYMBOLS: &[u8] = b"ACGTUacgtu";

/// Longueur minimale d'une répétition en tandem détectée
pub const MIN_TANDEM_UNIT: usize = 3;

/// Longueur d'un run A/T considéré comme région de faible complexité
pub const MAX_AT_RUN: usize = 4;

/// Début de la région seed (positions 2-8 en numérotation 1-based)
pub const SEED_START: usize = 1;

/// Longueur de la région seed
pub const SEED_LENGTH: usize = 7;

/// Région seed d'un guide, absente si le guide fait moins de 8 bases
pub fn seed_region(guide: &str) -> Option<&str> {
    guide.get(SEED_START..SEED_START + SEED_LENGTH)
}

/// Indique si un index 0-based tombe dans la région seed
pub fn in_seed(index: usize) -> bool {
    (SEED_START..SEED_START + SEED_LENGTH).contains(&index)
}

/// Complément d'une base (sortie en majuscules)
///
/// U est complété en A; les caractères inconnus sont conservés tels quels.
pub fn complement_base(base: char) -> char {
    match base.to_ascii_uppercase() {
        'A' => 'T',
        'T' => 'A',
        'U' => 'A',
        'G' => 'C',
        'C' => 'G',
        _ => base,
    }
}

/// Complément base par base, sans inversion
pub fn complement(seq: &str) -> String {
    seq.chars().map(complement_base).collect()
}

/// Inverse l'ordre des bases
pub fn reverse(seq: &str) -> String {
    seq.chars().rev().collect()
}

/// Complément inverse
pub fn reverse_complement(seq: &str) -> String {
    seq.chars().rev().map(complement_base).collect()
}

/// Retourne true si c'est une base G ou C
pub fn is_gc(base: char) -> bool {
    matches!(base.to_ascii_uppercase(), 'G' | 'C')
}

/// Fraction GC (0.0 pour une séquence vide)
pub fn gc_fraction(seq: &str) -> f64 {
    let len = seq.chars().count();
    if len == 0 {
        return 0.0;
    }
    let gc_count = seq.chars().filter(|&b| is_gc(b)).count();
    gc_count as f64 / len as f64
}

/// Premier caractère hors de l'alphabet A/C/G/T/U (casse ignorée), s'il existe
pub fn first_invalid_base(seq: &str) -> Option<char> {
    let alphabet = Alphabet::new(NUCLEIC_SYMBOLS);
    seq.chars()
        .find(|c| !c.is_ascii() || !alphabet.symbols.contains(*c as usize))
}

/// Détecte une sous-chaîne de longueur >= `min_unit` immédiatement répétée
///
/// Par exemple `ATCATC` contient l'unité `ATC` répétée deux fois.
pub fn has_tandem_repeat(seq: &str, min_unit: usize) -> bool {
    let bases: Vec<u8> = seq.bytes().map(|b| b.to_ascii_uppercase()).collect();
    let n = bases.len();
    let min_unit = min_unit.max(1);

    for unit in min_unit..=n / 2 {
        for start in 0..=(n - 2 * unit) {
            if bases[start..start + unit] == bases[start + unit..start + 2 * unit] {
                return true;
            }
        }
    }

    false
}

/// Détecte un run d'au moins `min_run` bases A/T (ou U) identiques
pub fn has_poly_at_run(seq: &str, min_run: usize) -> bool {
    if min_run == 0 {
        return true;
    }

    let mut current_run = 0;
    let mut last_base: Option<char> = None;

    for base in seq.chars().map(|c| c.to_ascii_uppercase()) {
        if Some(base) == last_base {
            current_run += 1;
        } else {
            current_run = 1;
            last_base = Some(base);
        }

        if matches!(base, 'A' | 'T' | 'U') && current_run >= min_run {
            return true;
        }
    }

    false
}

/// Checksum SHA-256 d'une séquence normalisée en majuscules
pub fn checksum(seq: &str) -> String {
    let hash = Sha256::digest(seq.to_ascii_uppercase().as_bytes());
    format!("{:x}", hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_complement() {
        assert_eq!(complement("ATCG"), "TAGC");
        assert_eq!(complement("aucg"), "TAGC");
        assert_eq!(complement("ANT"), "TNA");
    }

    #[test]
    fn test_reverse_complement() {
        assert_eq!(reverse_complement("AACG"), "CGTT");
        assert_eq!(reverse("ACGT"), "TGCA");
    }

    #[test]
    fn test_gc_fraction() {
        assert!((gc_fraction("ACGT") - 0.5).abs() < 1e-9);
        assert!((gc_fraction("gggc") - 1.0).abs() < 1e-9);
        assert_eq!(gc_fraction(""), 0.0);
    }

    #[test]
    fn test_alphabet() {
        assert_eq!(first_invalid_base("ACGUacgt"), None);
        assert_eq!(first_invalid_base("ACGN"), Some('N'));
        assert_eq!(first_invalid_base("ACXG"), Some('X'));
        assert_eq!(first_invalid_base("ACGé"), Some('é'));
        assert_eq!(first_invalid_base(""), None);
    }

    #[test]
    fn test_tandem_repeat() {
        assert!(has_tandem_repeat("GGATCATCGG", 3));
        assert!(has_tandem_repeat("atcgatcg", 3));
        assert!(!has_tandem_repeat("ACGTTGCA", 3));
        // Une unité de 2 bases ne compte pas
        assert!(!has_tandem_repeat("GCACAG", 3));
    }

    #[test]
    fn test_poly_at_run() {
        assert!(has_poly_at_run("GCAAAAGC", 4));
        assert!(has_poly_at_run("gcttttgc", 4));
        assert!(!has_poly_at_run("GCAAAGC", 4));
        // Les runs G/C ne sont pas concernés
        assert!(!has_poly_at_run("AGGGGGA", 4));
    }

    #[test]
    fn test_seed_region() {
        assert_eq!(seed_region("ACGTACGTAC"), Some("CGTACGT"));
        assert_eq!(seed_region("ACGTACG"), None);
        assert!(!in_seed(0));
        assert!(in_seed(1) && in_seed(7));
        assert!(!in_seed(8));
    }

    #[test]
    fn test_checksum_is_case_insensitive() {
        assert_eq!(checksum("acgt"), checksum("ACGT"));
        assert_eq!(checksum("ACGT").len(), 64);
    }

    proptest! {
        #[test]
        fn prop_complement_is_involution(seq in "[ACGT]{0,64}") {
            prop_assert_eq!(complement(&complement(&seq)), seq.clone());
            prop_assert_eq!(complement(&seq).len(), seq.len());
        }

        #[test]
        fn prop_gc_fraction_in_unit_range(seq in "[ACGTU]{0,64}") {
            let gc = gc_fraction(&seq);
            prop_assert!((0.0..=1.0).contains(&gc));
        }
    }
}
