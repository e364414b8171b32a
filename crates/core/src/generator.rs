//! Générateur de candidats: fenêtre glissante et assemblage des constructions

use crate::design::{Candidate, ConstructType, DesignParameters};
use crate::sequence::{self, MAX_AT_RUN, MIN_TANDEM_UNIT};
use tracing::debug;

/// Boucle de l'épingle shRNA
pub const SHRNA_LOOP: &str = "TTCAAGAGA";

/// Overhang 3' ajouté aux guides siRNA
pub const SIRNA_OVERHANG: &str = "UU";

/// Nombre de mésappariements introduits dans le passager d'une mimique miRNA
pub const MIRNA_MISMATCHES: usize = 2;

/// Filtre préalable d'une fenêtre (prédicat pur)
///
/// Rejette une fenêtre si son GC sort de [gc_min, gc_max], si elle contient une
/// répétition en tandem (quand `filter_repeats` est actif) ou un run A/T >= 4.
pub fn passes_prefilter(window: &str, parameters: &DesignParameters) -> bool {
    let gc = sequence::gc_fraction(window);
    if gc < parameters.gc_min || gc > parameters.gc_max {
        return false;
    }

    if parameters.filter_repeats && sequence::has_tandem_repeat(window, MIN_TANDEM_UNIT) {
        return false;
    }

    !sequence::has_poly_at_run(window, MAX_AT_RUN)
}

/// Génère les candidats d'une cible
///
/// Le pas vaut `max(1, len / max_candidates)`. Les fenêtres sont extraites depuis
/// la position 0 jusqu'à dépassement de la cible ou jusqu'à `max_candidates`
/// candidats acceptés. L'ordre de génération est conservé, sans déduplication.
pub fn generate(
    target: &str,
    construct_type: ConstructType,
    parameters: &DesignParameters,
    max_candidates: usize,
) -> Vec<Candidate> {
    let bases: Vec<char> = target.chars().map(|c| c.to_ascii_uppercase()).collect();
    let length = parameters.length;

    if max_candidates == 0 || length == 0 || bases.len() < length {
        return Vec::new();
    }

    let step = (bases.len() / max_candidates).max(1);
    let mut candidates = Vec::new();
    let mut rejected = 0usize;
    let mut start = 0;

    while start + length <= bases.len() && candidates.len() < max_candidates {
        let window: String = bases[start..start + length].iter().collect();

        if passes_prefilter(&window, parameters) {
            candidates.push(assemble(&window, start, construct_type));
        } else {
            rejected += 1;
        }

        start += step;
    }

    debug!(
        "{} candidats {} générés (pas {}, {} fenêtres rejetées)",
        candidates.len(),
        construct_type,
        step,
        rejected
    );

    candidates
}

/// Assemble une construction à partir d'une fenêtre de la cible
pub fn assemble(window: &str, position: usize, construct_type: ConstructType) -> Candidate {
    match construct_type {
        ConstructType::Sirna => {
            let guide = window.to_string();
            let passenger = sequence::complement(&guide);
            let full_sequence = format!("{}{}", guide, SIRNA_OVERHANG);
            Candidate {
                position,
                guide,
                passenger: Some(passenger),
                loop_sequence: None,
                full_sequence,
            }
        }
        ConstructType::Shrna => {
            let guide = window.to_string();
            let passenger = sequence::complement(&guide);
            let full_sequence = format!("{}{}{}", guide, SHRNA_LOOP, sequence::reverse(&passenger));
            Candidate {
                position,
                guide,
                passenger: Some(passenger),
                loop_sequence: Some(SHRNA_LOOP.to_string()),
                full_sequence,
            }
        }
        ConstructType::MirnaMimic => {
            let guide = window.to_string();
            let passenger = mirna_passenger(&guide);
            let full_sequence = guide.clone();
            Candidate {
                position,
                guide,
                passenger: Some(passenger),
                loop_sequence: None,
                full_sequence,
            }
        }
        ConstructType::Antagomir => {
            let guide = sequence::reverse_complement(window);
            let full_sequence = guide.clone();
            Candidate {
                position,
                guide,
                passenger: None,
                loop_sequence: None,
                full_sequence,
            }
        }
    }
}

/// Passager d'une mimique miRNA: complément avec deux mésappariements hors seed
fn mirna_passenger(guide: &str) -> String {
    let mut passenger: Vec<char> = sequence::complement(guide).chars().collect();

    for index in mismatch_positions(passenger.len()) {
        passenger[index] = rotate_base(passenger[index]);
    }

    passenger.into_iter().collect()
}

/// Positions de mésappariement: à partir du centre, hors seed, puis depuis l'extrémité 3'
fn mismatch_positions(len: usize) -> Vec<usize> {
    let mut positions: Vec<usize> = (len / 2..len)
        .filter(|&i| !sequence::in_seed(i))
        .take(MIRNA_MISMATCHES)
        .collect();

    if positions.len() < MIRNA_MISMATCHES {
        for i in (0..len).rev() {
            if positions.len() == MIRNA_MISMATCHES {
                break;
            }
            if !sequence::in_seed(i) && !positions.contains(&i) {
                positions.push(i);
            }
        }
    }

    positions
}

/// Base suivante dans la rotation A→C→G→T→A (toujours différente de l'entrée)
fn rotate_base(base: char) -> char {
    match base {
        'A' => 'C',
        'C' => 'G',
        'G' => 'T',
        'T' | 'U' => 'A',
        _ => 'A',
    }
}
