//! Rapports de validation et de prédiction

use console::style;
use rnai_core::{DesignId, EfficiencyPrediction, ValidationResult};

pub fn print_validation(result: &ValidationResult) {
    let analysis = &result.specificity_analysis;
    let thermo = &result.thermodynamic_analysis;

    if result.is_valid {
        println!("{}", style("✅ Guide valide").green().bold());
    } else {
        println!("{}", style("❌ Guide invalide").red().bold());
        for issue in &result.issues {
            println!("   - {}", issue);
        }
    }

    println!("\n┌────────────────────────────────────────────────┐");
    println!("│ Analyse de spécificité                         │");
    println!("├────────────────────────────────────────────────┤");
    println!("│ Spécificité            : {:>8.3}              │", analysis.specificity_score);
    println!("│ Efficacité prédite     : {:>8.3}              │", analysis.efficacy_prediction);
    println!(
        "│ Intervalle             : [{:.2}, {:.2}]          │",
        analysis.confidence_interval[0], analysis.confidence_interval[1]
    );
    println!("│ GC                     : {:>8.1}%             │", analysis.gc_content * 100.0);
    println!("│ Off-targets prédits    : {:>8}              │", analysis.off_target.total_predicted_targets);
    println!("│ Risque                 : {:>8}              │", analysis.off_target.risk_classification);
    println!("│ Tm                     : {:>8.1} °C           │", thermo.melting_temperature);
    println!("│ Asymétrie              : {:>8.3}              │", thermo.asymmetry_score);
    println!("└────────────────────────────────────────────────┘");

    println!("\n💡 Recommandations:");
    for recommendation in &result.recommendations {
        println!("   • {}", recommendation);
    }
}

pub fn print_prediction(id: DesignId, prediction: &EfficiencyPrediction) {
    println!("🔮 Prédiction pour {}", id);
    println!(
        "   Efficacité: {} (confiance {:.2})",
        style(format!("{:.3}", prediction.predicted_efficiency)).cyan().bold(),
        prediction.confidence_score
    );

    println!("\n   Facteurs:");
    for factor in &prediction.prediction_factors {
        println!(
            "   - {:<20} {:.3} × {:.2} = {:.3}",
            factor.name, factor.value, factor.weight, factor.contribution
        );
    }

    let delivery = &prediction.delivery_optimization;
    println!("\n   Délivrance: {:?}", delivery.method);
    for modification in &delivery.chemical_modifications {
        println!("   - {}", modification);
    }
    println!("   {}", delivery.notes);

    let conditions = &prediction.recommended_conditions;
    println!(
        "\n   Conditions: {} nM, ARNm à {} h, protéine à {} h, {} réplicats",
        conditions.concentration_nm,
        conditions.mrna_timepoint_hours,
        conditions.protein_timepoint_hours,
        conditions.replicates
    );
}
