//! Ordered step rules
//!
//! Each rule pairs a trigger with a step builder. Rules are evaluated in
//! table order; a rule whose trigger is false emits nothing and leaves no
//! gap in the numbering.

use super::models::StepPriority;
use crate::components::{Component, ComponentKind};

/// Category keywords that switch on the furniture branch
pub const FURNITURE_KEYWORDS: [&str; 2] = ["mobilier", "meuble"];

/// Facts about the request that rules look at
pub struct RuleContext<'a> {
    pub components: &'a [Component],
    pub furniture: bool,
}

impl<'a> RuleContext<'a> {
    pub fn new(category: &str, components: &'a [Component]) -> Self {
        let category = category.to_lowercase();
        Self {
            components,
            furniture: FURNITURE_KEYWORDS.iter().any(|kw| category.contains(kw)),
        }
    }

    pub fn has(&self, kind: ComponentKind) -> bool {
        self.components.iter().any(|c| c.is(kind))
    }

    /// Weight of the first component of that kind
    pub fn first_weight(&self, kind: ComponentKind) -> f64 {
        self.components
            .iter()
            .find(|c| c.is(kind))
            .map(|c| c.weight_kg)
            .unwrap_or(0.0)
    }

    /// Summed weight of every component whose material is a plastic
    pub fn plastic_material_weight(&self) -> f64 {
        self.components
            .iter()
            .filter(|c| c.has_plastic_material())
            .map(|c| c.weight_kg)
            .sum()
    }
}

/// A step before numbering
#[derive(Debug, Clone, PartialEq)]
pub struct StepDraft {
    pub action: &'static str,
    pub tools: &'static [&'static str],
    pub ppe: &'static [&'static str],
    pub estimated_minutes: u32,
    pub output_stream: &'static str,
    pub eco_value: f64,
    pub priority: StepPriority,
}

pub struct StepRule {
    pub name: &'static str,
    pub applies: fn(&RuleContext<'_>) -> bool,
    pub build: fn(&RuleContext<'_>) -> StepDraft,
}

const BASE_PPE: &[&str] = &["Gants de protection", "Lunettes de sécurité"];
const ELECTRICAL_PPE: &[&str] = &["Gants isolants", "Lunettes de sécurité"];

/// Rules in emission order
pub static RULES: &[StepRule] = &[
    StepRule { name: "preparation", applies: always, build: preparation },
    StepRule { name: "discharge", applies: has_battery, build: discharge },
    StepRule { name: "battery-removal", applies: has_battery, build: battery_removal },
    StepRule { name: "screen-separation", applies: has_screen, build: screen_separation },
    StepRule { name: "reuse-extraction", applies: has_board_or_disk, build: reuse_extraction },
    StepRule { name: "motherboard-extraction", applies: has_motherboard, build: motherboard_extraction },
    StepRule { name: "cable-recovery", applies: has_cable, build: cable_recovery },
    StepRule { name: "keyboard-removal", applies: has_keyboard, build: keyboard_removal },
    StepRule { name: "plastics-sorting", applies: has_casing_or_plastic, build: plastics_sorting },
    StepRule { name: "metal-structure", applies: furniture_metal, build: metal_structure },
    StepRule { name: "wood-separation", applies: furniture_wood, build: wood_separation },
    StepRule { name: "glass-removal", applies: furniture_glass, build: glass_removal },
    StepRule { name: "final-sort", applies: always, build: final_sort },
];

fn always(_: &RuleContext<'_>) -> bool {
    true
}

fn has_battery(ctx: &RuleContext<'_>) -> bool {
    ctx.has(ComponentKind::Battery)
}

fn has_screen(ctx: &RuleContext<'_>) -> bool {
    ctx.has(ComponentKind::Screen)
}

fn has_board_or_disk(ctx: &RuleContext<'_>) -> bool {
    ctx.has(ComponentKind::Motherboard) || ctx.has(ComponentKind::Disk)
}

fn has_motherboard(ctx: &RuleContext<'_>) -> bool {
    ctx.has(ComponentKind::Motherboard)
}

fn has_cable(ctx: &RuleContext<'_>) -> bool {
    ctx.has(ComponentKind::Cable)
}

fn has_keyboard(ctx: &RuleContext<'_>) -> bool {
    ctx.has(ComponentKind::Keyboard)
}

fn has_casing_or_plastic(ctx: &RuleContext<'_>) -> bool {
    ctx.has(ComponentKind::Casing) || ctx.has(ComponentKind::Plastic)
}

fn furniture_metal(ctx: &RuleContext<'_>) -> bool {
    ctx.furniture && ctx.has(ComponentKind::Metal)
}

fn furniture_wood(ctx: &RuleContext<'_>) -> bool {
    ctx.furniture && ctx.has(ComponentKind::Wood)
}

fn furniture_glass(ctx: &RuleContext<'_>) -> bool {
    ctx.furniture && ctx.has(ComponentKind::Glass)
}

fn preparation(ctx: &RuleContext<'_>) -> StepDraft {
    let tools: &'static [&'static str] = if ctx.furniture {
        &["Clé Allen", "Tournevis", "Marteau", "Bacs de tri"]
    } else {
        &["Tapis antistatique", "Bacs de tri"]
    };
    StepDraft {
        action: "Préparer le poste de travail et les bacs de tri",
        tools,
        ppe: BASE_PPE,
        estimated_minutes: 3,
        output_stream: "preparation",
        eco_value: 0.0,
        priority: StepPriority::High,
    }
}

fn discharge(_: &RuleContext<'_>) -> StepDraft {
    StepDraft {
        action: "Décharger les condensateurs et attendre 5 minutes",
        tools: &["Multimètre", "Outil de décharge isolé"],
        ppe: ELECTRICAL_PPE,
        estimated_minutes: 6,
        output_stream: "securite",
        eco_value: 0.0,
        priority: StepPriority::Critical,
    }
}

fn battery_removal(ctx: &RuleContext<'_>) -> StepDraft {
    StepDraft {
        action: "Retirer la batterie et l'isoler dans un bac ignifugé",
        tools: &["Tournevis de précision", "Spatule plastique", "Bac ignifugé"],
        ppe: ELECTRICAL_PPE,
        estimated_minutes: 4,
        output_stream: "batteries-lithium",
        eco_value: ctx.first_weight(ComponentKind::Battery) * 15.0,
        priority: StepPriority::Critical,
    }
}

fn screen_separation(ctx: &RuleContext<'_>) -> StepDraft {
    StepDraft {
        action: "Séparer l'écran du châssis",
        tools: &["Tournevis", "Ventouse", "Spatule plastique"],
        ppe: BASE_PPE,
        estimated_minutes: 8,
        output_stream: "DEEE-ecrans",
        eco_value: ctx.first_weight(ComponentKind::Screen) * 8.0,
        priority: StepPriority::Medium,
    }
}

fn reuse_extraction(_: &RuleContext<'_>) -> StepDraft {
    StepDraft {
        action: "Extraire la RAM, les disques et la carte WiFi pour réemploi",
        tools: &["Tournevis de précision", "Bracelet antistatique"],
        ppe: BASE_PPE,
        estimated_minutes: 7,
        output_stream: "composants-reemploi",
        eco_value: 25.0,
        priority: StepPriority::High,
    }
}

fn motherboard_extraction(ctx: &RuleContext<'_>) -> StepDraft {
    StepDraft {
        action: "Extraire la carte mère",
        tools: &["Tournevis", "Pince coupante", "Bracelet antistatique"],
        ppe: BASE_PPE,
        estimated_minutes: 10,
        output_stream: "metaux-precieux",
        eco_value: ctx.first_weight(ComponentKind::Motherboard) * 50.0,
        priority: StepPriority::High,
    }
}

fn cable_recovery(ctx: &RuleContext<'_>) -> StepDraft {
    StepDraft {
        action: "Récupérer les câbles et la connectique",
        tools: &["Pince coupante", "Bac cuivre"],
        ppe: BASE_PPE,
        estimated_minutes: 3,
        output_stream: "cuivre-cables",
        eco_value: ctx.first_weight(ComponentKind::Cable) * 12.0,
        priority: StepPriority::Low,
    }
}

fn keyboard_removal(_: &RuleContext<'_>) -> StepDraft {
    StepDraft {
        action: "Déposer le clavier et le trackpad",
        tools: &["Tournevis de précision", "Spatule plastique"],
        ppe: BASE_PPE,
        estimated_minutes: 5,
        output_stream: "plastiques-mixtes",
        eco_value: 5.0,
        priority: StepPriority::Low,
    }
}

fn plastics_sorting(ctx: &RuleContext<'_>) -> StepDraft {
    StepDraft {
        action: "Trier les coques et pièces plastiques par résine",
        tools: &["Bacs de tri", "Marqueur"],
        ppe: BASE_PPE,
        estimated_minutes: 6,
        output_stream: "plastiques-tries",
        eco_value: ctx.plastic_material_weight() * 6.0,
        priority: StepPriority::Medium,
    }
}

fn metal_structure(ctx: &RuleContext<'_>) -> StepDraft {
    StepDraft {
        action: "Démonter la structure métallique",
        tools: &["Clé Allen", "Clé plate", "Visseuse"],
        ppe: BASE_PPE,
        estimated_minutes: 12,
        output_stream: "metaux-ferreux",
        eco_value: ctx.first_weight(ComponentKind::Metal) * 8.0,
        priority: StepPriority::High,
    }
}

fn wood_separation(ctx: &RuleContext<'_>) -> StepDraft {
    StepDraft {
        action: "Séparer les panneaux en bois et aggloméré",
        tools: &["Visseuse", "Pied de biche"],
        ppe: &["Gants de protection", "Lunettes de sécurité", "Masque anti-poussière"],
        estimated_minutes: 10,
        output_stream: "bois-agglomere",
        eco_value: ctx.first_weight(ComponentKind::Wood) * 4.0,
        priority: StepPriority::Medium,
    }
}

fn glass_removal(_: &RuleContext<'_>) -> StepDraft {
    StepDraft {
        action: "Déposer les éléments en verre avec précaution",
        tools: &["Ventouse", "Bac verre"],
        ppe: &["Gants anti-coupure", "Lunettes de sécurité"],
        estimated_minutes: 8,
        output_stream: "verre-recyclable",
        eco_value: 15.0,
        priority: StepPriority::Critical,
    }
}

fn final_sort(_: &RuleContext<'_>) -> StepDraft {
    StepDraft {
        action: "Contrôle qualité et tri final des flux",
        tools: &["Balance", "Étiquettes de flux"],
        ppe: BASE_PPE,
        estimated_minutes: 4,
        output_stream: "tri-final",
        eco_value: 10.0,
        priority: StepPriority::Medium,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_furniture_detection() {
        assert!(RuleContext::new("Mobilier de bureau", &[]).furniture);
        assert!(RuleContext::new("MEUBLES", &[]).furniture);
        assert!(!RuleContext::new("equipements-informatiques", &[]).furniture);
    }

    #[test]
    fn test_first_weight_is_find_first() {
        let components = vec![
            Component::new("batterie-lithium", 0.3, "lithium-ion"),
            Component::new("batterie-secours", 0.9, "lithium-ion"),
        ];
        let ctx = RuleContext::new("informatique", &components);
        assert_eq!(ctx.first_weight(ComponentKind::Battery), 0.3);
        assert_eq!(battery_removal(&ctx).eco_value, 0.3 * 15.0);
    }

    #[test]
    fn test_plastics_sum_by_material() {
        let components = vec![
            Component::new("coque-plastique", 0.8, "plastique-abs"),
            Component::new("clavier", 0.2, "plastique-abs"),
            Component::new("pied-acier", 1.0, "acier"),
        ];
        let ctx = RuleContext::new("informatique", &components);
        assert!((ctx.plastic_material_weight() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_preparation_tools_branch() {
        let office = preparation(&RuleContext::new("informatique", &[]));
        assert!(office.tools.contains(&"Tapis antistatique"));

        let furniture = preparation(&RuleContext::new("mobilier", &[]));
        assert!(furniture.tools.contains(&"Clé Allen"));
        assert_eq!(furniture.ppe, BASE_PPE);
    }

    #[test]
    fn test_rule_table_order() {
        let names: Vec<_> = RULES.iter().map(|r| r.name).collect();
        assert_eq!(names.first(), Some(&"preparation"));
        assert_eq!(names.last(), Some(&"final-sort"));
        assert_eq!(names.len(), 13);
    }
}
