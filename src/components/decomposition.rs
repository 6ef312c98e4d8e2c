//! Equipment → component decomposition
//!
//! When a lot has no recorded component breakdown, a plausible list is
//! synthesized from the equipment name and category label. Classes are
//! tried in a fixed priority order and the first hit returns its whole
//! template.

use serde::{Deserialize, Serialize};

use super::models::{Component, EquipmentItem};
use crate::matcher::normalize;

/// Equipment family driving the decomposition template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EquipmentClass {
    Desktop,
    Laptop,
    Monitor,
    Server,
    CablesPeripherals,
    Generic,
}

type Template = &'static [(&'static str, f64, &'static str)];

const DESKTOP: Template = &[
    ("boitier-acier", 6.5, "acier"),
    ("carte-mere", 0.9, "pcb-metaux-precieux"),
    ("disque-dur", 0.6, "aluminium"),
    ("alimentation", 1.4, "mixte-cuivre-acier"),
    ("coque-plastique", 0.7, "plastique-abs"),
    ("cable-alimentation", 0.25, "cuivre-pvc"),
];

const LAPTOP: Template = &[
    ("batterie-lithium", 0.3, "lithium-ion"),
    ("ecran-lcd", 0.5, "verre-lcd"),
    ("carte-mere", 0.2, "pcb-metaux-precieux"),
    ("disque-ssd", 0.05, "silicium"),
    ("clavier", 0.15, "plastique-abs"),
    ("coque-plastique", 0.8, "plastique-abs"),
    ("cable-chargeur", 0.2, "cuivre-pvc"),
];

const MONITOR: Template = &[
    ("ecran-lcd", 2.8, "verre-lcd"),
    ("carte-electronique", 0.4, "pcb"),
    ("coque-plastique", 1.3, "plastique-abs"),
    ("pied-acier", 0.9, "acier"),
    ("cable-video", 0.2, "cuivre-pvc"),
];

const SERVER: Template = &[
    ("chassis-acier", 14.0, "acier"),
    ("carte-mere", 1.6, "pcb-metaux-precieux"),
    ("disque-dur", 2.4, "aluminium"),
    ("alimentation-redondante", 3.2, "mixte-cuivre-acier"),
    ("batterie-controleur-raid", 0.1, "lithium-ion"),
    ("cable-alimentation", 0.5, "cuivre-pvc"),
];

const CABLES_PERIPHERALS: Template = &[
    ("cable-cuivre", 0.5, "cuivre-pvc"),
    ("clavier", 0.6, "plastique-abs"),
    ("coque-plastique", 0.3, "plastique-abs"),
];

const GENERIC: Template = &[
    ("composant-electronique", 1.0, "electronique-mixte"),
    ("plastique-mixte", 0.5, "plastique-mixte"),
    ("metal-mixte", 0.5, "metal-mixte"),
];

impl EquipmentClass {
    /// Classes in match priority order; `Generic` is the fallback
    pub const PRIORITY: [EquipmentClass; 5] = [
        EquipmentClass::Desktop,
        EquipmentClass::Laptop,
        EquipmentClass::Monitor,
        EquipmentClass::Server,
        EquipmentClass::CablesPeripherals,
    ];

    /// Normalized keywords, matched as whole tokens
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            EquipmentClass::Desktop => &[
                "unite centrale",
                "ordinateur fixe",
                "pc fixe",
                "desktop",
                "tour",
                "station de travail",
            ],
            EquipmentClass::Laptop => &["portable", "laptop", "notebook", "ultrabook"],
            EquipmentClass::Monitor => &["ecran", "moniteur", "monitor", "display"],
            EquipmentClass::Server => &["serveur", "server", "rack", "baie"],
            EquipmentClass::CablesPeripherals => &[
                "cable",
                "clavier",
                "souris",
                "peripherique",
                "chargeur",
                "adaptateur",
            ],
            EquipmentClass::Generic => &[],
        }
    }

    fn template(self) -> Template {
        match self {
            EquipmentClass::Desktop => DESKTOP,
            EquipmentClass::Laptop => LAPTOP,
            EquipmentClass::Monitor => MONITOR,
            EquipmentClass::Server => SERVER,
            EquipmentClass::CablesPeripherals => CABLES_PERIPHERALS,
            EquipmentClass::Generic => GENERIC,
        }
    }

    /// First class in priority order with a keyword among the tokens of the
    /// equipment name or category label
    pub fn classify(equipment_name: &str, category_name: &str) -> EquipmentClass {
        let name = normalize(equipment_name);
        let category = normalize(category_name);
        let tokens: Vec<&str> = name.split_whitespace().chain(category.split_whitespace()).collect();

        Self::PRIORITY
            .into_iter()
            .find(|class| class.keywords().iter().any(|kw| contains_keyword(&tokens, kw)))
            .unwrap_or(EquipmentClass::Generic)
    }

    pub fn components(self) -> Vec<Component> {
        self.template()
            .iter()
            .map(|(component_type, weight_kg, material)| {
                Component::new(*component_type, *weight_kg, *material)
            })
            .collect()
    }
}

/// Keyword words must appear as consecutive whole tokens; a trailing plural
/// `s` on a token is accepted
fn contains_keyword(tokens: &[&str], keyword: &str) -> bool {
    let words: Vec<&str> = keyword.split(' ').collect();
    tokens.windows(words.len()).any(|window| {
        window
            .iter()
            .zip(&words)
            .all(|(token, word)| *token == *word || token.strip_suffix('s') == Some(*word))
    })
}

/// Synthesize components for one piece of equipment
pub fn decompose(equipment_name: &str, category_name: &str) -> Vec<Component> {
    EquipmentClass::classify(equipment_name, category_name).components()
}

/// Decompose every item and concatenate the results, duplicates included
pub fn decompose_all(items: &[EquipmentItem], category_name: &str) -> Vec<Component> {
    items
        .iter()
        .flat_map(|item| decompose(&item.name, category_name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ComponentKind;

    #[test]
    fn test_laptop_template() {
        assert_eq!(
            EquipmentClass::classify("HP EliteBook portable", "Informatique"),
            EquipmentClass::Laptop
        );
        let components = decompose("Laptop Dell Latitude", "");
        assert_eq!(components.len(), 7);
        assert!(components.iter().any(|c| c.is(ComponentKind::Battery)));
        assert!(components.iter().any(|c| c.is(ComponentKind::Screen)));
    }

    #[test]
    fn test_priority_order() {
        // desktop keywords are checked before monitor keywords
        assert_eq!(
            EquipmentClass::classify("Unité centrale + écran", ""),
            EquipmentClass::Desktop
        );
        assert_eq!(
            EquipmentClass::classify("Écran 24 pouces", "Périphériques"),
            EquipmentClass::Monitor
        );
    }

    #[test]
    fn test_category_label_is_considered() {
        assert_eq!(
            EquipmentClass::classify("Dell R740", "Serveurs et baies"),
            EquipmentClass::Server
        );
    }

    #[test]
    fn test_whole_token_matching() {
        // "retour" and "tourne" must not trigger the desktop "tour" keyword
        assert_eq!(EquipmentClass::classify("Colis retour", ""), EquipmentClass::Generic);
        assert_eq!(EquipmentClass::classify("Tourne-disque", ""), EquipmentClass::Generic);
        assert_eq!(EquipmentClass::classify("PC tour Dell", ""), EquipmentClass::Desktop);
        assert_eq!(EquipmentClass::classify("Tours HP", ""), EquipmentClass::Desktop);
    }

    #[test]
    fn test_plural_and_multi_word_keywords() {
        assert_eq!(
            EquipmentClass::classify("Lot", "Ordinateurs fixes"),
            EquipmentClass::Desktop
        );
        assert_eq!(
            EquipmentClass::classify("Câbles réseau", ""),
            EquipmentClass::CablesPeripherals
        );
        assert_eq!(EquipmentClass::classify("Ordinateurs", ""), EquipmentClass::Generic);
    }

    #[test]
    fn test_generic_fallback() {
        let components = decompose("Grille-pain", "Petit électroménager");
        assert_eq!(components.len(), 3);
        assert_eq!(components[0].component_type, "composant-electronique");
        assert_eq!(components[1].component_type, "plastique-mixte");
        assert_eq!(components[2].component_type, "metal-mixte");
    }

    #[test]
    fn test_decompose_all_concatenates() {
        let items = vec![
            EquipmentItem::new("Souris USB"),
            EquipmentItem::new("Souris USB"),
            EquipmentItem::new("Moniteur 22\""),
        ];
        let components = decompose_all(&items, "");
        assert_eq!(components.len(), 3 + 3 + 5);
    }

    #[test]
    fn test_template_types_classify() {
        for class in EquipmentClass::PRIORITY {
            for component in class.components() {
                assert!(component.weight_kg > 0.0);
            }
        }
        let laptop = EquipmentClass::Laptop.components();
        let plastics = laptop.iter().filter(|c| c.has_plastic_material()).count();
        assert_eq!(plastics, 2);
    }
}
