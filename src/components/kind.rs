//! Component type classification
//!
//! Component types are free-form strings (`batterie-lithium`,
//! `coque-plastique`, ...). Every keyword test on a type goes through
//! [`ComponentKind::classify`], so decomposition templates and checklist
//! rules agree on what a type means. A type can carry several kinds.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentKind {
    Battery,
    Screen,
    Motherboard,
    Disk,
    Cable,
    Keyboard,
    Casing,
    Plastic,
    Metal,
    Wood,
    Glass,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 11] = [
        ComponentKind::Battery,
        ComponentKind::Screen,
        ComponentKind::Motherboard,
        ComponentKind::Disk,
        ComponentKind::Cable,
        ComponentKind::Keyboard,
        ComponentKind::Casing,
        ComponentKind::Plastic,
        ComponentKind::Metal,
        ComponentKind::Wood,
        ComponentKind::Glass,
    ];

    /// Substrings of a lower-cased type that mark this kind
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            ComponentKind::Battery => &["batterie"],
            ComponentKind::Screen => &["ecran"],
            ComponentKind::Motherboard => &["carte-mere"],
            ComponentKind::Disk => &["disque"],
            ComponentKind::Cable => &["cable"],
            ComponentKind::Keyboard => &["clavier"],
            ComponentKind::Casing => &["coque"],
            ComponentKind::Plastic => &["plastique"],
            ComponentKind::Metal => &["metal", "acier"],
            ComponentKind::Wood => &["bois"],
            ComponentKind::Glass => &["verre"],
        }
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }

    /// Every kind whose keywords appear in the type string
    pub fn classify(component_type: &str) -> KindSet {
        let lowered = component_type.to_lowercase();
        let mut set = KindSet::default();
        for kind in Self::ALL {
            if kind.keywords().iter().any(|kw| lowered.contains(kw)) {
                set.insert(kind);
            }
        }
        set
    }
}

/// Compact set of component kinds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct KindSet(u16);

impl KindSet {
    pub fn insert(&mut self, kind: ComponentKind) {
        self.0 |= kind.bit();
    }

    pub fn contains(self, kind: ComponentKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = ComponentKind> {
        ComponentKind::ALL.into_iter().filter(move |kind| self.contains(*kind))
    }
}
