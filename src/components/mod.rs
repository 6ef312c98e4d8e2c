//! Physical components of a lot
//!
//! - Component records (real or synthesized)
//! - Keyword classification of component types into kinds
//! - Equipment-name decomposition into template component lists

pub mod models;
pub mod kind;
pub mod decomposition;

pub use decomposition::{decompose, decompose_all, EquipmentClass};
pub use kind::{ComponentKind, KindSet};
pub use models::{Component, EquipmentItem};
