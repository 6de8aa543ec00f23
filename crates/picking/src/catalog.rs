use glam::Vec3;
use serde::{Deserialize, Serialize};
use showroom_common::ItemId;
use std::collections::BTreeSet;

/// Which procedural builder dresses an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FurnitureKind {
    Lounge,
    CoffeeTable,
    Dining,
    Bar,
    DisplayPiece,
}

/// Static description of one interactable showroom item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: ItemId,
    pub name: String,
    pub info: String,
    pub position: Vec3,
    pub kind: FurnitureKind,
    /// Body colour as `0xRRGGBB`.
    #[serde(default)]
    pub color: Option<u32>,
    /// Radius and length for display pieces.
    #[serde(default)]
    pub size: Option<[f32; 2]>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog entry has an empty id")]
    EmptyId,
    #[error("duplicate catalog id: {0}")]
    DuplicateId(ItemId),
}

/// Immutable set of catalog entries, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut seen = BTreeSet::new();
        for entry in &entries {
            if entry.id.as_str().is_empty() {
                return Err(CatalogError::EmptyId);
            }
            if !seen.insert(entry.id.clone()) {
                return Err(CatalogError::DuplicateId(entry.id.clone()));
            }
        }
        Ok(Self { entries })
    }

    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The furnished showroom the application ships with.
    pub fn showroom() -> Self {
        let entry = |id: &str,
                     name: &str,
                     info: &str,
                     position: Vec3,
                     kind: FurnitureKind,
                     color: Option<u32>,
                     size: Option<[f32; 2]>| {
            CatalogEntry {
                id: ItemId::new(id),
                name: name.into(),
                info: info.into(),
                position,
                kind,
                color,
                size,
            }
        };
        Self {
            entries: vec![
                entry(
                    "lounge",
                    "Beige lounge",
                    "Modular beige sofa with chaise, premium Scandinavian style.",
                    Vec3::new(-6.0, 0.0, -2.5),
                    FurnitureKind::Lounge,
                    Some(0xcfc9c1),
                    None,
                ),
                entry(
                    "lounge2",
                    "Olive lounge",
                    "Olive green modular sofa with symmetric modules.",
                    Vec3::new(6.0, 0.0, 0.0),
                    FurnitureKind::Lounge,
                    Some(0x7b8a6a),
                    None,
                ),
                entry(
                    "coffee",
                    "Oak coffee table",
                    "Low table in light oak on a black metal frame.",
                    Vec3::new(-6.0, 0.0, -2.5),
                    FurnitureKind::CoffeeTable,
                    None,
                    None,
                ),
                entry(
                    "dining",
                    "Nordic dining set",
                    "Light oak table with beige upholstered chairs on black frames.",
                    Vec3::new(5.5, 0.0, 0.5),
                    FurnitureKind::Dining,
                    None,
                    None,
                ),
                entry(
                    "bar",
                    "Minimal bar",
                    "Smooth ivory counter, black plinth, metal stools.",
                    Vec3::new(0.0, 0.0, 4.0),
                    FurnitureKind::Bar,
                    None,
                    None,
                ),
                entry(
                    "sculpt",
                    "Sculptural piece",
                    "Metal object on a light pedestal.",
                    Vec3::new(-6.0, 0.5, -2.5),
                    FurnitureKind::DisplayPiece,
                    Some(0xbba78c),
                    Some([0.28, 0.35]),
                ),
                entry(
                    "lamp",
                    "Column lamp",
                    "Dark metal column with a frosted diffuser.",
                    Vec3::new(6.2, 1.0, 0.2),
                    FurnitureKind::DisplayPiece,
                    Some(0x2b2c30),
                    Some([0.18, 0.45]),
                ),
            ],
        }
    }

    pub fn get(&self, id: &ItemId) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn showroom_catalog_is_valid() {
        let c = Catalog::showroom();
        assert_eq!(c.len(), 7);
        let entries: Vec<CatalogEntry> = c.iter().cloned().collect();
        assert!(Catalog::new(entries).is_ok());
        let lamp = c.get(&ItemId::new("lamp")).unwrap();
        assert_eq!(lamp.kind, FurnitureKind::DisplayPiece);
        assert_eq!(lamp.size, Some([0.18, 0.45]));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let c = Catalog::showroom();
        let mut entries: Vec<CatalogEntry> = c.iter().cloned().collect();
        entries.push(entries[0].clone());
        assert_eq!(
            Catalog::new(entries),
            Err(CatalogError::DuplicateId(ItemId::new("lounge")))
        );
    }

    #[test]
    fn empty_id_rejected() {
        let mut entry = Catalog::showroom().iter().next().unwrap().clone();
        entry.id = ItemId::new("");
        assert_eq!(Catalog::new(vec![entry]), Err(CatalogError::EmptyId));
    }

    #[test]
    fn missing_lookup() {
        assert!(Catalog::empty().get(&ItemId::new("lounge")).is_none());
    }
}
