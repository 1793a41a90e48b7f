use serde::{Deserialize, Serialize};

/// The two fixed inspection checklists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistCategory {
    General,
    Fire,
}

impl ChecklistCategory {
    pub const fn ordered() -> [Self; 2] {
        [Self::General, Self::Fire]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::General => "General Safety",
            Self::Fire => "Fire Safety",
        }
    }
}

const GENERAL_SAFETY_ITEMS: [&str; 16] = [
    "Workplace is clean and orderly.",
    "Floors are clear and aisles, hallways, and exits are unobstructed.",
    "Floor surfaces are kept dry and free of slip hazards.",
    "Stairways, sidewalks, and ramps are free of defects (e.g. damaged treads, frayed carpet).",
    "Illumination is adequate in all common areas and workstations.",
    "Emergency evacuation plans are posted at eye level in every stairway and elevator landing, and immediately inside all public entrances to the building.",
    "All containers, including non-hazardous chemicals and wastes, are labeled with the full chemical or trade name.",
    "Stored materials are secured & limited in height to prevent collapse.",
    "36\" clearance maintained for electrical panels.",
    "Electrical cords and plugs are in good condition with proper grounding.",
    "Extension cords and power strips are not daisy-chained and no permanent extension cords are in use.",
    "Portable electric heaters have at least 36\" of clearance from combustible materials (e.g. paper).",
    "Equipment and machines are clean and working properly.",
    "Adequate ventilation is provided to machines for preventing buildup of heat or gas emissions.",
    "Emergency stop switches on machines are identified and in proper working order.",
    "Mechanical safeguards are in place and in proper working order (e.g. paper cutter guards).",
];

const FIRE_SAFETY_ITEMS: [&str; 6] = [
    "Emergency exit signs are properly displayed.",
    "Fire alarms and fire extinguishers are visible and accessible.",
    "Fire doors (e.g. in stairways) are kept closed unless equipped with automatic closing device.",
    "18\" vertical clearance is maintained below all sprinkler heads.",
    "Fire extinguishers are serviced annually.",
    "Corridors and stairways are kept free of obstruction and not used for storage.",
];

/// Ordered item descriptions for both checklists. Item numbers are 1-based
/// positions into these lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistCatalog {
    general: Vec<String>,
    fire: Vec<String>,
}

impl ChecklistCatalog {
    /// Alternate catalogs are only meant for tests and tooling; the service
    /// runs on [`ChecklistCatalog::standard`].
    pub fn new<G, F>(general: G, fire: F) -> Self
    where
        G: IntoIterator,
        G::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        Self {
            general: general.into_iter().map(Into::into).collect(),
            fire: fire.into_iter().map(Into::into).collect(),
        }
    }

    pub fn standard() -> Self {
        Self::new(GENERAL_SAFETY_ITEMS, FIRE_SAFETY_ITEMS)
    }

    pub fn items_of(&self, category: ChecklistCategory) -> &[String] {
        match category {
            ChecklistCategory::General => &self.general,
            ChecklistCategory::Fire => &self.fire,
        }
    }

    pub fn count(&self, category: ChecklistCategory) -> usize {
        self.items_of(category).len()
    }

    pub fn description(&self, category: ChecklistCategory, item_number: u32) -> Option<&str> {
        let index = usize::try_from(item_number).ok()?.checked_sub(1)?;
        self.items_of(category).get(index).map(String::as_str)
    }
}

impl Default for ChecklistCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_has_fixed_lengths() {
        let catalog = ChecklistCatalog::standard();
        assert_eq!(catalog.count(ChecklistCategory::General), 16);
        assert_eq!(catalog.count(ChecklistCategory::Fire), 6);
    }

    #[test]
    fn description_uses_one_based_item_numbers() {
        let catalog = ChecklistCatalog::standard();
        assert_eq!(
            catalog.description(ChecklistCategory::General, 1),
            Some("Workplace is clean and orderly.")
        );
        assert_eq!(
            catalog.description(ChecklistCategory::Fire, 6),
            Some("Corridors and stairways are kept free of obstruction and not used for storage.")
        );
        assert_eq!(catalog.description(ChecklistCategory::Fire, 0), None);
        assert_eq!(catalog.description(ChecklistCategory::Fire, 7), None);
    }

    #[test]
    fn alternate_catalog_can_be_injected() {
        let catalog = ChecklistCatalog::new(["Exits clear"], Vec::<String>::new());
        assert_eq!(catalog.count(ChecklistCategory::General), 1);
        assert_eq!(catalog.count(ChecklistCategory::Fire), 0);
    }
}
