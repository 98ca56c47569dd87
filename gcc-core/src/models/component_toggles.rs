use serde::{Deserialize, Serialize};

use super::CostCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComponentToggles {
    pub real_estate: bool,
    pub it_infra: bool,
    pub enabling: bool,
    pub technology: bool,
}

impl ComponentToggles {
    pub fn all() -> Self {
        Self {
            real_estate: true,
            it_infra: true,
            enabling: true,
            technology: true,
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_enabled(
        &self,
        category: CostCategory,
    ) -> bool {
        match category {
            CostCategory::RealEstate => self.real_estate,
            CostCategory::ItInfra => self.it_infra,
            CostCategory::Enabling => self.enabling,
            CostCategory::Technology => self.technology,
        }
    }
}
