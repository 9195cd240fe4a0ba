//! Catalog Fixtures

use serde::Deserialize;

use crate::{
    catalog::{
        Category, SectionId,
        admin::{CatalogAdmin, NewSection},
    },
    fixtures::FixtureError,
    products::ProductId,
};

/// Catalog admin state from YAML
#[derive(Debug, Default, Deserialize)]
pub struct CatalogFixture {
    /// Category names, without `All`
    #[serde(default)]
    pub categories: Vec<String>,

    /// Shop sections
    #[serde(default)]
    pub sections: Vec<SectionFixture>,

    /// Explicit product to section assignments
    #[serde(default)]
    pub assignments: Vec<AssignmentFixture>,
}

/// Shop section fixture from YAML
#[derive(Debug, Deserialize)]
pub struct SectionFixture {
    /// Section id
    pub id: String,

    /// Display name
    pub name: String,

    /// Short blurb
    #[serde(default)]
    pub description: Option<String>,

    /// Category names; may include `All`
    #[serde(default)]
    pub categories: Vec<String>,

    /// Defaults to active
    #[serde(default)]
    pub active: Option<bool>,

    /// Defaults to after the previous section
    #[serde(default)]
    pub display_order: Option<u32>,
}

/// Product assignment fixture from YAML
#[derive(Debug, Deserialize)]
pub struct AssignmentFixture {
    /// Product id
    pub product: String,

    /// Section ids
    pub sections: Vec<String>,
}

impl TryFrom<CatalogFixture> for CatalogAdmin {
    type Error = FixtureError;

    /// Build the admin state through the same operations the back office uses, so a
    /// fixture can't describe a state the admin would refuse.
    fn try_from(fixture: CatalogFixture) -> Result<Self, Self::Error> {
        let mut admin = CatalogAdmin::new();

        for category in &fixture.categories {
            admin.add_category(category)?;
        }

        for section in fixture.sections {
            admin.add_section(NewSection {
                id: Some(SectionId::new(section.id)),
                name: section.name,
                description: section.description,
                categories: section.categories.into_iter().map(Category::new).collect(),
                active: section.active,
                display_order: section.display_order,
            })?;
        }

        for assignment in fixture.assignments {
            admin.assign_product(
                ProductId::new(assignment.product),
                assignment.sections.into_iter().map(SectionId::new),
            )?;
        }

        Ok(admin)
    }
}
