//! Catalog Admin
//!
//! Back-office reference data: categories, shop sections and explicit product to section
//! assignments. Deleting a category or a section cascades into everything that refers to
//! it.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    catalog::{
        CatalogError, Category, SectionId, ShopSection,
        assignments::{Assignments, SectionAssignment},
        filter::ProductFilter,
        resolver::{PageRequest, ResolvedSection, resolve_sections},
    },
    products::{Product, ProductId},
};

/// Form data for a new shop section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewSection {
    /// Explicit id; derived from the name when absent
    pub id: Option<SectionId>,

    /// Display name
    pub name: String,

    /// Short blurb
    pub description: Option<String>,

    /// Categories to show
    pub categories: Vec<Category>,

    /// Defaults to active
    pub active: Option<bool>,

    /// Defaults to after every existing section
    pub display_order: Option<u32>,
}

impl NewSection {
    /// A section called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Use an explicit id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<SectionId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Show these categories.
    #[must_use]
    pub fn with_categories(mut self, categories: &[&str]) -> Self {
        self.categories = categories.iter().map(|c| Category::new(*c)).collect();
        self
    }

    /// Set the blurb.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Partial update for an existing section. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionUpdate {
    /// New display name
    pub name: Option<String>,

    /// New blurb
    pub description: Option<String>,

    /// Replacement category list
    pub categories: Option<Vec<Category>>,

    /// New active flag
    pub active: Option<bool>,

    /// New position
    pub display_order: Option<u32>,
}

/// Categories, sections and assignments as managed from the back office.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogAdmin {
    #[serde(default)]
    categories: Vec<Category>,

    #[serde(default)]
    sections: Vec<ShopSection>,

    #[serde(default)]
    assignments: Assignments,
}

impl CatalogAdmin {
    /// Empty admin state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configured categories, without the `All` sentinel.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Options for the category filter: `All` followed by every configured category.
    pub fn category_options(&self) -> Vec<Category> {
        std::iter::once(Category::all())
            .chain(self.categories.iter().cloned())
            .collect()
    }

    /// Configured sections, active or not.
    pub fn sections(&self) -> &[ShopSection] {
        &self.sections
    }

    /// Look up a section.
    pub fn section(&self, id: &SectionId) -> Option<&ShopSection> {
        self.sections.iter().find(|s| &s.id == id)
    }

    /// Explicit product assignments.
    pub fn assignments(&self) -> &Assignments {
        &self.assignments
    }

    /// Add a category.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::EmptyName`]: the name is blank.
    /// - [`CatalogError::ReservedCategory`]: the name is `All`.
    /// - [`CatalogError::DuplicateCategory`]: a category with the same name, ignoring case,
    ///   already exists.
    pub fn add_category(&mut self, name: &str) -> Result<Category, CatalogError> {
        let name = name.trim();

        if name.is_empty() {
            return Err(CatalogError::EmptyName("Category"));
        }

        if name.eq_ignore_ascii_case(Category::ALL) {
            return Err(CatalogError::ReservedCategory);
        }

        if self
            .categories
            .iter()
            .any(|c| c.as_str().to_lowercase() == name.to_lowercase())
        {
            return Err(CatalogError::DuplicateCategory(name.to_string()));
        }

        let category = Category::new(name);
        self.categories.push(category.clone());

        Ok(category)
    }

    /// Delete a category and remove it from every section.
    ///
    /// Products in the category are untouched; they simply stop matching sections by
    /// category. Returns the number of sections that referenced it.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::ReservedCategory`]: `All` can never be deleted.
    /// - [`CatalogError::UnknownCategory`]: no such category.
    pub fn delete_category(&mut self, name: &str) -> Result<usize, CatalogError> {
        let category = Category::new(name.trim());

        if category.is_all() {
            return Err(CatalogError::ReservedCategory);
        }

        let before = self.categories.len();
        self.categories.retain(|c| c != &category);

        if self.categories.len() == before {
            return Err(CatalogError::UnknownCategory(category.as_str().to_string()));
        }

        let sections_changed = self
            .sections
            .iter_mut()
            .map(|section| section.remove_category(&category))
            .filter(|changed| *changed)
            .count();

        info!(%category, sections_changed, "deleted category");

        Ok(sections_changed)
    }

    /// Add a section.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::EmptyName`]: the name is blank.
    /// - [`CatalogError::DuplicateSection`]: the id is already taken.
    /// - [`CatalogError::UnknownCategory`]: a listed category does not exist.
    pub fn add_section(&mut self, new: NewSection) -> Result<SectionId, CatalogError> {
        let name = new.name.trim();

        if name.is_empty() {
            return Err(CatalogError::EmptyName("Section"));
        }

        let id = match new.id {
            Some(id) if self.section(&id).is_some() => {
                return Err(CatalogError::DuplicateSection(id));
            }
            Some(id) => id,
            None => self.unique_slug(name),
        };

        self.ensure_known_categories(&new.categories)?;

        let display_order = new.display_order.unwrap_or_else(|| self.next_display_order());

        let mut section = ShopSection {
            id: id.clone(),
            name: name.to_string(),
            description: new.description.unwrap_or_default(),
            categories: Vec::with_capacity(new.categories.len()),
            active: new.active.unwrap_or(true),
            display_order,
        };

        for category in new.categories {
            section.add_category(category);
        }

        info!(section = %id, "added section");

        self.sections.push(section);

        Ok(id)
    }

    /// Apply a partial update to a section.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::UnknownSection`]: no such section.
    /// - [`CatalogError::EmptyName`]: the new name is blank.
    /// - [`CatalogError::UnknownCategory`]: a listed category does not exist.
    pub fn update_section(
        &mut self,
        id: &SectionId,
        update: SectionUpdate,
    ) -> Result<(), CatalogError> {
        if let Some(categories) = &update.categories {
            self.ensure_known_categories(categories)?;
        }

        if update.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(CatalogError::EmptyName("Section"));
        }

        let section = self.section_mut(id)?;

        if let Some(name) = update.name {
            section.name = name.trim().to_string();
        }

        if let Some(description) = update.description {
            section.description = description;
        }

        if let Some(categories) = update.categories {
            section.categories.clear();

            for category in categories {
                section.add_category(category);
            }
        }

        if let Some(active) = update.active {
            section.active = active;
        }

        if let Some(display_order) = update.display_order {
            section.display_order = display_order;
        }

        Ok(())
    }

    /// Show or hide a section.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownSection`] if there is no such section.
    pub fn set_section_active(&mut self, id: &SectionId, active: bool) -> Result<(), CatalogError> {
        self.section_mut(id)?.active = active;

        Ok(())
    }

    /// Delete a section, removing it from every product assignment.
    ///
    /// Assignments left without any section are dropped, so those products go back to
    /// category matching.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownSection`] if there is no such section.
    pub fn delete_section(&mut self, id: &SectionId) -> Result<ShopSection, CatalogError> {
        let index = self
            .sections
            .iter()
            .position(|s| &s.id == id)
            .ok_or_else(|| CatalogError::UnknownSection(id.clone()))?;

        let removed = self.sections.remove(index);
        let assignments_changed = self.assignments.remove_section(id);

        info!(section = %id, assignments_changed, "deleted section");

        Ok(removed)
    }

    /// Pin a product to exactly `sections`. An empty list clears the assignment.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownSection`] if any id does not exist.
    pub fn assign_product(
        &mut self,
        product: ProductId,
        sections: impl IntoIterator<Item = SectionId>,
    ) -> Result<(), CatalogError> {
        let assignment = SectionAssignment::from_ids(sections);

        if let SectionAssignment::AssignedTo(ids) = &assignment
            && let Some(unknown) = ids.iter().find(|id| self.section(id).is_none())
        {
            return Err(CatalogError::UnknownSection(unknown.clone()));
        }

        self.assignments.set(product, assignment);

        Ok(())
    }

    /// How `product` relates to the sections.
    pub fn assignment(&self, product: &ProductId) -> SectionAssignment {
        self.assignments.get(product)
    }

    /// Active sections `product` currently appears in, ignoring shopper filters.
    pub fn sections_for_product(&self, product: &Product) -> Vec<&SectionId> {
        let assignment = self.assignment(&product.id);

        self.sections
            .iter()
            .filter(|section| section.active && assignment.places_in(section, product))
            .map(|section| &section.id)
            .collect()
    }

    /// Resolve the shop page against this admin state.
    pub fn resolve<'p>(
        &self,
        products: &'p [Product],
        filter: &ProductFilter,
        request: PageRequest,
    ) -> Vec<ResolvedSection<'p>> {
        resolve_sections(products, &self.sections, &self.assignments, filter, request)
    }

    fn section_mut(&mut self, id: &SectionId) -> Result<&mut ShopSection, CatalogError> {
        self.sections
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| CatalogError::UnknownSection(id.clone()))
    }

    fn ensure_known_categories(&self, categories: &[Category]) -> Result<(), CatalogError> {
        match categories
            .iter()
            .find(|c| !c.is_all() && !self.categories.contains(c))
        {
            Some(unknown) => Err(CatalogError::UnknownCategory(unknown.as_str().to_string())),
            None => Ok(()),
        }
    }

    fn next_display_order(&self) -> u32 {
        self.sections
            .iter()
            .map(|s| s.display_order.saturating_add(1))
            .max()
            .unwrap_or(0)
    }

    fn unique_slug(&self, name: &str) -> SectionId {
        let base = SectionId::slug(name);

        if self.section(&base).is_none() {
            return base;
        }

        (2_u32..)
            .map(|n| SectionId::new(format!("{base}-{n}")))
            .find(|candidate| self.section(candidate).is_none())
            .unwrap_or(base)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn admin() -> Result<CatalogAdmin, CatalogError> {
        let mut admin = CatalogAdmin::new();

        admin.add_category("Formal")?;
        admin.add_category("Casual")?;
        admin.add_category("Wedding")?;

        admin.add_section(
            NewSection::new("Occasion Wear").with_categories(&["Formal", "Wedding"]),
        )?;
        admin.add_section(NewSection::new("Everyday").with_categories(&["Casual", "All"]))?;

        Ok(admin)
    }

    #[test]
    fn all_is_reserved() -> TestResult {
        let mut admin = admin()?;

        assert_eq!(admin.add_category("all"), Err(CatalogError::ReservedCategory));
        assert_eq!(admin.delete_category("All"), Err(CatalogError::ReservedCategory));

        Ok(())
    }

    #[test]
    fn duplicate_and_blank_categories_are_rejected() -> TestResult {
        let mut admin = admin()?;

        assert_eq!(
            admin.add_category(" formal "),
            Err(CatalogError::DuplicateCategory("formal".to_string()))
        );
        assert_eq!(admin.add_category("  "), Err(CatalogError::EmptyName("Category")));

        Ok(())
    }

    #[test]
    fn category_options_start_with_all() -> TestResult {
        let admin = admin()?;

        let options: Vec<String> = admin
            .category_options()
            .iter()
            .map(ToString::to_string)
            .collect();

        assert_eq!(options, vec!["All", "Formal", "Casual", "Wedding"]);

        Ok(())
    }

    #[test]
    fn deleting_a_category_cascades_into_sections() -> TestResult {
        let mut admin = admin()?;

        let changed = admin.delete_category("Wedding")?;

        assert_eq!(changed, 1);
        assert!(
            admin
                .sections()
                .iter()
                .all(|s| !s.includes_category(&Category::new("Wedding")))
        );
        assert_eq!(
            admin.delete_category("Wedding"),
            Err(CatalogError::UnknownCategory("Wedding".to_string()))
        );

        Ok(())
    }

    #[test]
    fn sections_get_unique_slugs_and_increasing_order() -> TestResult {
        let mut admin = admin()?;

        let id = admin.add_section(NewSection::new("Occasion Wear"))?;

        assert_eq!(id.as_str(), "occasion-wear-2");
        assert_eq!(admin.section(&id).map(|s| s.display_order), Some(2));

        Ok(())
    }

    #[test]
    fn sections_reject_unknown_categories() -> TestResult {
        let mut admin = admin()?;

        let result = admin.add_section(NewSection::new("Kids").with_categories(&["Kids"]));

        assert_eq!(result, Err(CatalogError::UnknownCategory("Kids".to_string())));

        Ok(())
    }

    #[test]
    fn explicit_duplicate_ids_are_rejected() -> TestResult {
        let mut admin = admin()?;

        let result = admin.add_section(NewSection::new("Again").with_id("everyday"));

        assert_eq!(
            result,
            Err(CatalogError::DuplicateSection(SectionId::new("everyday")))
        );

        Ok(())
    }

    #[test]
    fn update_section_applies_only_given_fields() -> TestResult {
        let mut admin = admin()?;
        let id = SectionId::new("everyday");

        admin.update_section(
            &id,
            SectionUpdate {
                categories: Some(vec![Category::new("Casual")]),
                active: Some(false),
                ..SectionUpdate::default()
            },
        )?;

        let section = admin.section(&id).ok_or("missing section")?;

        assert_eq!(section.name, "Everyday");
        assert_eq!(section.categories, vec![Category::new("Casual")]);
        assert!(!section.active);

        Ok(())
    }

    #[test]
    fn deleting_a_section_prunes_assignments() -> TestResult {
        let mut admin = admin()?;
        let product = ProductId::new("p1");

        admin.assign_product(product.clone(), [SectionId::new("everyday")])?;
        admin.delete_section(&SectionId::new("everyday"))?;

        assert_eq!(admin.assignment(&product), SectionAssignment::Unassigned);
        assert!(admin.assignments().is_empty());

        Ok(())
    }

    #[test]
    fn assigning_to_unknown_sections_fails() -> TestResult {
        let mut admin = admin()?;

        let result = admin.assign_product(ProductId::new("p1"), [SectionId::new("nope")]);

        assert_eq!(result, Err(CatalogError::UnknownSection(SectionId::new("nope"))));
        assert!(admin.assignments().is_empty());

        Ok(())
    }

    #[test]
    fn sections_for_product_follow_assignment_then_category() -> TestResult {
        let mut admin = admin()?;
        let tuxedo = Product::new("p1", "Tuxedo", 15_000_00, "Formal");

        let fallback: Vec<&str> = admin
            .sections_for_product(&tuxedo)
            .into_iter()
            .map(SectionId::as_str)
            .collect();
        assert_eq!(fallback, vec!["occasion-wear", "everyday"]);

        admin.assign_product(tuxedo.id.clone(), [SectionId::new("occasion-wear")])?;

        let pinned: Vec<&str> = admin
            .sections_for_product(&tuxedo)
            .into_iter()
            .map(SectionId::as_str)
            .collect();
        assert_eq!(pinned, vec!["occasion-wear"]);

        Ok(())
    }
}
