//! Section Resolver
//!
//! Turns the catalog, the configured shop sections and the shopper's filters into the
//! ordered, paginated shelves shown on the shop page.

use tracing::debug;

use crate::{
    catalog::{
        ShopSection,
        assignments::{Assignments, SectionAssignment},
        filter::ProductFilter,
    },
    products::Product,
};

/// Which page of results to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    page_size: usize,
}

impl PageRequest {
    /// Request `page` (1-based) with `page_size` products per page.
    ///
    /// Pages below 1 are treated as page 1 and a zero page size as 1.
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// The 1-based page number.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Products per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, 12)
    }
}

/// One page of a section's products.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPage<'p> {
    /// Products on this page, in display order
    pub products: Vec<&'p Product>,

    /// The 1-based page number
    pub page: usize,

    /// Products per page
    pub page_size: usize,

    /// Matching products across all pages
    pub total_items: usize,

    /// Number of pages, `ceil(total_items / page_size)`
    pub total_pages: usize,
}

impl<'p> ProductPage<'p> {
    fn slice(candidates: Vec<&'p Product>, request: PageRequest) -> Self {
        let total_items = candidates.len();
        let total_pages = total_items.div_ceil(request.page_size);

        let products = candidates
            .into_iter()
            .skip(request.offset())
            .take(request.page_size)
            .collect();

        Self {
            products,
            page: request.page,
            page_size: request.page_size,
            total_items,
            total_pages,
        }
    }

    /// Whether any product matched, on any page.
    pub fn has_matches(&self) -> bool {
        self.total_items > 0
    }

    /// Whether there is a page after this one.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// A section together with the products it shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSection<'p> {
    /// The section
    pub section: ShopSection,

    /// The requested page of its products
    pub page: ProductPage<'p>,
}

/// Resolve the shop page.
///
/// Active sections are emitted in display order, each with its own page of products that
/// pass `filter` and belong in the section. Sections that match nothing while a search or
/// category filter is active are left out. With no sections configured at all, the whole
/// catalog is shown as a single "All Products" section.
pub fn resolve_sections<'p>(
    products: &'p [Product],
    sections: &[ShopSection],
    assignments: &Assignments,
    filter: &ProductFilter,
    request: PageRequest,
) -> Vec<ResolvedSection<'p>> {
    let filtered: Vec<&'p Product> = products.iter().filter(|p| filter.matches(p)).collect();

    if sections.is_empty() {
        let mut candidates = filtered;
        filter.sort(&mut candidates);

        return vec![ResolvedSection {
            section: ShopSection::all_products(),
            page: ProductPage::slice(candidates, request),
        }];
    }

    let memberships: Vec<(&'p Product, SectionAssignment)> = filtered
        .into_iter()
        .map(|product| (product, assignments.get(&product.id)))
        .collect();

    let mut active: Vec<&ShopSection> = sections.iter().filter(|s| s.active).collect();
    active.sort_by_key(|section| section.display_order);

    let filter_active = filter.is_active();

    active
        .into_iter()
        .filter_map(|section| {
            let mut candidates: Vec<&'p Product> = memberships
                .iter()
                .filter(|(product, assignment)| assignment.places_in(section, product))
                .map(|(product, _)| *product)
                .collect();

            if candidates.is_empty() && filter_active {
                debug!(section = %section.id, "suppressing empty section while filtering");
                return None;
            }

            filter.sort(&mut candidates);

            Some(ResolvedSection {
                section: section.clone(),
                page: ProductPage::slice(candidates, request),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::{
        catalog::{SectionId, filter::SortKey},
        products::{ProductFlags, ProductId},
    };

    use super::*;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("a", "Oxford Shirt", 2_000_00, "Casual"),
            Product::new("b", "Tuxedo", 15_000_00, "Formal"),
            Product::new("c", "Denim Jacket", 3_500_00, "Casual").with_flags(ProductFlags {
                is_new: true,
                ..ProductFlags::default()
            }),
            Product::new("d", "Lehenga", 25_000_00, "Wedding"),
        ]
    }

    fn ids(page: &ProductPage<'_>) -> Vec<String> {
        page.products.iter().map(|p| p.id.to_string()).collect()
    }

    fn section_ids(resolved: &[ResolvedSection<'_>]) -> Vec<String> {
        resolved.iter().map(|r| r.section.id.to_string()).collect()
    }

    #[test]
    fn no_sections_falls_back_to_all_products() {
        let products = vec![
            Product::new("A", "Zari Kurta", 1_000_00, "Casual"),
            Product::new("B", "Achkan", 9_000_00, "Formal"),
        ];

        let resolved = resolve_sections(
            &products,
            &[],
            &Assignments::default(),
            &ProductFilter::default(),
            PageRequest::default(),
        );

        let pages: Vec<Vec<String>> = resolved.iter().map(|r| ids(&r.page)).collect();

        assert_eq!(section_ids(&resolved), vec!["all-products"]);
        assert_eq!(pages, vec![vec!["B".to_string(), "A".to_string()]]);
    }

    #[test]
    fn implicit_section_is_kept_even_when_nothing_matches() {
        let products = catalog();

        let resolved = resolve_sections(
            &products,
            &[],
            &Assignments::default(),
            &ProductFilter::default().with_search("velvet"),
            PageRequest::default(),
        );

        assert_eq!(resolved.len(), 1);
        assert!(resolved.iter().all(|r| !r.page.has_matches()));
    }

    #[test]
    fn inactive_sections_are_skipped_and_order_is_respected() {
        let products = catalog();
        let mut casual = ShopSection::new("casual", "Casual", &["Casual"]);
        casual.display_order = 2;
        let mut formal = ShopSection::new("formal", "Formal", &["Formal"]);
        formal.display_order = 1;
        let mut wedding = ShopSection::new("wedding", "Wedding", &["Wedding"]);
        wedding.active = false;

        let resolved = resolve_sections(
            &products,
            &[casual, formal, wedding],
            &Assignments::default(),
            &ProductFilter::default(),
            PageRequest::default(),
        );

        assert_eq!(section_ids(&resolved), vec!["formal", "casual"]);
    }

    #[test]
    fn empty_sections_are_suppressed_only_while_filtering() {
        let products = catalog();
        let sections = [
            ShopSection::new("casual", "Casual", &["Casual"]),
            ShopSection::new("formal", "Formal", &["Formal"]),
        ];

        let unfiltered = resolve_sections(
            &products,
            &sections,
            &Assignments::default(),
            &ProductFilter::default().with_sort(SortKey::Unsorted),
            PageRequest::default(),
        );
        let searched = resolve_sections(
            &products,
            &sections,
            &Assignments::default(),
            &ProductFilter::default().with_search("denim"),
            PageRequest::default(),
        );

        assert_eq!(section_ids(&unfiltered), vec!["casual", "formal"]);
        assert_eq!(section_ids(&searched), vec!["casual"]);
    }

    #[test]
    fn empty_section_without_filters_is_still_rendered() {
        let products = catalog();
        let sections = [ShopSection::new("kids", "Kids", &["Kids"])];

        let resolved = resolve_sections(
            &products,
            &sections,
            &Assignments::default(),
            &ProductFilter::default(),
            PageRequest::default(),
        );

        assert_eq!(section_ids(&resolved), vec!["kids"]);
        assert_eq!(resolved.first().map(|r| r.page.total_pages), Some(0));
    }

    #[test]
    fn explicit_assignment_overrides_category() {
        let products = catalog();
        let sections = [
            ShopSection::new("everything", "Everything", &["All"]),
            ShopSection::new("formal", "Formal", &["Formal"]),
        ];
        let mut assignments = Assignments::default();
        assignments.set(
            ProductId::new("b"),
            SectionAssignment::from_ids([SectionId::new("formal")]),
        );

        let resolved = resolve_sections(
            &products,
            &sections,
            &assignments,
            &ProductFilter::default().with_sort(SortKey::Unsorted),
            PageRequest::default(),
        );

        let pages: Vec<Vec<String>> = resolved.iter().map(|r| ids(&r.page)).collect();

        assert_eq!(
            pages,
            vec![
                vec!["a".to_string(), "c".to_string(), "d".to_string()],
                vec!["b".to_string()],
            ]
        );
    }

    #[test]
    fn pages_slice_sorted_candidates() {
        let products = catalog();
        let sections = [ShopSection::new("everything", "Everything", &["All"])];

        let resolved = resolve_sections(
            &products,
            &sections,
            &Assignments::default(),
            &ProductFilter::default().with_sort(SortKey::PriceLow),
            PageRequest::new(2, 3),
        );

        let Some(section) = resolved.first() else {
            panic!("expected one section");
        };

        assert_eq!(ids(&section.page), vec!["d"]);
        assert_eq!(section.page.total_items, 4);
        assert_eq!(section.page.total_pages, 2);
        assert!(!section.page.has_next());
    }

    #[test]
    fn page_request_clamps_to_first_page() {
        let request = PageRequest::new(0, 0);

        assert_eq!(request.page(), 1);
        assert_eq!(request.page_size(), 1);
    }

    #[test]
    fn pages_past_the_end_are_empty() {
        let products = catalog();

        let resolved = resolve_sections(
            &products,
            &[],
            &Assignments::default(),
            &ProductFilter::default(),
            PageRequest::new(5, 10),
        );

        let Some(section) = resolved.first() else {
            panic!("expected the implicit section");
        };

        assert!(section.page.products.is_empty());
        assert_eq!(section.page.total_pages, 1);
    }
}
