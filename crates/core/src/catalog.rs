//! The produce catalog and catalog filtering.
//!
//! The catalog is a fixed list defined at compile time and shared read-only
//! by every session. Lookups are linear: the list is small enough that a
//! map would buy nothing.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Fruit,
    Vegetable,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 2] = [Self::Fruit, Self::Vegetable];

    /// Customer-facing label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fruit => "Frutas",
            Self::Vegetable => "Verduras",
        }
    }

    /// Form value used in filter controls.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Fruit => "fruit",
            Self::Vegetable => "vegetable",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An immutable catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: &'static str,
    pub category: Category,
    pub price: Price,
    pub unit: &'static str,
    pub emoji: &'static str,
}

const fn product(
    id: i32,
    name: &'static str,
    category: Category,
    price: u64,
    unit: &'static str,
    emoji: &'static str,
) -> Product {
    Product {
        id: ProductId::new(id),
        name,
        category,
        price: Price::new(price),
        unit,
        emoji,
    }
}

static CATALOG: [Product; 20] = [
    product(1, "Manzana Roja", Category::Fruit, 2500, "kg", "🍎"),
    product(2, "Banano", Category::Fruit, 1800, "kg", "🍌"),
    product(3, "Naranja", Category::Fruit, 2000, "kg", "🍊"),
    product(4, "Fresa", Category::Fruit, 4500, "lb", "🍓"),
    product(5, "Uva", Category::Fruit, 5000, "kg", "🍇"),
    product(6, "Mango", Category::Fruit, 3000, "kg", "🥭"),
    product(7, "Piña", Category::Fruit, 3500, "unidad", "🍍"),
    product(8, "Sandía", Category::Fruit, 4000, "unidad", "🍉"),
    product(9, "Limón", Category::Fruit, 2200, "kg", "🍋"),
    product(10, "Papaya", Category::Fruit, 2800, "kg", "🥭"),
    product(11, "Tomate", Category::Vegetable, 2500, "kg", "🍅"),
    product(12, "Cebolla", Category::Vegetable, 1500, "kg", "🧅"),
    product(13, "Zanahoria", Category::Vegetable, 1800, "kg", "🥕"),
    product(14, "Papa", Category::Vegetable, 1600, "kg", "🥔"),
    product(15, "Lechuga", Category::Vegetable, 1200, "unidad", "🥬"),
    product(16, "Pepino", Category::Vegetable, 1400, "kg", "🥒"),
    product(17, "Pimentón", Category::Vegetable, 3000, "kg", "🫑"),
    product(18, "Brócoli", Category::Vegetable, 3500, "kg", "🥦"),
    product(19, "Espinaca", Category::Vegetable, 2000, "manojo", "🥬"),
    product(20, "Ajo", Category::Vegetable, 8000, "kg", "🧄"),
];

/// The full catalog in display order.
#[must_use]
pub fn catalog() -> &'static [Product] {
    &CATALOG
}

/// Find a product by id.
#[must_use]
pub fn find_product(products: &[Product], id: ProductId) -> Option<&Product> {
    products.iter().find(|p| p.id == id)
}

/// Category selector: everything, or one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Whether `product` passes this filter.
    #[must_use]
    pub fn matches(self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => product.category == category,
        }
    }

    /// Form value used in filter controls.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(category) => category.as_param(),
        }
    }
}

/// Error parsing a category filter form value.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for CategoryFilter {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "all" => Ok(Self::All),
            "fruit" => Ok(Self::Only(Category::Fruit)),
            "vegetable" => Ok(Self::Only(Category::Vegetable)),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// Whether `product`'s name contains `term`, ignoring case.
///
/// An empty term matches everything.
#[must_use]
pub fn matches_search(product: &Product, term: &str) -> bool {
    term.is_empty() || product.name.to_lowercase().contains(&term.to_lowercase())
}

/// Catalog view state: category selector plus search box.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFilter {
    pub category: CategoryFilter,
    pub search: String,
}

impl CatalogFilter {
    /// Products passing both filters, in catalog order.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products
            .iter()
            .filter(|p| self.category.matches(p))
            .filter(|p| matches_search(p, &self.search))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(products: &[&Product]) -> Vec<i32> {
        products.iter().map(|p| p.id.as_i32()).collect()
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        let mut seen: Vec<i32> = catalog().iter().map(|p| p.id.as_i32()).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), catalog().len());
    }

    #[test]
    fn test_find_product() {
        let tomato = find_product(catalog(), ProductId::new(11)).expect("tomato");
        assert_eq!(tomato.name, "Tomate");
        assert_eq!(tomato.price, Price::new(2500));
        assert!(find_product(catalog(), ProductId::new(99)).is_none());
    }

    #[test]
    fn test_default_filter_returns_whole_catalog_in_order() {
        let all = CatalogFilter::default().apply(catalog());
        assert_eq!(ids(&all), (1..=20).collect::<Vec<_>>());
    }

    #[test]
    fn test_category_filter() {
        let filter = CatalogFilter {
            category: CategoryFilter::Only(Category::Vegetable),
            search: String::new(),
        };
        let veg = filter.apply(catalog());
        assert_eq!(ids(&veg), (11..=20).collect::<Vec<_>>());
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let filter = CatalogFilter {
            category: CategoryFilter::All,
            search: "PA".to_string(),
        };
        // Papaya, Papa
        assert_eq!(ids(&filter.apply(catalog())), vec![10, 14]);

        let accented = CatalogFilter {
            category: CategoryFilter::All,
            search: "piÑa".to_string(),
        };
        assert_eq!(ids(&accented.apply(catalog())), vec![7]);
    }

    #[test]
    fn test_filters_intersect() {
        let filter = CatalogFilter {
            category: CategoryFilter::Only(Category::Fruit),
            search: "pa".to_string(),
        };
        assert_eq!(ids(&filter.apply(catalog())), vec![10]);
    }

    #[test]
    fn test_empty_result_is_valid() {
        let filter = CatalogFilter {
            category: CategoryFilter::Only(Category::Fruit),
            search: "ajo".to_string(),
        };
        assert!(filter.apply(catalog()).is_empty());
    }

    #[test]
    fn test_filter_order_does_not_matter() {
        let terms = ["", "a", "PA", "ñ", "on", "zzz", "e"];
        let categories = [
            CategoryFilter::All,
            CategoryFilter::Only(Category::Fruit),
            CategoryFilter::Only(Category::Vegetable),
        ];

        for category in categories {
            for term in terms {
                let category_first: Vec<&Product> = catalog()
                    .iter()
                    .filter(|p| category.matches(p))
                    .filter(|p| matches_search(p, term))
                    .collect();
                let search_first: Vec<&Product> = catalog()
                    .iter()
                    .filter(|p| matches_search(p, term))
                    .filter(|p| category.matches(p))
                    .collect();
                assert_eq!(
                    ids(&category_first),
                    ids(&search_first),
                    "category={category:?} term={term:?}"
                );
            }
        }
    }

    #[test]
    fn test_category_filter_from_str() {
        assert_eq!("all".parse::<CategoryFilter>().ok(), Some(CategoryFilter::All));
        assert_eq!("".parse::<CategoryFilter>().ok(), Some(CategoryFilter::All));
        assert_eq!(
            "fruit".parse::<CategoryFilter>().ok(),
            Some(CategoryFilter::Only(Category::Fruit))
        );
        assert!("meat".parse::<CategoryFilter>().is_err());
    }
}
