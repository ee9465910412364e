//! Catalog page and filters.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, response::Redirect};
use mercado_core::{Category, CategoryFilter, Product, StoreSession};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::StoreContext;

/// Longest search term kept in the session.
const MAX_SEARCH_LEN: usize = 100;

/// Product card display data.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: i32,
    pub name: &'static str,
    pub emoji: &'static str,
    pub category: &'static str,
    pub price: String,
    pub unit: &'static str,
    pub in_cart: u32,
}

/// Category selector option.
#[derive(Clone)]
pub struct CategoryOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog.html")]
pub struct CatalogTemplate {
    pub cart_count: u32,
    pub categories: Vec<CategoryOption>,
    pub search: String,
    pub products: Vec<ProductCardView>,
}

/// Filter form data.
#[derive(Debug, Deserialize)]
pub struct FilterForm {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub search: String,
}

fn category_options(current: CategoryFilter) -> Vec<CategoryOption> {
    let all = CategoryOption {
        value: CategoryFilter::All.as_param(),
        label: "Todas",
        selected: current == CategoryFilter::All,
    };
    std::iter::once(all)
        .chain(Category::ALL.into_iter().map(|category| CategoryOption {
            value: category.as_param(),
            label: category.label(),
            selected: current == CategoryFilter::Only(category),
        }))
        .collect()
}

/// Build the catalog page from the session's filters.
#[must_use]
pub fn page(products: &[Product], session: &StoreSession) -> CatalogTemplate {
    let cards = session
        .filter
        .apply(products)
        .into_iter()
        .map(|product| ProductCardView {
            id: product.id.as_i32(),
            name: product.name,
            emoji: product.emoji,
            category: product.category.label(),
            price: product.price.to_string(),
            unit: product.unit,
            in_cart: session.cart.quantity_of(product.id),
        })
        .collect();

    CatalogTemplate {
        cart_count: session.cart.count(),
        categories: category_options(session.filter.category),
        search: session.filter.search.clone(),
        products: cards,
    }
}

/// Update the catalog filters.
#[instrument(skip_all, fields(category = %form.category))]
pub async fn filter(mut ctx: StoreContext, Form(form): Form<FilterForm>) -> Result<Redirect> {
    let category = form
        .category
        .parse::<CategoryFilter>()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    ctx.data.filter.category = category;
    ctx.data.filter.search = form.search.trim().chars().take(MAX_SEARCH_LEN).collect();
    ctx.save().await?;

    Ok(Redirect::to("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mercado_core::{CatalogFilter, ProductId, catalog};

    #[test]
    fn test_page_shows_quantities_in_cart() {
        let mut session = StoreSession::default();
        session.cart.add(ProductId::new(4));
        session.cart.add(ProductId::new(4));

        let page = page(catalog(), &session);
        assert_eq!(page.products.len(), 20);
        assert_eq!(page.cart_count, 2);

        let strawberry = page.products.iter().find(|p| p.id == 4).expect("fresa");
        assert_eq!(strawberry.in_cart, 2);
        assert_eq!(strawberry.price, "$4.500");
        assert!(page.products.iter().filter(|p| p.id != 4).all(|p| p.in_cart == 0));
    }

    #[test]
    fn test_page_applies_session_filter() {
        let session = StoreSession {
            filter: CatalogFilter {
                category: CategoryFilter::Only(Category::Vegetable),
                search: "pi".to_string(),
            },
            ..StoreSession::default()
        };

        let page = page(catalog(), &session);
        let names: Vec<&str> = page.products.iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Pepino", "Pimentón", "Espinaca"]);
        assert_eq!(page.search, "pi");
    }

    #[test]
    fn test_no_results_message() {
        let session = StoreSession {
            filter: CatalogFilter {
                category: CategoryFilter::All,
                search: "kiwi".to_string(),
            },
            ..StoreSession::default()
        };

        let html = page(catalog(), &session).render().expect("render");
        assert!(html.contains("No se encontraron productos con esos criterios."));
    }

    #[test]
    fn test_category_options_mark_selection() {
        let options = category_options(CategoryFilter::Only(Category::Fruit));
        let selected: Vec<&str> = options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value)
            .collect();
        assert_eq!(selected, vec!["fruit"]);
        assert_eq!(options.len(), 3);
    }
}
