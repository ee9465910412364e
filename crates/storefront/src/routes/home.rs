//! Landing page.

use askama::Template;
use askama_web::WebTemplate;
use mercado_core::{Product, ProductId, find_product};

/// Products featured on the landing page, in display order.
const FEATURED: [i32; 5] = [1, 2, 11, 13, 15];

/// Featured product tile.
#[derive(Clone)]
pub struct PreviewView {
    pub emoji: &'static str,
    pub name: &'static str,
    pub price: String,
}

impl From<&Product> for PreviewView {
    fn from(product: &Product) -> Self {
        Self {
            emoji: product.emoji,
            name: product.name,
            price: format!("{}/{}", product.price, product.unit),
        }
    }
}

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "landing.html")]
pub struct LandingTemplate {
    pub previews: Vec<PreviewView>,
}

/// Build the landing page.
#[must_use]
pub fn page(products: &[Product]) -> LandingTemplate {
    let previews = FEATURED
        .iter()
        .filter_map(|&id| find_product(products, ProductId::new(id)))
        .map(PreviewView::from)
        .collect();

    LandingTemplate { previews }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mercado_core::catalog;

    #[test]
    fn test_previews_follow_featured_order() {
        let page = page(catalog());
        let names: Vec<&str> = page.previews.iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            vec!["Manzana Roja", "Banano", "Tomate", "Zanahoria", "Lechuga"]
        );
        assert_eq!(page.previews.first().map(|p| p.price.as_str()), Some("$2.500/kg"));
    }

    #[test]
    fn test_missing_featured_products_are_skipped() {
        assert!(page(&[]).previews.is_empty());
    }
}
