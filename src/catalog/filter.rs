//! Title search over the fetched catalog

use crate::types::Product;

/// Case-insensitive substring match.
///
/// Uses `unicase` for Unicode case folding rather than ASCII lowercasing.
pub fn contains_case_insensitive(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let haystack_folded = unicase::UniCase::new(haystack).to_folded_case();
    let needle_folded = unicase::UniCase::new(needle).to_folded_case();
    haystack_folded.contains(&needle_folded)
}

/// Products whose title contains `term`, in catalog order.
///
/// An empty term matches everything.
pub fn filter_by_title(products: &[Product], term: &str) -> Vec<Product> {
    if term.is_empty() {
        return products.to_vec();
    }
    products
        .iter()
        .filter(|p| contains_case_insensitive(&p.title, term))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn make_product(id: u64, title: &str) -> Product {
        Product {
            id,
            title: title.to_string(),
            slug: String::new(),
            price: 10.0,
            description: String::new(),
            images: vec![String::new()],
            category: Category {
                id: 1,
                name: "Clothing".to_string(),
                slug: "clothing".to_string(),
                image: String::new(),
                creation_at: None,
                updated_at: None,
            },
            creation_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_contains_case_insensitive() {
        assert!(contains_case_insensitive("Blue Jeans", "blue"));
        assert!(contains_case_insensitive("Blue Jeans", "BLUE"));
        assert!(contains_case_insensitive("Blue Jeans", "ue Je"));
        assert!(!contains_case_insensitive("Blue Jeans", "red"));
        assert!(contains_case_insensitive("anything", ""));
    }

    #[test]
    fn test_contains_folds_unicode() {
        assert!(contains_case_insensitive("STRASSE Shoes", "straße"));
    }

    #[test]
    fn test_empty_term_keeps_everything() {
        let products = vec![make_product(1, "Blue Jeans"), make_product(2, "Red Shirt")];
        assert_eq!(filter_by_title(&products, ""), products);
    }

    #[test]
    fn test_filter_preserves_order() {
        let products: Vec<Product> = (1..=20)
            .map(|i| make_product(i, &format!("Product {i}")))
            .collect();
        let ids: Vec<u64> = filter_by_title(&products, "Product 2")
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![2, 20]);
    }

    #[test]
    fn test_filter_matches_title_only() {
        let mut product = make_product(1, "Red Shirt");
        product.description = "blue accents".to_string();
        assert!(filter_by_title(&[product], "blue").is_empty());
    }
}
