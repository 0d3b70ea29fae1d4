use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::catalog::CatalogViewModel;
use crate::paginator::{PageControl, PageControlKind};
use crate::types::Product;

use super::format_empty_state;

/// A row in the product listing table
#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Image")]
    image: String,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price_label(),
            category: product.category.name.clone(),
            image: product.primary_image().unwrap_or_default().to_string(),
        }
    }
}

/// Format products as a table
pub fn format_product_table(products: &[Product]) -> String {
    let rows: Vec<ProductRow> = products.iter().map(ProductRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// Format the paginator strip. The current page is highlighted.
pub fn format_paginator(controls: &[PageControl]) -> String {
    controls
        .iter()
        .map(|control| {
            if control.kind == PageControlKind::Current {
                format!("[{}]", control.label()).bold().to_string()
            } else {
                control.label()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_placeholders(count: usize) -> String {
    (0..count)
        .map(|_| format!("{:>5} {}", "", "░░░░░░░░░░░░░░░░░░░░".dimmed()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the whole listing screen: search box, cards or empty state,
/// paginator and a summary line.
pub fn format_listing(view: &CatalogViewModel) -> String {
    let mut output = String::new();

    if !view.search_term.is_empty() {
        output.push_str(&format!("{} {}\n\n", "Search:".cyan(), view.search_term));
    }

    if view.loading {
        output.push_str(&format_placeholders(view.placeholder_count));
        output.push('\n');
    }

    match &view.empty_state {
        Some(kind) => {
            output.push_str(&format_empty_state(kind));
            output.push('\n');
        }
        None => {
            output.push_str(&format_product_table(&view.items));
            output.push('\n');
        }
    }

    // A failed reload keeps showing the previous catalog
    if view.empty_state.is_some() && !view.loading && !view.items.is_empty() {
        output.push_str(&format_product_table(&view.items));
        output.push('\n');
    }

    if !view.loading {
        output.push('\n');
        output.push_str(&format_paginator(&view.controls));
        output.push('\n');
        output.push_str(
            &format!(
                "Page {} of {}, {} of {} products",
                view.page, view.max_page, view.total_filtered, view.total_all
            )
            .dimmed()
            .to_string(),
        );
    }

    output
}
