use owo_colors::OwoColorize;

use crate::detail::DetailViewModel;
use crate::types::RecoveryAction;

use super::format_recovery_hint;

/// Render the product detail view.
pub fn format_product_detail(view: &DetailViewModel) -> String {
    if view.loading {
        return "Loading product...".dimmed().to_string();
    }

    if let Some(error) = &view.error {
        let mut output = error.red().bold().to_string();
        if let Some(action) = view.recovery {
            output.push('\n');
            output.push_str(&format_recovery_hint(action));
        }
        return output;
    }

    let Some(product) = &view.product else {
        return String::new();
    };

    let mut output = String::new();
    output.push_str(&format!(
        "{} {}\n",
        format!("#{}", product.id).cyan(),
        product.title.bold()
    ));
    output.push_str(&format!("{}\n", product.category.name.dimmed()));
    output.push_str(&format!("{}\n", product.price_label().green().bold()));

    if !product.description.is_empty() {
        output.push('\n');
        output.push_str(&product.description);
        output.push('\n');
    }

    if let Some(image) = &view.selected_image {
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Image:".cyan(), image));
    }

    if product.images.len() > 1 {
        let thumbnails = (0..product.images.len())
            .map(|i| {
                let label = (i + 1).to_string();
                if i == view.selected_image_index {
                    format!("[{label}]").bold().to_string()
                } else {
                    label
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        output.push_str(&format!("{} {}\n", "Thumbnails:".cyan(), thumbnails));
    }

    output.push_str(&format!("{} {}\n", "Quantity:".cyan(), view.quantity));
    output.push('\n');
    output.push_str(&format_recovery_hint(RecoveryAction::BackToListing));

    output
}
