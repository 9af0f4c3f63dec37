//! Prompt context rendering for retrieved products

use crate::db::Product;

/// Returned when retrieval found nothing
pub const NO_PRODUCTS_FOUND: &str = "هیچ محصولی یافت نشد.";

const CONTEXT_HEADER: &str = "محصولات موجود:\n\n";
const CURRENCY_SUFFIX: &str = "تومان";

/// Format a price as a comma-grouped integer, rounding half to even
pub fn format_price(price: f64) -> String {
    let rounded = price.round_ties_even();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Render products as a numbered list, cut to at most `max_chars` characters.
///
/// The cut is a hard character cut and may end mid-line.
pub fn format_context(products: &[Product], max_chars: usize) -> String {
    if products.is_empty() {
        return NO_PRODUCTS_FOUND.to_string();
    }

    let mut context = String::from(CONTEXT_HEADER);
    for (idx, product) in products.iter().enumerate() {
        context.push_str(&format!("{}. {}\n", idx + 1, product.name));
        context.push_str(&format!("   توضیحات: {}\n", product.description));
        context.push_str(&format!(
            "   قیمت: {} {}\n\n",
            format_price(product.price),
            CURRENCY_SUFFIX
        ));
    }

    truncate_chars(context, max_chars)
}

fn truncate_chars(text: String, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text,
    }
}
