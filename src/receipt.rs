//! Receipt
//!
//! Terminal rendering of a cart: one table row per line item followed by the subtotal,
//! discount and total.

use std::{fmt::Write, io};

use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};

use crate::{
    cart::{Cart, LineItem},
    pricing::money,
};

/// Printable view of a cart.
#[derive(Debug, Clone, Copy)]
pub struct CartReceipt<'a> {
    cart: &'a Cart,
}

impl<'a> CartReceipt<'a> {
    /// Create a receipt for `cart`.
    pub fn new(cart: &'a Cart) -> Self {
        Self { cart }
    }

    /// Writes the receipt to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_to(&self, mut out: impl io::Write) -> io::Result<()> {
        if self.cart.is_empty() {
            return writeln!(out, "\n Your cart is empty\n");
        }

        let mut builder = Builder::default();

        push_receipt_header(&mut builder);

        for item in self.cart.iter() {
            push_item_row(&mut builder, item, self.cart);
        }

        write_receipt_table(&mut out, builder)?;

        write_receipt_summary(&mut out, self.cart)
    }
}

fn push_receipt_header(builder: &mut Builder) {
    builder.push_record(["Item", "Size", "Colour", "Qty", "Unit price", "Line total"]);
}

fn push_item_row(builder: &mut Builder, item: &LineItem, cart: &Cart) {
    let currency = cart.currency();

    builder.push_record([
        item.name.clone(),
        item.key.size.clone().unwrap_or_default(),
        item.key.color.clone().unwrap_or_default(),
        item.quantity.to_string(),
        money(item.unit_price, currency).to_string(),
        money(item.line_total(), currency).to_string(),
    ]);
}

fn write_receipt_table(out: &mut impl io::Write, builder: Builder) -> io::Result<()> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(
        1,
        HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
    );

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..6), Alignment::right());

    let table_str = colorize_borders(&table.to_string());

    writeln!(out, "\n{table_str}")
}

fn write_receipt_summary(out: &mut impl io::Write, cart: &Cart) -> io::Result<()> {
    let currency = cart.currency();
    let discount = cart.discount();

    let subtotal_label = " Subtotal:".to_string();
    let total_label = " \x1b[1mTotal:\x1b[0m".to_string();
    let discount_label = match discount.promo_code() {
        Some(code) => format!(" Discount ({code}):"),
        None => " Discount:".to_string(),
    };

    let subtotal_val = format!("{}  ", cart.subtotal_money());
    let total_val = format!("{}  ", cart.final_total_money());
    let discount_val = format!("-{}  ", money(discount.amount(), currency));

    let mut lines = vec![(subtotal_label, subtotal_val)];

    if discount.is_applied() {
        lines.push((discount_label, discount_val));
    }

    lines.push((total_label, format!("\x1b[1m{total_val}\x1b[0m")));

    let label_width = lines
        .iter()
        .map(|(label, _)| visible_width(label))
        .max()
        .unwrap_or_default();

    let value_width = lines
        .iter()
        .map(|(_, value)| visible_width(value))
        .max()
        .unwrap_or_default();

    for (label, value) in &lines {
        write_summary_line(out, label, value, label_width, value_width)?;
    }

    writeln!(out)
}

/// Wraps runs of box-drawing characters (U+2500..U+257F) in ANSI dark grey, leaving cell
/// content untouched.
fn colorize_borders(table: &str) -> String {
    let mut out = String::with_capacity(table.len() + 256);
    let mut in_run = false;

    for ch in table.chars() {
        let box_char = ('\u{2500}'..='\u{257F}').contains(&ch);

        if box_char && !in_run {
            _ = out.write_str("\x1b[90m");
            in_run = true;
        } else if !box_char && in_run {
            _ = out.write_str("\x1b[0m");
            in_run = false;
        }

        out.push(ch);
    }

    if in_run {
        _ = out.write_str("\x1b[0m");
    }

    out
}

/// Returns the visible (non-ANSI) width of a string.
fn visible_width(s: &str) -> usize {
    let mut width = 0usize;
    let mut in_escape = false;

    for ch in s.chars() {
        if in_escape {
            if ch.is_ascii_alphabetic() {
                in_escape = false;
            }
        } else if ch == '\x1b' {
            in_escape = true;
        } else {
            width += 1;
        }
    }

    width
}

/// Writes a summary line with a right-aligned label and a fixed-width value column.
fn write_summary_line(
    out: &mut impl io::Write,
    label: &str,
    value: &str,
    label_col_width: usize,
    value_col_width: usize,
) -> io::Result<()> {
    let label_pad = label_col_width.saturating_sub(visible_width(label));
    let value_pad = value_col_width.saturating_sub(visible_width(value));

    writeln!(
        out,
        "{:>label_pad$}{label}  {value_pad}{value}",
        "",
        value_pad = " ".repeat(value_pad)
    )
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::INR;
    use testresult::TestResult;

    use crate::cart::NewLineItem;

    use super::*;

    fn render(cart: &Cart) -> TestResult<String> {
        let mut out = Vec::new();

        CartReceipt::new(cart).write_to(&mut out)?;

        Ok(String::from_utf8(out)?)
    }

    fn kurta_cart() -> Cart {
        let mut cart = Cart::new(INR);

        cart.add_item(
            NewLineItem::new("kurta", "Silk Kurta", 249_900)
                .with_size("M")
                .with_color("Maroon"),
            2,
        );
        cart.add_item(NewLineItem::new("tie", "Silk Tie", 99_900), 1);

        cart
    }

    #[test]
    fn receipt_lists_every_line() -> TestResult {
        let cart = kurta_cart();
        let receipt = render(&cart)?;

        assert!(receipt.contains("Silk Kurta"));
        assert!(receipt.contains("Maroon"));
        assert!(receipt.contains("Silk Tie"));
        assert!(receipt.contains(&money(499_800, INR).to_string()));
        assert!(receipt.contains(&cart.subtotal_money().to_string()));
        assert!(!receipt.contains("Discount"));

        Ok(())
    }

    #[test]
    fn receipt_shows_discount_and_code() -> TestResult {
        let mut cart = kurta_cart();
        cart.apply_discount(50_000, Some("SAVE500".to_string()));

        let receipt = render(&cart)?;

        assert!(receipt.contains("Discount (SAVE500):"));
        assert!(receipt.contains(&format!("-{}", money(50_000, INR))));
        assert!(receipt.contains(&cart.final_total_money().to_string()));

        Ok(())
    }

    #[test]
    fn empty_cart_receipt_says_so() -> TestResult {
        let receipt = render(&Cart::new(INR))?;

        assert!(receipt.contains("Your cart is empty"));

        Ok(())
    }

    #[test]
    fn visible_width_ignores_ansi_sequences() {
        assert_eq!(visible_width("\x1b[1mTotal:\x1b[0m"), 6);
        assert_eq!(visible_width("Subtotal:"), 9);
    }
}
