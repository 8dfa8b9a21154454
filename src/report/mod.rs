//! Console rendering of a [`ProfitResult`].

use crate::models::ProfitResult;
use crate::utils::fmt_price;
use serde_json::Result as JsonResult;

/// One `Label: value` line per present field. Absent fields are omitted.
pub fn render_text(result: &ProfitResult) -> String {
    let mut lines = Vec::with_capacity(5);

    if let Some(date) = result.buy_date {
        lines.push(format!("Buy Date: {}", date));
    }
    if let Some(price) = result.buy_price {
        lines.push(format!("Buy Price: {}", fmt_price(price)));
    }
    if let Some(date) = result.sell_date {
        lines.push(format!("Sell Date: {}", date));
    }
    if let Some(price) = result.sell_price {
        lines.push(format!("Sell Price: {}", fmt_price(price)));
    }
    lines.push(format!("Profit: {}", fmt_price(result.profit)));

    lines.join("\n")
}

pub fn render_json(result: &ProfitResult) -> JsonResult<String> {
    serde_json::to_string_pretty(result)
}
