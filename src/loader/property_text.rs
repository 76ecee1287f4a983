//! Property definition text.
//!
//! ```text
//! Harbor View
//! 1200, 1800, 250
//! 600, 150
//! 900, 350
//! ```
//!
//! The first line is the display name. After it come the bank price, the
//! forced price and the access point price, then one expansion cost and toll
//! pair per construction tier. Line breaks after the name carry no meaning.

use super::{parse_error, tokens};
use crate::core::ConfigError;
use crate::economy::{PropertyDef, PropertyId};

/// Parse one property file.
pub fn parse_property(id: PropertyId, text: &str) -> Result<PropertyDef, ConfigError> {
    let mut lines = text.lines().enumerate();
    let name = lines
        .next()
        .map(|(_, line)| line.trim())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| parse_error(1, "missing property name"))?;

    let mut values = Vec::new();
    let mut last_line = 1;
    for (index, line) in lines {
        for token in tokens(line) {
            let value: i64 = token.parse().map_err(|_| {
                parse_error(index + 1, format!("expected an amount, found `{token}`"))
            })?;
            if value < 0 {
                return Err(parse_error(index + 1, format!("negative amount {value}")));
            }
            values.push((index + 1, value));
        }
        last_line = index + 1;
    }

    if values.len() < 3 {
        return Err(parse_error(last_line, "expected bank, forced and access prices"));
    }
    let (prices, tiers) = values.split_at(3);

    let mut def = PropertyDef::new(id, name, prices[0].1, prices[1].1, prices[2].1);
    for pair in tiers.chunks(2) {
        let [(_, expansion), (_, toll)] = pair else {
            return Err(parse_error(pair[0].0, "expansion cost without a toll"));
        };
        def = def.with_tier(*expansion, *toll);
    }
    Ok(def)
}
