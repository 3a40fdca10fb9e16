//! Per-data-type cell rendering

use serde_json::Value;
use crate::metadata::{Aggregation, AttributeDefinition, DataType, Entity};
use crate::query::Row;
use super::format::{
    capitalize, format_number, identicon_colors, numeric_value, title_case, truncate_hash,
    value_text, DateFormatter, UtcDateFormatter, LONG_STRING_LIMIT,
};

/// Cross-reference to a single record, opened with a primary-key lookup
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub entity: Entity,
    pub key: String,
    pub value: Value,
}

/// A rendered table cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    /// Display text with the full value offered for copying
    Copyable { display: String, full: String },
    Hash {
        display: String,
        full: String,
        link: Option<Link>,
    },
    Address {
        display: String,
        full: String,
        colors: (String, String),
        link: Option<Link>,
    },
    Link { display: String, target: Link },
}

impl Cell {
    /// Text shown in the cell
    pub fn text(&self) -> &str {
        match self {
            Cell::Empty => "",
            Cell::Text(text) => text,
            Cell::Copyable { display, .. }
            | Cell::Hash { display, .. }
            | Cell::Address { display, .. }
            | Cell::Link { display, .. } => display,
        }
    }

    pub fn link(&self) -> Option<&Link> {
        match self {
            Cell::Hash { link, .. } | Cell::Address { link, .. } => link.as_ref(),
            Cell::Link { target, .. } => Some(target),
            _ => None,
        }
    }
}

/// How cells are rendered
#[derive(Clone, Copy)]
pub struct RenderOptions<'a> {
    /// Shorten hashes and drop trailing fraction zeros
    pub truncate: bool,
    /// Aggregation applied to the column, if any
    pub aggregation: Option<Aggregation>,
    pub dates: &'a dyn DateFormatter,
}

static UTC_DATES: UtcDateFormatter = UtcDateFormatter;

impl Default for RenderOptions<'static> {
    fn default() -> Self {
        Self {
            truncate: true,
            aggregation: None,
            dates: &UTC_DATES,
        }
    }
}

impl<'a> RenderOptions<'a> {
    pub fn with_dates(dates: &'a dyn DateFormatter) -> Self {
        Self {
            truncate: true,
            aggregation: None,
            dates,
        }
    }

    pub fn full(mut self) -> Self {
        self.truncate = false;
        self
    }

    pub fn aggregated(mut self, aggregation: Option<Aggregation>) -> Self {
        self.aggregation = aggregation;
        self
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        _ => false,
    }
}

/// Link target for a field: its declared reference, else the entity's own
/// primary key
pub fn reference_link(entity: &Entity, attribute: &AttributeDefinition, value: &Value) -> Option<Link> {
    if let Some(reference) = &attribute.reference {
        return Some(Link {
            entity: Entity::from(reference.entity.as_str()),
            key: reference.key.clone(),
            value: value.clone(),
        });
    }
    if entity.is_primary_key(&attribute.name) {
        return Some(Link {
            entity: entity.clone(),
            key: attribute.name.clone(),
            value: value.clone(),
        });
    }
    None
}

fn text_or_link(display: String, link: Option<Link>) -> Cell {
    match link {
        Some(target) => Cell::Link { display, target },
        None => Cell::Text(display),
    }
}

fn render_aggregated(value: &Value, attribute: &AttributeDefinition, aggregation: Aggregation, truncate: bool) -> Cell {
    let mut aggregated = attribute.clone();
    aggregated.data_type = match aggregation {
        Aggregation::Count => DataType::Int,
        _ if attribute.data_type == DataType::Currency => DataType::Currency,
        _ => DataType::Decimal,
    };
    match numeric_value(value) {
        Some(number) => Cell::Text(format_number(number, &aggregated, truncate)),
        None => Cell::Text(value_text(value)),
    }
}

/// Render one field of a result row
///
/// Rules apply in order: blank, value label, aggregation, then by data type.
pub fn render_cell(
    entity: &Entity,
    value: Option<&Value>,
    attribute: &AttributeDefinition,
    options: &RenderOptions<'_>,
) -> Cell {
    let value = match value {
        Some(v) if !is_blank(v) => v,
        _ => return Cell::Empty,
    };
    let raw = value_text(value);

    if let Some(label) = attribute.value_map.as_ref().and_then(|m| m.get(&raw)) {
        return Cell::Text(label.clone());
    }

    if let Some(aggregation) = options.aggregation {
        return render_aggregated(value, attribute, aggregation, options.truncate);
    }

    match attribute.data_type {
        DataType::Boolean => Cell::Text(capitalize(&raw)),
        DataType::DateTime => match &attribute.data_format {
            Some(pattern) => Cell::Text(options.dates.format(value, pattern)),
            None => Cell::Text(raw),
        },
        DataType::AccountAddress => Cell::Address {
            display: if options.truncate { truncate_hash(&raw) } else { raw.clone() },
            colors: identicon_colors(&raw),
            link: reference_link(entity, attribute, value),
            full: raw,
        },
        DataType::Hash => Cell::Hash {
            display: if options.truncate { truncate_hash(&raw) } else { raw.clone() },
            link: reference_link(entity, attribute, value),
            full: raw,
        },
        DataType::Int | DataType::Decimal | DataType::Currency => {
            let display = match numeric_value(value) {
                Some(number) => format_number(number, attribute, options.truncate),
                None => raw,
            };
            text_or_link(display, reference_link(entity, attribute, value))
        }
        DataType::String if raw.chars().count() > LONG_STRING_LIMIT => Cell::Copyable {
            display: raw.chars().take(LONG_STRING_LIMIT).collect(),
            full: raw,
        },
        DataType::String if attribute.is_display_enumerable() => Cell::Text(title_case(&raw)),
        DataType::String => text_or_link(raw, reference_link(entity, attribute, value)),
    }
}

/// Render a row's fields for the given columns
pub fn render_row(
    entity: &Entity,
    row: &Row,
    columns: &[AttributeDefinition],
    options: &RenderOptions<'_>,
) -> Vec<Cell> {
    columns
        .iter()
        .map(|attribute| render_cell(entity, row.get(&attribute.name), attribute, options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    struct FixedDates;

    impl DateFormatter for FixedDates {
        fn format(&self, _value: &Value, pattern: &str) -> String {
            format!("formatted:{}", pattern)
        }
    }

    fn render(entity: &Entity, value: Value, attribute: &AttributeDefinition) -> Cell {
        render_cell(entity, Some(&value), attribute, &RenderOptions::default())
    }

    #[test]
    fn test_blank_values() {
        let attr = AttributeDefinition::new("blocks", "baker", DataType::String);
        assert_eq!(render_cell(&Entity::Blocks, None, &attr, &RenderOptions::default()), Cell::Empty);
        assert_eq!(render(&Entity::Blocks, Value::Null, &attr), Cell::Empty);
        assert_eq!(render(&Entity::Blocks, json!(""), &attr), Cell::Empty);
    }

    #[test]
    fn test_value_map_wins() {
        let mut attr = AttributeDefinition::new("ballots", "vote", DataType::Int);
        attr.value_map = Some(HashMap::from([("1".to_string(), "Yay".to_string())]));
        assert_eq!(render(&Entity::Ballots, json!(1), &attr), Cell::Text("Yay".into()));
        assert_eq!(render(&Entity::Ballots, json!(2), &attr).text(), "2");
    }

    #[test]
    fn test_booleans_and_dates() {
        let flag = AttributeDefinition::new("accounts", "is_baker", DataType::Boolean);
        assert_eq!(render(&Entity::Accounts, json!(true), &flag).text(), "True");

        let mut ts = AttributeDefinition::new("blocks", "timestamp", DataType::DateTime);
        assert_eq!(render(&Entity::Blocks, json!(1556683200000i64), &ts).text(), "1556683200000");

        ts.data_format = Some("YYYY".into());
        let options = RenderOptions::with_dates(&FixedDates);
        let cell = render_cell(&Entity::Blocks, Some(&json!(1)), &ts, &options);
        assert_eq!(cell.text(), "formatted:YYYY");
    }

    #[test]
    fn test_hash_truncation_and_primary_key_link() {
        let attr = AttributeDefinition::new("blocks", "hash", DataType::Hash);
        let hash = "BLockHashValue1234567890";
        let cell = render(&Entity::Blocks, json!(hash), &attr);
        assert_eq!(cell.text(), "BLockH...567890");
        let link = cell.link().unwrap();
        assert_eq!(link.entity, Entity::Blocks);
        assert_eq!(link.key, "hash");
        assert_eq!(link.value, json!(hash));

        let full = render_cell(&Entity::Blocks, Some(&json!(hash)), &attr, &RenderOptions::default().full());
        assert_eq!(full.text(), hash);
    }

    #[test]
    fn test_address_reference_link() {
        let attr = AttributeDefinition::new("operations", "source", DataType::AccountAddress)
            .with_reference("accounts", "account_id");
        let cell = render(&Entity::Operations, json!("tz1abcdefghijklmnopqrstuvwxyz"), &attr);
        match &cell {
            Cell::Address { display, full, colors, link } => {
                assert_eq!(display, "tz1abc...uvwxyz");
                assert_eq!(full, "tz1abcdefghijklmnopqrstuvwxyz");
                assert_eq!(colors, &identicon_colors(full));
                assert_eq!(link.as_ref().unwrap().entity, Entity::Accounts);
                assert_eq!(link.as_ref().unwrap().key, "account_id");
            }
            other => panic!("expected address cell, got {:?}", other),
        }
    }

    #[test]
    fn test_numbers() {
        let fee = AttributeDefinition::new("operations", "fee", DataType::Currency).with_scale(6);
        assert_eq!(render(&Entity::Operations, json!(1_420_000), &fee).text(), "1.42");

        let level = AttributeDefinition::new("blocks", "level", DataType::Int);
        let cell = render(&Entity::Blocks, json!(1234567), &level);
        assert_eq!(cell.text(), "1,234,567");
        assert_eq!(cell.link().unwrap().key, "level");

        let numeric_text = render(&Entity::Operations, json!("2500"), &AttributeDefinition::new("operations", "gas", DataType::Int));
        assert_eq!(numeric_text, Cell::Text("2,500".into()));
    }

    #[test]
    fn test_aggregated_values() {
        let fee = AttributeDefinition::new("operations", "fee", DataType::Currency).with_scale(6);
        let count = RenderOptions::default().aggregated(Some(Aggregation::Count));
        assert_eq!(render_cell(&Entity::Operations, Some(&json!(12345)), &fee, &count).text(), "12,345");

        let sum = RenderOptions::default().aggregated(Some(Aggregation::Sum));
        assert_eq!(render_cell(&Entity::Operations, Some(&json!(3_000_000)), &fee, &sum).text(), "3");

        let level = AttributeDefinition::new("blocks", "level", DataType::Int);
        let avg = RenderOptions::default().aggregated(Some(Aggregation::Avg));
        assert_eq!(render_cell(&Entity::Blocks, Some(&json!(1500)), &level, &avg), Cell::Text("1,500".into()));
    }

    #[test]
    fn test_strings() {
        let kind = AttributeDefinition::new("operations", "kind", DataType::String).with_cardinality(12);
        assert_eq!(render(&Entity::Operations, json!("seed_nonce_revelation"), &kind).text(), "Seed Nonce Revelation");

        let script = AttributeDefinition::new("accounts", "script", DataType::String);
        let long = "x".repeat(150);
        match render(&Entity::Accounts, json!(long.clone()), &script) {
            Cell::Copyable { display, full } => {
                assert_eq!(display.len(), 100);
                assert_eq!(full, long);
            }
            other => panic!("expected copyable cell, got {:?}", other),
        }

        let plain = render(&Entity::Accounts, json!("hello_world"), &script);
        assert_eq!(plain, Cell::Text("hello_world".into()));
    }

    #[test]
    fn test_render_row() {
        let columns = vec![
            AttributeDefinition::new("blocks", "level", DataType::Int),
            AttributeDefinition::new("blocks", "baker", DataType::String),
        ];
        let row = json!({"level": 10}).as_object().cloned().unwrap();
        let cells = render_row(&Entity::Blocks, &row, &columns, &RenderOptions::default());
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].text(), "10");
        assert_eq!(cells[1], Cell::Empty);
    }
}
