//! Parsing of `--filter` and `--sort` arguments

use anyhow::{anyhow, bail, Context, Result};
use arronax::metadata::{find_attribute, AttributeDefinition};
use arronax::{Filter, FilterOperator, SortDirection, SortKey};
use serde_json::Value;

/// `name:op:v1,v2` → Filter, typed from the attribute metadata
pub fn parse_filter(arg: &str, attributes: &[AttributeDefinition]) -> Result<Filter> {
    let mut parts = arg.splitn(3, ':');
    let name = parts.next().unwrap_or_default();
    let op = parts
        .next()
        .ok_or_else(|| anyhow!("filter '{}' should look like name:op[:v1,v2]", arg))?;
    let operator: FilterOperator = op.parse().with_context(|| format!("in filter '{}'", arg))?;

    let attribute = find_attribute(attributes, name)
        .ok_or_else(|| anyhow!("unknown attribute '{}' in filter '{}'", name, arg))?;

    let values: Vec<Value> = match parts.next() {
        Some(raw) if !raw.is_empty() => raw.split(',').map(parse_value).collect(),
        _ => Vec::new(),
    };
    if values.is_empty() && !operator.is_null_check() {
        bail!("filter '{}' needs at least one value", arg);
    }

    Ok(Filter {
        name: name.to_string(),
        operator,
        values,
        operator_type: attribute.operator_type(),
        is_low_cardinality: attribute.is_low_cardinality(),
    })
}

/// Numbers and booleans keep their JSON type; everything else is a string
fn parse_value(raw: &str) -> Value {
    serde_json::from_str::<Value>(raw)
        .ok()
        .filter(|v| v.is_number() || v.is_boolean())
        .unwrap_or_else(|| Value::String(raw.to_string()))
}

/// `field[:asc|desc]` → SortKey (descending when no direction is given)
pub fn parse_sort(arg: &str) -> Result<SortKey> {
    match arg.split_once(':') {
        Some((field, dir)) => {
            let direction: SortDirection = dir.parse().map_err(|e: String| anyhow!(e))?;
            Ok(SortKey::new(field, direction))
        }
        None => Ok(SortKey::desc(arg)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arronax::metadata::DataType;
    use arronax::OperatorType;
    use serde_json::json;

    fn attributes() -> Vec<AttributeDefinition> {
        vec![
            AttributeDefinition::new("operations", "kind", DataType::String).with_cardinality(12),
            AttributeDefinition::new("operations", "fee", DataType::Currency),
        ]
    }

    #[test]
    fn test_parse_filter() {
        let filter = parse_filter("kind:in:transaction,origination", &attributes()).unwrap();
        assert_eq!(filter.operator, FilterOperator::In);
        assert_eq!(filter.values, vec![json!("transaction"), json!("origination")]);
        assert!(filter.is_low_cardinality);

        let filter = parse_filter("fee:gt:1000", &attributes()).unwrap();
        assert_eq!(filter.values, vec![json!(1000)]);
        assert_eq!(filter.operator_type, OperatorType::Numeric);

        let filter = parse_filter("fee:isnotnull", &attributes()).unwrap();
        assert!(filter.values.is_empty());
    }

    #[test]
    fn test_parse_filter_errors() {
        assert!(parse_filter("kind", &attributes()).is_err());
        assert!(parse_filter("kind:within:1", &attributes()).is_err());
        assert!(parse_filter("baker:eq:tz1", &attributes()).is_err());
        assert!(parse_filter("kind:eq", &attributes()).is_err());
    }

    #[test]
    fn test_parse_sort() {
        let key = parse_sort("timestamp:asc").unwrap();
        assert_eq!((key.order_by.as_str(), key.order), ("timestamp", SortDirection::Asc));
        assert_eq!(parse_sort("level").unwrap().order, SortDirection::Desc);
        assert!(parse_sort("level:sideways").is_err());
    }
}
