//! Data type definitions for entity attributes

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Data types reported by the metadata API for an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Free-form text
    String,
    /// Integer
    Int,
    /// Decimal number, optionally scaled by the attribute's `scale`
    Decimal,
    /// Currency amount in the smallest unit, scaled by the attribute's `scale`
    Currency,
    /// Boolean
    Boolean,
    /// Timestamp in epoch milliseconds
    DateTime,
    /// Block, operation or protocol hash
    Hash,
    /// Account or contract address
    AccountAddress,
}

impl Default for DataType {
    fn default() -> Self {
        DataType::String
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::String => write!(f, "String"),
            DataType::Int => write!(f, "Int"),
            DataType::Decimal => write!(f, "Decimal"),
            DataType::Currency => write!(f, "Currency"),
            DataType::Boolean => write!(f, "Boolean"),
            DataType::DateTime => write!(f, "DateTime"),
            DataType::Hash => write!(f, "Hash"),
            DataType::AccountAddress => write!(f, "AccountAddress"),
        }
    }
}

/// Error when parsing a data type string
#[derive(Debug, Clone)]
pub struct ParseDataTypeError {
    pub input: String,
}

impl fmt::Display for ParseDataTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid data type '{}': unknown type", self.input)
    }
}

impl std::error::Error for ParseDataTypeError {}

impl FromStr for DataType {
    type Err = ParseDataTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "string" | "text" => Ok(DataType::String),
            "int" | "integer" => Ok(DataType::Int),
            "decimal" => Ok(DataType::Decimal),
            "currency" => Ok(DataType::Currency),
            "boolean" | "bool" => Ok(DataType::Boolean),
            "datetime" | "date_time" | "timestamp" => Ok(DataType::DateTime),
            "hash" => Ok(DataType::Hash),
            "accountaddress" | "account_address" => Ok(DataType::AccountAddress),
            _ => Err(ParseDataTypeError {
                input: s.to_string(),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for DataType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DataType::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for DataType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl DataType {
    /// Check if this is a numeric type (rendered with number formatting)
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Int | DataType::Decimal | DataType::Currency)
    }

    /// Check if values of this type are opaque identifiers (hashes, addresses)
    pub fn is_identifier(&self) -> bool {
        matches!(self, DataType::Hash | DataType::AccountAddress)
    }

    /// The filter widget family used for attributes of this type
    pub fn operator_type(&self) -> OperatorType {
        match self {
            DataType::Int | DataType::Decimal | DataType::Currency => OperatorType::Numeric,
            DataType::DateTime => OperatorType::DateTime,
            DataType::Boolean => OperatorType::Boolean,
            DataType::String | DataType::Hash | DataType::AccountAddress => OperatorType::String,
        }
    }
}

// ============================================================================
// OperatorType
// ============================================================================

/// Which operator set a filter input offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatorType {
    Numeric,
    #[serde(rename = "dateTime")]
    DateTime,
    Boolean,
    String,
}

impl Default for OperatorType {
    fn default() -> Self {
        OperatorType::String
    }
}

// ============================================================================
// Aggregation
// ============================================================================

/// Aggregation functions the data API can apply to a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aggregation {
    Sum,
    Avg,
    Count,
    Min,
    Max,
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Aggregation::Sum => write!(f, "sum"),
            Aggregation::Avg => write!(f, "avg"),
            Aggregation::Count => write!(f, "count"),
            Aggregation::Min => write!(f, "min"),
            Aggregation::Max => write!(f, "max"),
        }
    }
}

/// Error when parsing an aggregation string
#[derive(Debug, Clone)]
pub struct ParseAggregationError {
    pub input: String,
}

impl fmt::Display for ParseAggregationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown aggregation '{}'. Valid options: sum, avg, count, min, max", self.input)
    }
}

impl std::error::Error for ParseAggregationError {}

impl FromStr for Aggregation {
    type Err = ParseAggregationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sum" => Ok(Aggregation::Sum),
            "avg" | "average" => Ok(Aggregation::Avg),
            "count" => Ok(Aggregation::Count),
            "min" | "minimum" => Ok(Aggregation::Min),
            "max" | "maximum" => Ok(Aggregation::Max),
            _ => Err(ParseAggregationError {
                input: s.to_string(),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for Aggregation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Aggregation::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for Aggregation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_api_names() {
        assert_eq!("String".parse::<DataType>().unwrap(), DataType::String);
        assert_eq!("Int".parse::<DataType>().unwrap(), DataType::Int);
        assert_eq!("DateTime".parse::<DataType>().unwrap(), DataType::DateTime);
        assert_eq!("AccountAddress".parse::<DataType>().unwrap(), DataType::AccountAddress);
        assert_eq!("Currency".parse::<DataType>().unwrap(), DataType::Currency);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("account_address".parse::<DataType>().unwrap(), DataType::AccountAddress);
        assert_eq!("bool".parse::<DataType>().unwrap(), DataType::Boolean);
        assert_eq!("timestamp".parse::<DataType>().unwrap(), DataType::DateTime);
        assert_eq!("integer".parse::<DataType>().unwrap(), DataType::Int);
    }

    #[test]
    fn test_parse_unknown() {
        assert!("Blob".parse::<DataType>().is_err());
    }

    #[test]
    fn test_serializes_as_api_name() {
        let json = serde_json::to_string(&DataType::AccountAddress).unwrap();
        assert_eq!(json, "\"AccountAddress\"");
        let parsed: DataType = serde_json::from_str("\"Hash\"").unwrap();
        assert_eq!(parsed, DataType::Hash);
    }

    #[test]
    fn test_operator_type() {
        assert_eq!(DataType::Currency.operator_type(), OperatorType::Numeric);
        assert_eq!(DataType::Int.operator_type(), OperatorType::Numeric);
        assert_eq!(DataType::DateTime.operator_type(), OperatorType::DateTime);
        assert_eq!(DataType::Boolean.operator_type(), OperatorType::Boolean);
        assert_eq!(DataType::Hash.operator_type(), OperatorType::String);
    }

    #[test]
    fn test_type_predicates() {
        assert!(DataType::Decimal.is_numeric());
        assert!(!DataType::DateTime.is_numeric());
        assert!(DataType::AccountAddress.is_identifier());
        assert!(!DataType::String.is_identifier());
    }

    #[test]
    fn test_parse_aggregation() {
        assert_eq!("COUNT".parse::<Aggregation>().unwrap(), Aggregation::Count);
        assert_eq!("average".parse::<Aggregation>().unwrap(), Aggregation::Avg);
        assert!("median".parse::<Aggregation>().is_err());
        assert_eq!(Aggregation::Max.to_string(), "max");
    }
}
