use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::ValidationError;

/// Closed set of donation categories.
///
/// The machine name (`as_str`) is the stable aggregation and persistence
/// key; the label is display text only and carries no identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Money,
    Food,
    Clothing,
    Medicine,
    Blankets,
    Toys,
    Books,
    Furniture,
    HygieneProducts,
    Other,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Money,
        Category::Food,
        Category::Clothing,
        Category::Medicine,
        Category::Blankets,
        Category::Toys,
        Category::Books,
        Category::Furniture,
        Category::HygieneProducts,
        Category::Other,
    ];

    /// Stable machine name used as the aggregation key and storage value
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Money => "MONEY",
            Category::Food => "FOOD",
            Category::Clothing => "CLOTHING",
            Category::Medicine => "MEDICINE",
            Category::Blankets => "BLANKETS",
            Category::Toys => "TOYS",
            Category::Books => "BOOKS",
            Category::Furniture => "FURNITURE",
            Category::HygieneProducts => "HYGIENE_PRODUCTS",
            Category::Other => "OTHER",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Category::Money => "Money",
            Category::Food => "Food",
            Category::Clothing => "Clothing",
            Category::Medicine => "Medicine",
            Category::Blankets => "Blankets",
            Category::Toys => "Toys",
            Category::Books => "Books",
            Category::Furniture => "Furniture",
            Category::HygieneProducts => "Hygiene Products",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    /// Accepts the machine name or the label, case-insensitively
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let input = s.trim();
        Category::ALL
            .iter()
            .find(|c| {
                c.as_str().eq_ignore_ascii_case(input) || c.label().eq_ignore_ascii_case(input)
            })
            .copied()
            .ok_or_else(|| ValidationError::InvalidInput(format!("Unknown category: {}", s)))
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_machine_name_case_insensitively() {
        assert_eq!("MONEY".parse::<Category>().unwrap(), Category::Money);
        assert_eq!("food".parse::<Category>().unwrap(), Category::Food);
        assert_eq!(
            "hygiene_products".parse::<Category>().unwrap(),
            Category::HygieneProducts
        );
    }

    #[test]
    fn parses_label_case_insensitively() {
        assert_eq!(
            "Hygiene Products".parse::<Category>().unwrap(),
            Category::HygieneProducts
        );
        assert_eq!("blankets".parse::<Category>().unwrap(), Category::Blankets);
    }

    #[test]
    fn rejects_unknown_category() {
        assert!("GOLD".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn machine_name_and_label_are_distinct_concerns() {
        assert_eq!(Category::HygieneProducts.as_str(), "HYGIENE_PRODUCTS");
        assert_eq!(Category::HygieneProducts.label(), "Hygiene Products");
    }

    #[test]
    fn serde_uses_machine_name() {
        let json = serde_json::to_string(&Category::Toys).unwrap();
        assert_eq!(json, "\"TOYS\"");
        let back: Category = serde_json::from_str("\"Toys\"").unwrap();
        assert_eq!(back, Category::Toys);
    }
}
