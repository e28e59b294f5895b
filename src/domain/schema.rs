// ==========================================
// IGM Loader - Schema Registry
// ==========================================
// Fixed, ordered field list shared by the row source,
// the transform and the warehouse sink.
// Order defines output column order.
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// SemanticType - declared cell interpretation
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SemanticType {
    String,
    Integer,
    Date,
    Float,
    Boolean,
}

impl SemanticType {
    /// Column type used by the SQLite warehouse
    pub fn sql_type(&self) -> &'static str {
        match self {
            SemanticType::String => "TEXT",
            SemanticType::Integer => "INTEGER",
            SemanticType::Date => "TEXT",
            SemanticType::Float => "REAL",
            SemanticType::Boolean => "INTEGER",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticType::String => "STRING",
            SemanticType::Integer => "INTEGER",
            SemanticType::Date => "DATE",
            SemanticType::Float => "FLOAT",
            SemanticType::Boolean => "BOOLEAN",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==========================================
// FieldDescriptor
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub name: &'static str,           // column name (header text)
    pub semantic_type: SemanticType,  // declared type
    pub nullable: bool,               // NULLABLE / REQUIRED
}

impl FieldDescriptor {
    const fn nullable(name: &'static str, semantic_type: SemanticType) -> Self {
        Self {
            name,
            semantic_type,
            nullable: true,
        }
    }
}

/// Date pattern shared by coercion and validation
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Key columns used to detect ambiguous source records
pub const UNIQUENESS_KEY: [&str; 4] = ["talent", "date", "campaign", "product"];

static FIELDS: [FieldDescriptor; 16] = [
    FieldDescriptor::nullable("talent", SemanticType::String),
    FieldDescriptor::nullable("type", SemanticType::Integer),
    FieldDescriptor::nullable("date", SemanticType::Date),
    FieldDescriptor::nullable("product", SemanticType::String),
    FieldDescriptor::nullable("content_type", SemanticType::String),
    FieldDescriptor::nullable("fee", SemanticType::Float),
    FieldDescriptor::nullable("order_nr", SemanticType::Integer),
    FieldDescriptor::nullable("received", SemanticType::Boolean),
    FieldDescriptor::nullable("brief", SemanticType::Boolean),
    FieldDescriptor::nullable("discount_code", SemanticType::String),
    FieldDescriptor::nullable("link", SemanticType::String),
    FieldDescriptor::nullable("campaign", SemanticType::String),
    FieldDescriptor::nullable("term", SemanticType::String),
    FieldDescriptor::nullable("content", SemanticType::String),
    FieldDescriptor::nullable("utm", SemanticType::String),
    FieldDescriptor::nullable("string_concats", SemanticType::String),
];

// ==========================================
// Schema - registry handle
// ==========================================
// Zero-sized; every instance reads the same static table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Schema;

impl Schema {
    pub fn fields(&self) -> &'static [FieldDescriptor] {
        &FIELDS
    }

    /// Field names in column order
    pub fn field_names(&self) -> Vec<&'static str> {
        FIELDS.iter().map(|f| f.name).collect()
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        FIELDS.iter().find(|f| f.name == name)
    }

    /// Declared type of a field
    ///
    /// # Returns
    /// - None: the name is not part of the schema
    pub fn field_type(&self, name: &str) -> Option<SemanticType> {
        self.field(name).map(|f| f.semantic_type)
    }

    pub fn uniqueness_key(&self) -> [&'static str; 4] {
        UNIQUENESS_KEY
    }

    pub fn len(&self) -> usize {
        FIELDS.len()
    }

    pub fn is_empty(&self) -> bool {
        FIELDS.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_schema_has_sixteen_unique_fields() {
        let schema = Schema;
        let names = schema.field_names();
        assert_eq!(names.len(), 16);

        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), 16);
    }

    #[test]
    fn test_field_order() {
        let names = Schema.field_names();
        assert_eq!(names[0], "talent");
        assert_eq!(names[2], "date");
        assert_eq!(names[15], "string_concats");
    }

    #[test]
    fn test_field_type_lookup() {
        let schema = Schema;
        assert_eq!(schema.field_type("fee"), Some(SemanticType::Float));
        assert_eq!(schema.field_type("order_nr"), Some(SemanticType::Integer));
        assert_eq!(schema.field_type("brief"), Some(SemanticType::Boolean));
        assert_eq!(schema.field_type("date"), Some(SemanticType::Date));
        assert_eq!(schema.field_type("utm"), Some(SemanticType::String));
        assert_eq!(schema.field_type("unknown"), None);
    }

    #[test]
    fn test_uniqueness_key_fields_exist() {
        let schema = Schema;
        for name in schema.uniqueness_key() {
            assert!(schema.field(name).is_some(), "{} missing", name);
        }
    }
}
