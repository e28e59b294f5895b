// ==========================================
// IGM Loader - Data quality validator
// ==========================================
// Strict per-cell check, one case per semantic type.
// Runs after coercion and re-checks every field on its own:
// a single failing cell rejects the whole row.
// ==========================================

use crate::domain::{
    CellValue, CleanRow, FieldDescriptor, RowViolation, SemanticType, ViolationKind,
};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::CellError;
use crate::importer::importer_trait::DqValidator as DqValidatorTrait;

pub struct DqValidator;

impl DqValidator {
    fn conversion_error(value: &str, expected: SemanticType) -> CellError {
        CellError::ValueConversion {
            value: value.to_string(),
            expected: expected.to_string(),
        }
    }

    /// Interpret a text cell strictly as the declared type
    fn check_text(semantic_type: SemanticType, text: &str) -> Result<(), CellError> {
        let ok = match semantic_type {
            SemanticType::String => true,
            SemanticType::Integer => DataCleaner::parse_integer(text).is_some(),
            SemanticType::Float => DataCleaner::parse_float(text).is_some(),
            SemanticType::Date => DataCleaner::parse_date(text).is_some(),
            SemanticType::Boolean => DataCleaner::parse_bool(text).is_some(),
        };

        if ok {
            Ok(())
        } else {
            Err(Self::conversion_error(text, semantic_type))
        }
    }

    fn violation_kind(err: &CellError) -> ViolationKind {
        match err {
            CellError::ValueConversion { .. } => ViolationKind::ValueConversion,
            CellError::TypeMismatch { .. } => ViolationKind::TypeMismatch,
            CellError::SchemaInvalidData(_) => ViolationKind::SchemaInvalidData,
        }
    }
}

impl DqValidatorTrait for DqValidator {
    fn validate_cell(
        &self,
        field: &FieldDescriptor,
        value: Option<&CellValue>,
    ) -> Result<(), CellError> {
        let value = value.ok_or_else(|| CellError::SchemaInvalidData(field.name.to_string()))?;

        // Empty and null cells are accepted regardless of type
        if value.is_empty() {
            return Ok(());
        }

        match (field.semantic_type, value) {
            (_, CellValue::Text(text)) => Self::check_text(field.semantic_type, text),
            (SemanticType::String, _) => Ok(()),
            (SemanticType::Integer, CellValue::Integer(_)) => Ok(()),
            (SemanticType::Float, CellValue::Float(_) | CellValue::Integer(_)) => Ok(()),
            (SemanticType::Boolean, CellValue::Boolean(_)) => Ok(()),
            (SemanticType::Date, CellValue::Date(_)) => Ok(()),
            (expected, found) => Err(CellError::TypeMismatch {
                expected: expected.to_string(),
                found: found.kind().to_string(),
            }),
        }
    }

    fn validate_row(&self, row: &CleanRow, fields: &[FieldDescriptor]) -> Vec<RowViolation> {
        fields
            .iter()
            .filter_map(|field| {
                let value = row.get(field.name);
                self.validate_cell(field, value).err().map(|err| RowViolation {
                    row_number: row.row_number,
                    field: field.name.to_string(),
                    value: value.map(ToString::to_string).unwrap_or_default(),
                    kind: Self::violation_kind(&err),
                    message: err.to_string(),
                })
            })
            .collect()
    }
}
