// ==========================================
// IGM Loader - Row transform
// ==========================================
// Pure function of its input row set:
//   pass 1: drop every row whose uniqueness key collides
//   pass 2: coerce cells, then validate every field;
//           any failing field rejects the row
// Cell problems never escape as errors.
// ==========================================

use crate::domain::{
    CleanRow, RawRow, RowSet, RowViolation, Schema, TransformReport, ViolationKind,
};
use crate::importer::conflict_handler::ConflictHandler as ConflictHandlerImpl;
use crate::importer::data_cleaner::DataCleaner as DataCleanerImpl;
use crate::importer::dq_validator::DqValidator as DqValidatorImpl;
use crate::importer::importer_trait::{ConflictHandler, DataCleaner, DqValidator};
use std::collections::HashSet;
use tracing::{debug, info, warn};

pub struct RowTransform {
    schema: Schema,
    conflict_handler: Box<dyn ConflictHandler>,
    data_cleaner: Box<dyn DataCleaner>,
    dq_validator: Box<dyn DqValidator>,
}

impl Default for RowTransform {
    fn default() -> Self {
        Self::new(
            Box::new(ConflictHandlerImpl),
            Box::new(DataCleanerImpl),
            Box::new(DqValidatorImpl),
        )
    }
}

impl RowTransform {
    pub fn new(
        conflict_handler: Box<dyn ConflictHandler>,
        data_cleaner: Box<dyn DataCleaner>,
        dq_validator: Box<dyn DqValidator>,
    ) -> Self {
        Self {
            schema: Schema,
            conflict_handler,
            data_cleaner,
            dq_validator,
        }
    }

    /// Deduplication pass
    ///
    /// # Returns
    /// - rows whose key is unique in the batch, input order kept
    /// - one DuplicateKey violation per dropped row
    pub fn drop_ambiguous(&self, rows: RowSet<RawRow>) -> (RowSet<RawRow>, Vec<RowViolation>) {
        let duplicates = self.conflict_handler.detect_duplicates(&rows);
        if duplicates.is_empty() {
            return (rows, Vec::new());
        }

        let dropped: HashSet<usize> = duplicates.iter().map(|(pos, _)| *pos).collect();
        let violations = duplicates
            .into_iter()
            .map(|(pos, key)| RowViolation {
                row_number: rows[pos].row_number,
                field: self.schema.uniqueness_key().join(","),
                message: format!("uniqueness key {} appears more than once", key),
                value: key,
                kind: ViolationKind::DuplicateKey,
            })
            .collect();

        let kept = rows
            .into_iter()
            .enumerate()
            .filter(|(pos, _)| !dropped.contains(pos))
            .map(|(_, row)| row)
            .collect();

        (kept, violations)
    }

    /// Coercion + validation pass over already-deduplicated rows
    pub fn clean_and_validate(
        &self,
        rows: &[RawRow],
    ) -> (RowSet<CleanRow>, Vec<RowViolation>) {
        let fields = self.schema.fields();
        let mut accepted = Vec::with_capacity(rows.len());
        let mut violations = Vec::new();

        for raw in rows {
            let clean = self.data_cleaner.clean_row(raw, fields);
            let row_violations = self.dq_validator.validate_row(&clean, fields);

            if row_violations.is_empty() {
                accepted.push(clean);
                continue;
            }

            for v in &row_violations {
                warn!(
                    row_number = v.row_number,
                    field = %v.field,
                    value = %v.value,
                    error = %v.message,
                    "row rejected"
                );
            }
            violations.extend(row_violations);
        }

        (accepted, violations)
    }

    /// Full transform: dedup, then coerce + validate
    pub fn transform(&self, rows: RowSet<RawRow>) -> (RowSet<CleanRow>, TransformReport) {
        let input_rows = rows.len();

        let (unique, mut violations) = self.drop_ambiguous(rows);
        let duplicate_rows = input_rows - unique.len();
        debug!(input_rows, duplicate_rows, "dedup pass done");

        let (clean, validation_violations) = self.clean_and_validate(&unique);
        let rejected_rows = unique.len() - clean.len();
        violations.extend(validation_violations);

        let report = TransformReport {
            input_rows,
            duplicate_rows,
            rejected_rows,
            output_rows: clean.len(),
            violations,
        };

        info!(
            input = report.input_rows,
            duplicates = report.duplicate_rows,
            rejected = report.rejected_rows,
            output = report.output_rows,
            "row transform done"
        );

        (clean, report)
    }
}
