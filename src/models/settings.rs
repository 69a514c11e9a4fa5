use serde::{Deserialize, Serialize};

/// Practice settings, stored as a single row seeded by the migrations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticeSettings {
    pub practitioner_name: String,
    pub profession: String,
    pub vat_number: String,
    pub fiscal_code: String,
    pub office_address: String,
    /// Prefix for receipt numbers, e.g. "PAC" in "PAC-2025-124".
    pub receipt_prefix: String,
    /// Next progressive number to assign when issuing a receipt.
    pub next_receipt_number: i64,
}
