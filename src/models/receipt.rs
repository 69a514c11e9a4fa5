use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{PaymentMethod, ReceiptStatus};

/// An issued receipt. `number` is the practice-assigned progressive number
/// (e.g. `PAC-2025-124`); amounts are euro cents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    pub id: Uuid,
    pub number: String,
    pub patient_id: Option<Uuid>,
    pub patient_name: String,
    pub fiscal_code: String,
    pub issue_date: NaiveDate,
    pub amount_cents: i64,
    pub payment_method: PaymentMethod,
    pub status: ReceiptStatus,
    pub notes: Option<String>,
}
