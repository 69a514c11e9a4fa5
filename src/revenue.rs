//! Corrispettivi — monthly and annual revenue summaries derived from the
//! receipts table, plus the dashboard counters.

use chrono::{Datelike, Local};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use crate::db::{self, DatabaseError};

/// Italian month names, index 0 = Gennaio.
pub const MONTH_NAMES: [&str; 12] = [
    "Gennaio",
    "Febbraio",
    "Marzo",
    "Aprile",
    "Maggio",
    "Giugno",
    "Luglio",
    "Agosto",
    "Settembre",
    "Ottobre",
    "Novembre",
    "Dicembre",
];

/// Revenue of one calendar month. Months without receipts report zeros.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    pub year: i32,
    pub month: u32,
    pub total_cents: i64,
    pub receipt_count: i64,
}

impl MonthlyRevenue {
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }
}

/// The Riepilogo card: yearly totals plus the monthly average.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnualSummary {
    pub year: i32,
    pub total_cents: i64,
    pub receipt_count: i64,
    pub monthly_average_cents: i64,
}

/// Dashboard counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_receipts: i64,
    pub total_patients: i64,
    pub receipts_to_send: i64,
    pub current_month_revenue_cents: i64,
}

/// Per-month totals for a fiscal year, always 12 entries (January first).
pub fn monthly_revenue(conn: &Connection, year: i32) -> Result<Vec<MonthlyRevenue>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT CAST(strftime('%m', issue_date) AS INTEGER),
                SUM(amount_cents), COUNT(*)
         FROM receipts
         WHERE strftime('%Y', issue_date) = ?1
         GROUP BY 1",
    )?;

    let rows = stmt.query_map(params![year.to_string()], |row| {
        Ok((
            row.get::<_, u32>(0)?,
            row.get::<_, i64>(1)?,
            row.get::<_, i64>(2)?,
        ))
    })?;

    let mut months: Vec<MonthlyRevenue> = (1..=12)
        .map(|month| MonthlyRevenue {
            year,
            month,
            total_cents: 0,
            receipt_count: 0,
        })
        .collect();

    for row in rows {
        let (month, total_cents, receipt_count) = row?;
        if let Some(entry) = months.get_mut((month - 1) as usize) {
            entry.total_cents = total_cents;
            entry.receipt_count = receipt_count;
        }
    }
    Ok(months)
}

/// Yearly totals with the average over the 12 calendar months.
pub fn annual_summary(conn: &Connection, year: i32) -> Result<AnnualSummary, DatabaseError> {
    let (total_cents, receipt_count): (i64, i64) = conn.query_row(
        "SELECT COALESCE(SUM(amount_cents), 0), COUNT(*)
         FROM receipts
         WHERE strftime('%Y', issue_date) = ?1",
        params![year.to_string()],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    Ok(AnnualSummary {
        year,
        total_cents,
        receipt_count,
        monthly_average_cents: total_cents / 12,
    })
}

/// Counters for the dashboard tiles. "Current month" follows local time.
pub fn dashboard_stats(conn: &Connection) -> Result<DashboardStats, DatabaseError> {
    let today = Local::now().date_naive();

    let total_receipts: i64 =
        conn.query_row("SELECT COUNT(*) FROM receipts", [], |row| row.get(0))?;

    let receipts_to_send: i64 = conn.query_row(
        "SELECT COUNT(*) FROM receipts WHERE status = 'issued'",
        [],
        |row| row.get(0),
    )?;

    let current_month_revenue_cents: i64 = conn.query_row(
        "SELECT COALESCE(SUM(amount_cents), 0) FROM receipts
         WHERE strftime('%Y', issue_date) = ?1 AND strftime('%m', issue_date) = ?2",
        params![today.year().to_string(), format!("{:02}", today.month())],
        |row| row.get(0),
    )?;

    Ok(DashboardStats {
        total_receipts,
        total_patients: db::count_patients(conn)?,
        receipts_to_send,
        current_month_revenue_cents,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::models::enums::PaymentMethod;
    use crate::receipts::{self, ReceiptInput};
    use chrono::NaiveDate;

    fn issue(conn: &mut Connection, year: i32, month: u32, day: u32, cents: i64) {
        receipts::issue_receipt(
            conn,
            ReceiptInput {
                patient_id: None,
                patient_name: "Mario Rossi".into(),
                fiscal_code: "RSSMRA80A01ROMAX".into(),
                issue_date: NaiveDate::from_ymd_opt(year, month, day).unwrap(),
                amount_cents: cents,
                payment_method: PaymentMethod::Cash,
                notes: None,
            },
        )
        .unwrap();
    }

    #[test]
    fn monthly_revenue_always_reports_twelve_months() {
        let conn = open_memory_database().unwrap();
        let months = monthly_revenue(&conn, 2025).unwrap();
        assert_eq!(months.len(), 12);
        assert!(months.iter().all(|m| m.total_cents == 0));
        assert_eq!(months[0].month_name(), "Gennaio");
        assert_eq!(months[11].month_name(), "Dicembre");
    }

    #[test]
    fn monthly_revenue_groups_by_month() {
        let mut conn = open_memory_database().unwrap();
        issue(&mut conn, 2025, 5, 3, 7000);
        issue(&mut conn, 2025, 5, 17, 9000);
        issue(&mut conn, 2025, 8, 1, 5000);
        issue(&mut conn, 2024, 5, 1, 100_000); // other year, must not leak

        let months = monthly_revenue(&conn, 2025).unwrap();
        assert_eq!(months[4].total_cents, 16_000);
        assert_eq!(months[4].receipt_count, 2);
        assert_eq!(months[7].total_cents, 5000);
        assert_eq!(months[0].total_cents, 0);
    }

    #[test]
    fn annual_summary_totals_and_average() {
        let mut conn = open_memory_database().unwrap();
        issue(&mut conn, 2025, 1, 10, 60_000);
        issue(&mut conn, 2025, 6, 10, 60_000);

        let summary = annual_summary(&conn, 2025).unwrap();
        assert_eq!(summary.total_cents, 120_000);
        assert_eq!(summary.receipt_count, 2);
        assert_eq!(summary.monthly_average_cents, 10_000);
    }

    #[test]
    fn annual_summary_of_empty_year_is_zero() {
        let conn = open_memory_database().unwrap();
        let summary = annual_summary(&conn, 1999).unwrap();
        assert_eq!(summary.total_cents, 0);
        assert_eq!(summary.receipt_count, 0);
        assert_eq!(summary.monthly_average_cents, 0);
    }

    #[test]
    fn dashboard_counts_receipts_to_send() {
        let mut conn = open_memory_database().unwrap();
        let today = Local::now().date_naive();
        issue(
            &mut conn,
            today.year(),
            today.month(),
            1,
            4500,
        );

        let stats = dashboard_stats(&conn).unwrap();
        assert_eq!(stats.total_receipts, 1);
        assert_eq!(stats.receipts_to_send, 1);
        assert_eq!(stats.total_patients, 0);
        assert_eq!(stats.current_month_revenue_cents, 4500);

        receipts::send_all_issued(&conn).unwrap();
        let stats = dashboard_stats(&conn).unwrap();
        assert_eq!(stats.receipts_to_send, 0);
    }
}
