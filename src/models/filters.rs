use super::enums::ReceiptStatus;

#[derive(Debug, Default)]
pub struct PatientFilter {
    /// Case-insensitive substring over first name, last name, fiscal code.
    pub query: Option<String>,
}

#[derive(Debug, Default)]
pub struct ReceiptFilter {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub status: Option<ReceiptStatus>,
    /// Case-insensitive substring over number, patient name, fiscal code.
    pub query: Option<String>,
}
