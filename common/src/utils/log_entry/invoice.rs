use thiserror::Error;

#[derive(Error, Debug)]
pub enum InvoiceEntry {
    #[error("Invoice number {0} is already allocated")]
    DuplicateNumberError(String),
}

impl From<InvoiceEntry> for String {
    #[inline(always)]
    fn from(value: InvoiceEntry) -> Self {
        value.to_string()
    }
}
