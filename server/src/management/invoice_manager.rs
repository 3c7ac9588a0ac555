use crate::management::utils::invoice::{Invoice, InvoiceDraft};
use crate::utils::config::Config;
use crate::utils::logging::*;
use lazy_static::lazy_static;
use std::collections::HashMap;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

lazy_static! {
    static ref INVOICE_MANAGER: RwLock<InvoiceManager> = RwLock::new(InvoiceManager::new());
}

pub struct InvoiceManager {
    invoices: HashMap<String, Invoice>,
}

impl InvoiceManager {
    fn new() -> Self {
        Self {
            invoices: HashMap::new(),
        }
    }

    pub async fn instance() -> RwLockReadGuard<'static, InvoiceManager> {
        INVOICE_MANAGER.read().await
    }

    pub async fn instance_mut() -> RwLockWriteGuard<'static, InvoiceManager> {
        INVOICE_MANAGER.write().await
    }

    pub async fn create_invoice(draft: InvoiceDraft) -> Result<Invoice, LogEntry> {
        let config = Config::now().await;
        //The write lock spans allocation and insert, so concurrent requests cannot share a number.
        let mut manager = Self::instance_mut().await;
        let invoice_number = format!("{}-{:06}", config.invoice_prefix, manager.next_sequence_number());
        if manager.invoices.contains_key(&invoice_number) {
            return Err(error_entry!(InvoiceEntry::DuplicateNumberError(invoice_number)));
        }
        let invoice = Invoice::new(invoice_number.clone(), draft);
        manager.invoices.insert(invoice_number, invoice.clone());
        Ok(invoice)
    }

    fn next_sequence_number(&self) -> u64 {
        self.invoices.keys()
            .filter_map(|invoice_number| invoice_number.rsplit('-').next())
            .filter_map(|suffix| suffix.parse::<u64>().ok())
            .max()
            .map_or(1_u64, |greatest| greatest + 1)
    }

    pub async fn get_invoice(invoice_number: &str) -> Option<Invoice> {
        Self::instance().await.invoices.get(invoice_number).cloned()
    }

    pub async fn get_invoices() -> Vec<Invoice> {
        let mut invoices = Self::instance().await.invoices.values().cloned().collect::<Vec<Invoice>>();
        invoices.sort_by(|a, b| a.invoice_number.cmp(&b.invoice_number));
        invoices
    }
}
