use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct InvoiceDraft {
    pub truck_plate: String,
    pub weight: f64,
    pub amount: Option<f64>,
    pub image: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Invoice {
    pub invoice_number: String,
    pub truck_plate: String,
    pub date: DateTime<Local>,
    pub weight: f64,
    pub amount: Option<f64>,
    pub image: Option<String>,
}

impl Invoice {
    pub fn new(invoice_number: String, draft: InvoiceDraft) -> Self {
        Self {
            invoice_number,
            truck_plate: draft.truck_plate,
            date: Local::now(),
            weight: draft.weight,
            amount: draft.amount,
            image: draft.image,
        }
    }
}
