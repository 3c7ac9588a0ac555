use crate::management::invoice_manager::InvoiceManager;
use crate::management::utils::invoice::InvoiceDraft;
use crate::utils::logging::*;
use actix_web::{get, post, web, HttpResponse, Responder, Scope};

pub fn initialize() -> Scope {
    web::scope("/invoice")
        .service(create_invoice)
        .service(get_invoices)
        .service(get_invoice)
}

#[post("/create")]
async fn create_invoice(draft: web::Json<InvoiceDraft>) -> impl Responder {
    let draft = draft.into_inner();
    if draft.weight < 0.0 {
        return HttpResponse::BadRequest().body("Weight cannot be negative.");
    }
    match InvoiceManager::create_invoice(draft).await {
        Ok(invoice) => HttpResponse::Ok().json(web::Json(invoice)),
        Err(entry) => {
            logging_entry!(entry);
            HttpResponse::Conflict().body("Invoice number already allocated, retry the request.")
        },
    }
}

#[get("/all")]
async fn get_invoices() -> impl Responder {
    web::Json(InvoiceManager::get_invoices().await)
}

#[get("/{invoice_number}")]
async fn get_invoice(invoice_number: web::Path<String>) -> impl Responder {
    match InvoiceManager::get_invoice(&invoice_number.into_inner()).await {
        Some(invoice) => HttpResponse::Ok().json(web::Json(invoice)),
        None => HttpResponse::NotFound().body("Invoice does not exist."),
    }
}
