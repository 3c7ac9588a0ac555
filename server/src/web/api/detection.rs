use crate::management::detection_manager::DetectionManager;
use crate::utils::config::Config;
use crate::utils::logging::*;
use actix_multipart::{Field, Multipart};
use actix_web::http::header::ContentDisposition;
use actix_web::{post, web, HttpResponse, Responder, Scope};
use futures::{StreamExt, TryStreamExt};
use sanitize_filename::sanitize;
use std::path::Path;

pub fn initialize() -> Scope {
    web::scope("/detection")
        .service(upload)
        .service(scan)
}

#[post("/upload")]
async fn upload(payload: Multipart) -> impl Responder {
    match read_image_field(payload).await {
        Ok((data, extension)) => match DetectionManager::detect_weight(&data, &extension).await {
            Ok(report) => HttpResponse::Ok().json(web::Json(report)),
            Err(entry) => {
                logging_entry!(entry);
                HttpResponse::InternalServerError().body("Image could not be processed.")
            },
        },
        Err(response) => response,
    }
}

#[post("/scan")]
async fn scan(payload: Multipart) -> impl Responder {
    match read_image_field(payload).await {
        Ok((data, extension)) => match DetectionManager::scan_regions(&data, &extension).await {
            Ok(report) => HttpResponse::Ok().json(web::Json(report)),
            Err(entry) => {
                logging_entry!(entry);
                HttpResponse::InternalServerError().body("Image could not be processed.")
            },
        },
        Err(response) => response,
    }
}

async fn read_image_field(mut payload: Multipart) -> Result<(Vec<u8>, String), HttpResponse> {
    let config = Config::now().await;
    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = match field.content_disposition() {
            Some(content_disposition) => content_disposition,
            None => return Err(HttpResponse::InternalServerError().finish()),
        };
        let field_name = match get_field_name(content_disposition) {
            Some(field_name) => field_name,
            None => return Err(HttpResponse::BadRequest().body("Invalid payload.")),
        };
        if field_name != "image" {
            continue;
        }
        let file_name = match get_file_name(content_disposition) {
            Some(file_name) => file_name,
            None => return Err(HttpResponse::BadRequest().body("Invalid payload.")),
        };
        let sanitized_file_name = sanitize(file_name);
        if sanitized_file_name.is_empty() {
            return Err(HttpResponse::BadRequest().body("Invalid filename."));
        }
        let extension = Path::new(&sanitized_file_name).extension()
            .and_then(|os_str| os_str.to_str()).unwrap_or("").to_lowercase();
        if !matches!(extension.as_str(), "png" | "jpg" | "jpeg") {
            return Err(HttpResponse::BadRequest().body("Invalid file type or extension."));
        }
        if !is_image_content(&field) {
            return Err(HttpResponse::BadRequest().body("Only image uploads are accepted."));
        }
        let data = read_field_data(&mut field, config.max_upload_size).await?;
        if data.is_empty() {
            return Err(HttpResponse::BadRequest().body("Empty image field."));
        }
        return Ok((data, extension));
    }
    Err(HttpResponse::BadRequest().body("Missing image field."))
}

fn get_field_name(content_disposition: &ContentDisposition) -> Option<String> {
    content_disposition.get_name().map(|field_name| field_name.to_string())
}

fn get_file_name(content_disposition: &ContentDisposition) -> Option<String> {
    content_disposition.get_filename().map(|file_name| file_name.to_string())
}

fn is_image_content(field: &Field) -> bool {
    match field.content_type() {
        Some(content_type) => content_type.essence_str().starts_with("image/"),
        None => false,
    }
}

async fn read_field_data(field: &mut Field, size_limit: usize) -> Result<Vec<u8>, HttpResponse> {
    let mut data = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(_) => return Err(HttpResponse::InternalServerError().finish()),
        };
        if data.len() + chunk.len() > size_limit {
            return Err(HttpResponse::PayloadTooLarge().body("Image exceeds the upload size limit."));
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}
