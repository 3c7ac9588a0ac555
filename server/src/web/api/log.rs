use crate::utils::logging::{LogEntry, Logger};
use actix_web::{get, web, HttpResponse, Responder, Scope};
use chrono::{DateTime, Local};

pub fn initialize() -> Scope {
    web::scope("/log")
        .service(system_log)
        .service(system_log_latest)
        .service(system_log_since)
}

#[get("/system_log")]
async fn system_log() -> impl Responder {
    web::Json(render(Logger::get_system_logs().await))
}

#[get("/system_log/latest/{count}")]
async fn system_log_latest(count: web::Path<usize>) -> impl Responder {
    web::Json(render(Logger::get_latest_system_logs(count.into_inner()).await))
}

#[get("/system_log/since/{since}")]
async fn system_log_since(since: web::Path<String>) -> impl Responder {
    match parse_datetime(&since.into_inner()) {
        Ok(since_time) => {
            let logs = render(Logger::get_system_logs_since(since_time).await);
            HttpResponse::Ok().json(web::Json(logs))
        }
        Err(_) => HttpResponse::BadRequest().body("Invalid datetime format."),
    }
}

fn render(logs: Vec<LogEntry>) -> Vec<String> {
    logs.into_iter().map(|entry| entry.to_colored_string()).collect()
}

fn parse_datetime(datetime_str: &str) -> Result<DateTime<Local>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(datetime_str)
        .map(|datetime| datetime.with_timezone(&Local))
}
