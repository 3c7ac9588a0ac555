use crate::management::server::Server;

pub mod management;
pub mod utils;
pub mod web;

#[actix_web::main]
async fn main() {
    Server::run().await;
    Server::terminate().await;
}
