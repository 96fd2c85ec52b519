use actix_web::{App, HttpServer, web};

use bookstall::db::establish_connection_pool;
use bookstall::models::config::ServerConfig;
use bookstall::routes::{books, progress, purchases};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config: ServerConfig = config::Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::default())
        .build()
        .and_then(config::Config::try_deserialize)
        .map_err(|e| std::io::Error::other(format!("failed to load configuration: {e}")))?;

    let pool = establish_connection_pool(&config.database_url)
        .map_err(|e| std::io::Error::other(format!("failed to create database pool: {e}")))?;

    let bind = (config.bind_address.clone(), config.port);
    log::info!("Starting server on {}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .service(books::list_books)
            .service(books::get_book)
            .service(books::create_book)
            .service(books::update_book)
            .service(books::my_books)
            .service(purchases::check_ownership)
            .service(purchases::create_payment_intent)
            .service(purchases::create_purchase)
            .service(purchases::my_purchases)
            .service(purchases::book_sales)
            .service(purchases::my_sales)
            .service(progress::get_progress)
            .service(progress::update_progress)
            .service(progress::my_progress)
    })
    .bind(bind)?
    .run()
    .await
}
