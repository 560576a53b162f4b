use actix_web::{middleware, web, App, HttpServer};
use diesel::r2d2::ConnectionManager;
use failure::ResultExt;
use std::net::SocketAddr;
use std::num::NonZeroU32;
use structopt::StructOpt;
use trivia::config::Settings;
use trivia::routes;
use trivia::store::DbPool;

#[derive(StructOpt)]
struct Args {
    #[structopt(short, long, default_value = "0.0.0.0:5000")]
    bind: SocketAddr,
    #[structopt(short, long, env = "DATABASE_URL")]
    database_url: String,
    #[structopt(long, env = "TRIVIA_PAGE_SIZE", default_value = "10")]
    page_size: NonZeroU32,
    #[structopt(long, default_value = "10")]
    pool_size: u32,
}

#[actix_rt::main]
async fn main() -> Result<(), exitfailure::ExitFailure> {
    let _ = dotenv::dotenv();
    env_logger::init();
    let args = Args::from_args();

    let cm = ConnectionManager::new(&args.database_url);
    let pool = DbPool::builder()
        .max_size(args.pool_size)
        .build(cm)
        .context("unable to connect database")?;
    let settings = Settings::with_page_size(args.page_size);
    log::info!(
        "listening on {} with {} questions per page",
        args.bind,
        settings.page_size
    );

    HttpServer::new(move || {
        App::new()
            .data(pool.clone())
            .data(settings)
            .app_data(routes::json_config())
            .app_data(routes::query_config())
            .configure(routes::configure::<DbPool>)
            .default_service(web::route().to(routes::not_found))
            .wrap(routes::cors())
            .wrap(middleware::Logger::default())
    })
    .bind(&args.bind)?
    .run()
    .await?;
    Ok(())
}
