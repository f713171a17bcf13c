mod api;
mod db;
mod helper_model;
mod methods;
mod model;
mod schema;
mod services;

use warp::Filter;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let port = std::env::var("PORT")
        .ok()
        .and_then(|raw| raw.parse::<u16>().ok())
        .unwrap_or(3030);

    let pool = db::get_connection_pool();
    let services = services::Services::new(pool);

    // routing for the server
    let httpd = api::api(services).and(warp::path::end());
    // TODO: tls
    warp::serve(httpd).run(([127, 0, 0, 1], port)).await;
}
