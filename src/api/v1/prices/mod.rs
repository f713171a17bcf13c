mod create;
mod deactivate;
mod get_all;

use crate::services::Services;
use warp::Filter;

pub fn api_v1_prices(
    services: Services,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("prices")
        .and(
            create::create_price(services.clone())
                .or(get_all::get_all_prices(services.clone()))
                .or(deactivate::deactivate_price(services)),
        )
        .and(warp::path::end())
}
