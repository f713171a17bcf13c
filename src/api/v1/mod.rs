mod auth;
mod calculations;
mod prices;
mod students;

use crate::services::Services;
use warp::Filter;

pub fn api_v1(
    services: Services,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("v1")
        .and(
            auth::api_v1_auth(services.clone())
                .or(calculations::api_v1_calculations(services.clone()))
                .or(prices::api_v1_prices(services.clone()))
                .or(students::api_v1_students(services)),
        )
        .and(warp::path::end())
}
