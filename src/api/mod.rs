mod v1;

use crate::services::Services;
use warp::Filter;

pub fn api(
    services: Services,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("api")
        .and(v1::api_v1(services))
        .and(warp::path::end())
}
