mod login;

use crate::services::Services;
use warp::Filter;

pub fn api_v1_auth(
    services: Services,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("auth")
        .and(login::staff_login(services))
        .and(warp::path::end())
}
