mod get;
mod rm_contract_day;
mod set_contract_day;

use crate::services::Services;
use warp::Filter;

pub fn api_v1_students(
    services: Services,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("students")
        .and(
            get::get_student(services.clone())
                .or(set_contract_day::set_contract_day(services.clone()))
                .or(rm_contract_day::rm_contract_day(services)),
        )
        .and(warp::path::end())
}
