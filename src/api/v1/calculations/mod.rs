mod budget;
mod export;
mod extra_hours;
mod history;
mod simulate;

use crate::services::Services;
use warp::Filter;

pub fn api_v1_calculations(
    services: Services,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path("calculations")
        .and(
            extra_hours::calculate_extra_hours(services.clone())
                .or(budget::monthly_budget(services.clone()))
                .or(simulate::simulate_contract(services.clone()))
                .or(history::extra_hours_history(services.clone()))
                .or(export::export_report(services)),
        )
        .and(warp::path::end())
}
