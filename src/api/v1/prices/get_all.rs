use warp::Filter;
use warp::http::StatusCode;

use crate::methods::{standard_replies, tokens};
use crate::services::Services;
use crate::services::price::PriceFilters;

pub fn get_all_prices(
    services: Services,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("get-all")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<PriceFilters>())
        .and(warp::header::<String>("auth"))
        .and_then(move |filters: PriceFilters, auth: String| {
            let services = services.clone();
            async move {
                if let Err(err) = tokens::authorize(&services.pool, &auth).await {
                    return standard_replies::escolar_error_response(&err);
                }
                match services.prices.list_prices(filters).await {
                    Ok(price_list) => {
                        let msg = serde_json::json!({"prices": price_list});
                        standard_replies::response_with_obj(msg, StatusCode::OK)
                    }
                    Err(err) => standard_replies::escolar_error_response(&err),
                }
            }
        })
}
