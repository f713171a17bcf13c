use warp::Filter;
use warp::http::StatusCode;

use crate::methods::{standard_replies, tokens};
use crate::services::Services;
use crate::services::price::CreatePriceInput;

pub fn create_price(
    services: Services,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("create")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(warp::header::<String>("auth"))
        .and_then(move |input: CreatePriceInput, auth: String| {
            let services = services.clone();
            async move {
                let staff = match tokens::authorize(&services.pool, &auth).await {
                    Ok(staff) => staff,
                    Err(err) => return standard_replies::escolar_error_response(&err),
                };
                if !staff.can_manage_billing() {
                    return standard_replies::staff_not_allowed();
                }
                match services.prices.create_price(input).await {
                    Ok(price) => standard_replies::response_with_obj(price, StatusCode::CREATED),
                    Err(err) => standard_replies::escolar_error_response(&err),
                }
            }
        })
}
