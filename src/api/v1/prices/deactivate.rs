use warp::Filter;
use warp::http::StatusCode;

use crate::methods::{standard_replies, tokens};
use crate::services::Services;

pub fn deactivate_price(
    services: Services,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("deactivate" / i32)
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::header::<String>("auth"))
        .and_then(move |price_id: i32, auth: String| {
            let services = services.clone();
            async move {
                let staff = match tokens::authorize(&services.pool, &auth).await {
                    Ok(staff) => staff,
                    Err(err) => return standard_replies::escolar_error_response(&err),
                };
                // Retiring a price rewrites billing going forward; ADMIN only.
                if !staff.is_admin() {
                    return standard_replies::staff_not_allowed();
                }
                match services.prices.deactivate_price(price_id).await {
                    Ok(price) => standard_replies::response_with_obj(price, StatusCode::OK),
                    Err(err) => standard_replies::escolar_error_response(&err),
                }
            }
        })
}
