use crate::helper_model::{ErrorResponse, EscolarError};
use crate::model;
use warp::http::StatusCode;
use warp::{Rejection, Reply};

pub fn bad_request(err_msg: &str) -> Result<(warp::reply::Response,), Rejection> {
    let msg: ErrorResponse = ErrorResponse {
        title: String::from("Bad Request"),
        message: err_msg.to_string(),
    };
    Ok::<_, Rejection>((warp::reply::with_status(
        warp::reply::json(&msg),
        StatusCode::BAD_REQUEST,
    )
    .into_response(),))
}

pub fn internal_server_error_response(context: &str) -> Result<(warp::reply::Response,), Rejection> {
    eprintln!("internal error: {}", context);
    let msg: ErrorResponse = ErrorResponse {
        title: String::from("Internal Server Error"),
        message: String::from("Please try again later. If the issue persists, contact the school office."),
    };
    Ok::<_, Rejection>((warp::reply::with_status(
        warp::reply::json(&msg),
        StatusCode::INTERNAL_SERVER_ERROR,
    )
    .into_response(),))
}

pub fn staff_not_allowed() -> Result<(warp::reply::Response,), Rejection> {
    let msg: ErrorResponse = ErrorResponse {
        title: String::from("Permission Denied"),
        message: String::from("Your role does not allow this operation."),
    };
    Ok((warp::reply::with_status(warp::reply::json(&msg), StatusCode::FORBIDDEN).into_response(),))
}

pub fn staff_inactive() -> Result<(warp::reply::Response,), Rejection> {
    let msg: ErrorResponse = ErrorResponse {
        title: String::from("Permission Denied"),
        message: String::from("This staff account has been deactivated."),
    };
    Ok((warp::reply::with_status(warp::reply::json(&msg), StatusCode::FORBIDDEN).into_response(),))
}

pub fn student_not_found() -> Result<(warp::reply::Response,), Rejection> {
    let msg: ErrorResponse = ErrorResponse {
        title: String::from("Student Not Found"),
        message: String::from("No student exists with this id."),
    };
    Ok((warp::reply::with_status(warp::reply::json(&msg), StatusCode::NOT_FOUND).into_response(),))
}

pub fn student_not_active() -> Result<(warp::reply::Response,), Rejection> {
    let msg: ErrorResponse = ErrorResponse {
        title: String::from("Student Not Active"),
        message: String::from("Budgets can only be computed for actively enrolled students."),
    };
    Ok((warp::reply::with_status(warp::reply::json(&msg), StatusCode::BAD_REQUEST).into_response(),))
}

pub fn contract_not_found(day_of_week: i32) -> Result<(warp::reply::Response,), Rejection> {
    let msg_txt =
        "No contract matrix entry for weekday ".to_owned() + &day_of_week.to_string() + ".";
    let msg: ErrorResponse = ErrorResponse {
        title: String::from("Contract Not Found"),
        message: msg_txt,
    };
    Ok((warp::reply::with_status(warp::reply::json(&msg), StatusCode::NOT_FOUND).into_response(),))
}

pub fn price_not_found() -> Result<(warp::reply::Response,), Rejection> {
    let msg: ErrorResponse = ErrorResponse {
        title: String::from("Price Not Found"),
        message: String::from("No price exists with this id."),
    };
    Ok((warp::reply::with_status(warp::reply::json(&msg), StatusCode::NOT_FOUND).into_response(),))
}

pub fn price_conflict() -> Result<(warp::reply::Response,), Rejection> {
    let msg: ErrorResponse = ErrorResponse {
        title: String::from("Price Conflict"),
        message: String::from("An active price already exists for this configuration."),
    };
    Ok((warp::reply::with_status(warp::reply::json(&msg), StatusCode::CONFLICT).into_response(),))
}

pub fn response_with_obj<T>(
    obj: T,
    status_code: StatusCode,
) -> Result<(warp::reply::Response,), Rejection>
where
    T: serde::Serialize,
{
    Ok((warp::reply::with_status(warp::reply::json(&obj), status_code).into_response(),))
}

/// Login reply: staff JSON body plus the fresh session token in a header.
pub fn auth_staff_reply(
    staff: &model::PublishStaff,
    token_data: &model::PublishAccessToken,
) -> Result<(warp::reply::Response,), Rejection> {
    let reply = warp::reply::json(&staff);
    let reply = warp::reply::with_header(reply, "token", token_data.clone().token);
    Ok((warp::reply::with_status(reply, StatusCode::OK).into_response(),))
}

/// Single mapping from core errors to HTTP replies. Endpoints call this for
/// anything they do not special-case.
pub fn escolar_error_response(err: &EscolarError) -> Result<(warp::reply::Response,), Rejection> {
    match err {
        EscolarError::TokenFormat => crate::methods::tokens::token_not_hex_return(),
        EscolarError::InvalidToken => crate::methods::tokens::token_invalid_return(),
        EscolarError::StaffInactive => staff_inactive(),
        EscolarError::TimeFormat(time) => {
            let msg_txt = "Invalid time \"".to_owned() + time + "\". Use HH:mm.";
            bad_request(&msg_txt)
        }
        EscolarError::InvalidWeekday => {
            bad_request("Saturdays and Sundays are not school days.")
        }
        EscolarError::FutureDate => {
            bad_request("Extra hours cannot be computed for future dates.")
        }
        EscolarError::InvalidMonth => bad_request("Month must be between 1 and 12."),
        EscolarError::InvalidSchedule(msg) => bad_request(msg),
        EscolarError::ContractNotFound(day) => contract_not_found(*day),
        EscolarError::StudentNotFound => student_not_found(),
        EscolarError::StudentNotActive => student_not_active(),
        EscolarError::PriceNotFound => price_not_found(),
        EscolarError::PriceConflict => price_conflict(),
        EscolarError::InvalidPrice(msg) => bad_request(msg),
        EscolarError::Database(context) | EscolarError::Internal(context) => {
            internal_server_error_response(context)
        }
    }
}
