use warp::Filter;
use warp::http::StatusCode;

use crate::helper_model::EscolarError;
use crate::methods::{standard_replies, time, tokens};
use crate::services::Services;
use crate::services::calculation::SimulationParams;

fn validate_params(params: &SimulationParams) -> Result<(), EscolarError> {
    for (day, schedule) in &params.contract_matrix {
        if *day > 4 {
            return Err(EscolarError::InvalidWeekday);
        }
        for contracted_time in [&schedule.entry_time, &schedule.exit_time] {
            if !time::is_half_hour_mark(contracted_time) {
                return Err(EscolarError::TimeFormat(contracted_time.clone()));
            }
        }
        if !time::validate_time_range(&schedule.entry_time, &schedule.exit_time)? {
            return Err(EscolarError::InvalidSchedule(String::from(
                "exitTime must be after entryTime.",
            )));
        }
    }
    if let Some(discounts) = params.discounts {
        for percent in [
            discounts.mensalidade,
            discounts.servicos,
            discounts.horas_extras,
        ]
        .into_iter()
        .flatten()
        {
            if !(0.0..=100.0).contains(&percent) {
                return Err(EscolarError::InvalidSchedule(String::from(
                    "Discounts must be between 0 and 100 percent.",
                )));
            }
        }
    }
    Ok(())
}

pub fn simulate_contract(
    services: Services,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("simulate")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::json())
        .and(warp::header::<String>("auth"))
        .and_then(move |params: SimulationParams, auth: String| {
            let services = services.clone();
            async move {
                let staff = match tokens::authorize(&services.pool, &auth).await {
                    Ok(staff) => staff,
                    Err(err) => return standard_replies::escolar_error_response(&err),
                };
                if !staff.can_manage_billing() {
                    return standard_replies::staff_not_allowed();
                }
                if let Err(err) = validate_params(&params) {
                    return standard_replies::escolar_error_response(&err);
                }

                match services.calculations.simulate_contract(params).await {
                    Ok(result) => standard_replies::response_with_obj(result, StatusCode::OK),
                    Err(err) => standard_replies::escolar_error_response(&err),
                }
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper_model::{DaySchedule, Discounts};
    use std::collections::HashMap;

    fn params_with(matrix: HashMap<u8, DaySchedule>, discounts: Option<Discounts>) -> SimulationParams {
        SimulationParams {
            student_id: 1,
            contract_matrix: matrix,
            discounts,
            month: 6,
            year: 2025,
        }
    }

    fn schedule(entry: &str, exit: &str) -> DaySchedule {
        DaySchedule {
            entry_time: entry.to_string(),
            exit_time: exit.to_string(),
            services: HashMap::new(),
        }
    }

    #[test]
    fn accepts_a_well_formed_matrix() {
        let matrix = HashMap::from([(0u8, schedule("08:00", "12:30"))]);
        assert!(validate_params(&params_with(matrix, None)).is_ok());
    }

    #[test]
    fn rejects_weekend_day_keys() {
        let matrix = HashMap::from([(5u8, schedule("08:00", "12:00"))]);
        assert_eq!(
            validate_params(&params_with(matrix, None)),
            Err(EscolarError::InvalidWeekday)
        );
    }

    #[test]
    fn rejects_off_grid_contract_times() {
        let matrix = HashMap::from([(0u8, schedule("08:15", "12:00"))]);
        assert_eq!(
            validate_params(&params_with(matrix, None)),
            Err(EscolarError::TimeFormat(String::from("08:15")))
        );
    }

    #[test]
    fn rejects_inverted_ranges() {
        let matrix = HashMap::from([(0u8, schedule("12:00", "08:00"))]);
        assert!(validate_params(&params_with(matrix, None)).is_err());
    }

    #[test]
    fn rejects_out_of_range_discounts() {
        let discounts = Discounts {
            mensalidade: Some(150.0),
            servicos: None,
            horas_extras: None,
        };
        assert!(validate_params(&params_with(HashMap::new(), Some(discounts))).is_err());
        let negative = Discounts {
            mensalidade: None,
            servicos: Some(-5.0),
            horas_extras: None,
        };
        assert!(validate_params(&params_with(HashMap::new(), Some(negative))).is_err());
    }
}
