//! Temporal price resolution and the supporting price catalogue.
//!
//! Prices are versioned rows: several records may exist for the same scope,
//! each with its own `effective_date`. The resolver picks the governing one
//! for a given as-of date; the catalogue operations keep the versions.

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, Utc};
use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};
use tokio::task;

use crate::db::PgPool;
use crate::helper_model::EscolarError;
use crate::model::{NewPrice, Price, PriceType};

/// Scope a price applies to: tuition is per series, services are per
/// service name, the overage rate is school-wide.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceScope {
    Global,
    Series(i32),
    Service(String),
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreatePriceInput {
    #[serde(rename = "type")]
    pub price_type: PriceType,
    pub series_id: Option<i32>,
    pub service_name: Option<String>,
    pub value: BigDecimal,
    pub value_per_hour: Option<BigDecimal>,
    pub effective_date: Option<NaiveDate>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PriceFilters {
    #[serde(rename = "type")]
    pub price_type: Option<PriceType>,
    pub series_id: Option<i32>,
    pub service_name: Option<String>,
    pub active: Option<bool>,
}

/// Governing record among candidates already filtered to active rows of
/// the right type and scope with `effective_date <= as_of`: the latest
/// effective date wins, ties broken by most recent creation.
pub fn governing_price(candidates: Vec<Price>) -> Option<Price> {
    candidates.into_iter().max_by(|a, b| {
        a.effective_date
            .cmp(&b.effective_date)
            .then(a.created_at.cmp(&b.created_at))
    })
}

#[derive(Clone)]
pub struct PriceService {
    pool: PgPool,
}

impl PriceService {
    pub fn new(pool: PgPool) -> Self {
        PriceService { pool }
    }

    /// Governing price for (type, scope) as of a date: the active record
    /// with the latest `effective_date <= as_of`, ties broken by most
    /// recent creation. `None` is not an error; callers degrade the
    /// corresponding budget component instead of failing.
    pub async fn resolve_price(
        &self,
        wanted: PriceType,
        as_of: NaiveDate,
        scope: PriceScope,
    ) -> Result<Option<Price>, EscolarError> {
        let pool = self.pool.clone();
        task::spawn_blocking(move || -> Result<Option<Price>, EscolarError> {
            use crate::schema::prices::dsl::*;
            let mut conn = pool.get().map_err(EscolarError::database)?;
            let mut query = prices
                .filter(active.eq(true))
                .filter(price_type.eq(wanted))
                .filter(effective_date.le(as_of))
                .into_boxed();
            query = match scope {
                PriceScope::Global => query,
                PriceScope::Series(wanted_series) => query.filter(series_id.eq(wanted_series)),
                PriceScope::Service(wanted_service) => {
                    query.filter(service_name.eq(wanted_service))
                }
            };
            let candidates = query
                .load::<Price>(&mut conn)
                .map_err(EscolarError::database)?;
            Ok(governing_price(candidates))
        })
        .await
        .map_err(EscolarError::internal)?
    }

    /// Register a new price version. Exactly one active record per scope is
    /// allowed at a time; versioning happens by deactivating the old record
    /// first (or letting `effective_date` ordering govern after reactivation).
    pub async fn create_price(&self, input: CreatePriceInput) -> Result<Price, EscolarError> {
        match input.price_type {
            PriceType::Mensalidade if input.series_id.is_none() => {
                return Err(EscolarError::InvalidPrice(String::from(
                    "seriesId is required for tuition prices.",
                )));
            }
            PriceType::Servico if input.service_name.is_none() => {
                return Err(EscolarError::InvalidPrice(String::from(
                    "serviceName is required for service prices.",
                )));
            }
            PriceType::HoraExtra if input.value_per_hour.is_none() => {
                return Err(EscolarError::InvalidPrice(String::from(
                    "valuePerHour is required for overage prices.",
                )));
            }
            _ => {}
        }
        if input.value <= BigDecimal::from(0) {
            return Err(EscolarError::InvalidPrice(String::from(
                "value must be greater than zero.",
            )));
        }
        if let Some(per_hour) = &input.value_per_hour {
            if per_hour <= &BigDecimal::from(0) {
                return Err(EscolarError::InvalidPrice(String::from(
                    "valuePerHour must be greater than zero.",
                )));
            }
        }

        let pool = self.pool.clone();
        task::spawn_blocking(move || -> Result<Price, EscolarError> {
            use crate::schema::prices::dsl::*;
            let mut conn = pool.get().map_err(EscolarError::database)?;

            let mut conflict_query = prices
                .filter(active.eq(true))
                .filter(price_type.eq(input.price_type))
                .into_boxed();
            conflict_query = match input.price_type {
                PriceType::Mensalidade => conflict_query.filter(series_id.eq(input.series_id)),
                PriceType::Servico => {
                    conflict_query.filter(service_name.eq(input.service_name.clone()))
                }
                PriceType::HoraExtra => conflict_query,
            };
            let conflicting: i64 = conflict_query
                .count()
                .get_result(&mut conn)
                .map_err(EscolarError::database)?;
            if conflicting > 0 {
                return Err(EscolarError::PriceConflict);
            }

            let new_price = NewPrice {
                price_type: input.price_type,
                series_id: input.series_id,
                service_name: input.service_name,
                value: input.value,
                value_per_hour: input.value_per_hour,
                effective_date: input
                    .effective_date
                    .unwrap_or_else(|| Utc::now().date_naive()),
                active: true,
                created_at: Utc::now(),
            };
            diesel::insert_into(prices)
                .values(&new_price)
                .get_result::<Price>(&mut conn)
                .map_err(EscolarError::database)
        })
        .await
        .map_err(EscolarError::internal)?
    }

    /// List price versions. With `active: None` this doubles as the history
    /// view for a scope; filters narrow by type, series and service name.
    pub async fn list_prices(&self, filters: PriceFilters) -> Result<Vec<Price>, EscolarError> {
        let pool = self.pool.clone();
        task::spawn_blocking(move || -> Result<Vec<Price>, EscolarError> {
            use crate::schema::prices::dsl::*;
            let mut conn = pool.get().map_err(EscolarError::database)?;
            let mut query = prices.into_boxed();
            if let Some(wanted) = filters.price_type {
                query = query.filter(price_type.eq(wanted));
            }
            if let Some(wanted_series) = filters.series_id {
                query = query.filter(series_id.eq(wanted_series));
            }
            if let Some(wanted_service) = filters.service_name {
                query = query.filter(service_name.eq(wanted_service));
            }
            if let Some(wanted_active) = filters.active {
                query = query.filter(active.eq(wanted_active));
            }
            query
                .order((effective_date.desc(), created_at.desc()))
                .load::<Price>(&mut conn)
                .map_err(EscolarError::database)
        })
        .await
        .map_err(EscolarError::internal)?
    }

    /// Soft delete: prices are never removed, only deactivated, so history
    /// queries keep seeing every version.
    pub async fn deactivate_price(&self, price_id: i32) -> Result<Price, EscolarError> {
        let pool = self.pool.clone();
        let updated = task::spawn_blocking(move || -> Result<Option<Price>, EscolarError> {
            use crate::schema::prices::dsl::*;
            let mut conn = pool.get().map_err(EscolarError::database)?;
            diesel::update(prices.filter(id.eq(price_id)))
                .set(active.eq(false))
                .get_result::<Price>(&mut conn)
                .optional()
                .map_err(EscolarError::database)
        })
        .await
        .map_err(EscolarError::internal)??;
        updated.ok_or(EscolarError::PriceNotFound)
    }
}

// -------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn price(id: i32, effective: (i32, u32, u32), created_day: u32) -> Price {
        Price {
            id,
            price_type: PriceType::Mensalidade,
            series_id: Some(1),
            service_name: None,
            value: "850.00".parse().unwrap(),
            value_per_hour: None,
            effective_date: NaiveDate::from_ymd_opt(effective.0, effective.1, effective.2)
                .unwrap(),
            active: true,
            created_at: Utc.with_ymd_and_hms(2025, 1, created_day, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn latest_effective_date_wins() {
        let older = price(1, (2025, 1, 1), 9);
        let newer = price(2, (2025, 3, 1), 2);
        let picked = governing_price(vec![older, newer]).unwrap();
        assert_eq!(picked.id, 2);
        // Order of arrival does not matter.
        let older = price(1, (2025, 1, 1), 9);
        let newer = price(2, (2025, 3, 1), 2);
        let picked = governing_price(vec![newer, older]).unwrap();
        assert_eq!(picked.id, 2);
    }

    #[test]
    fn equal_effective_dates_break_on_creation_time() {
        let first = price(1, (2025, 2, 1), 3);
        let second = price(2, (2025, 2, 1), 7);
        let picked = governing_price(vec![second, first]).unwrap();
        assert_eq!(picked.id, 2);
    }

    #[test]
    fn no_candidates_is_not_an_error() {
        assert!(governing_price(Vec::new()).is_none());
    }
}
