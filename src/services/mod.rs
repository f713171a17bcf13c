pub mod calculation;
pub mod price;

use crate::db::PgPool;

// Constructor-injected service bundle threaded through the filter tree.
// Each service holds only its data-access dependency.
#[derive(Clone)]
pub struct Services {
    pub pool: PgPool,
    pub prices: price::PriceService,
    pub calculations: calculation::CalculationService,
}

impl Services {
    pub fn new(pool: PgPool) -> Self {
        let prices = price::PriceService::new(pool.clone());
        let calculations = calculation::CalculationService::new(pool.clone(), prices.clone());
        Services {
            pool,
            prices,
            calculations,
        }
    }
}
