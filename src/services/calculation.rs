//! The billing engine: extra-hours computation against the contracted
//! schedule, monthly budget aggregation and what-if contract simulation.
//!
//! Money is `BigDecimal` end to end; hours stay `f64` because they are
//! quantized to half-hour blocks before anything is stored or priced.

use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive};
use chrono::{Datelike, NaiveDate, Utc};
use diesel::prelude::*;
use serde_derive::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tokio::task;

use crate::db::PgPool;
use crate::helper_model::{
    BudgetBreakdown, BudgetDiff, DayDetail, DaySchedule, Discounts, EscolarError,
    ExtraHoursSummary, HistoryEntry, MonthlyReport, ReportPeriod, ReportStudent, ServiceLine,
    SimulationResult,
};
use crate::methods::time;
use crate::model::{
    ContractMatrixEntry, ExtraHoursRecord, NewExtraHoursRecord, PriceType, SchoolClass, Segment,
    Series, Student,
};
use crate::services::price::{PriceScope, PriceService};

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SimulationParams {
    pub student_id: i32,
    pub contract_matrix: HashMap<u8, DaySchedule>,
    pub discounts: Option<Discounts>,
    pub month: u32,
    pub year: i32,
}

// ------------------------------------------------------------------
// Pure helpers
// ------------------------------------------------------------------

/// Billing granularity is the half-hour block: `round(hours * 2) / 2`,
/// half up. 70 extra minutes bill as 1.0h, 85 as 1.5h.
pub fn round_to_half_hour(extra_minutes: i32) -> f64 {
    (extra_minutes as f64 / 30.0).round() / 2.0
}

/// Overage for one day: minutes arrived before the contracted entry plus
/// minutes stayed past the contracted exit, quantized to half hours.
/// Leaving early or arriving late never credits time back.
pub fn extra_hours_between(
    contracted_entry: &str,
    contracted_exit: &str,
    real_entry: &str,
    real_exit: &str,
) -> Result<f64, EscolarError> {
    let contracted_entry_min = time::time_to_minutes(contracted_entry)?;
    let contracted_exit_min = time::time_to_minutes(contracted_exit)?;
    let real_entry_min = time::time_to_minutes(real_entry)?;
    let real_exit_min = time::time_to_minutes(real_exit)?;

    let minutes_before = (contracted_entry_min - real_entry_min).max(0);
    let minutes_after = (real_exit_min - contracted_exit_min).max(0);

    Ok(round_to_half_hour(minutes_before + minutes_after))
}

/// Exact decimal for a half-hour-quantized `f64` hours value.
pub fn hours_to_decimal(hours: f64) -> BigDecimal {
    let half_steps = (hours * 2.0).round() as i64;
    BigDecimal::from(half_steps) / BigDecimal::from(2)
}

fn to_money(value: &BigDecimal) -> BigDecimal {
    value.with_scale_round(2, RoundingMode::HalfUp)
}

/// Scale a monetary component by `1 - percent/100`. Percentages carry at
/// most two fraction digits, so the arithmetic stays exact in basis points.
pub fn apply_discount(value: &BigDecimal, percent: Option<f64>) -> BigDecimal {
    match percent {
        Some(p) if p > 0.0 => {
            let basis_points = BigDecimal::from(10_000i64)
                - BigDecimal::from((p * 100.0).round() as i64);
            to_money(&((value * basis_points) / BigDecimal::from(10_000i64)))
        }
        _ => to_money(value),
    }
}

/// Union of service names marked `true` anywhere across the stored matrix.
pub fn contracted_service_names(entries: &[ContractMatrixEntry]) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    for entry in entries {
        if let Some(map) = entry.services.as_object() {
            for (name, enabled) in map {
                if enabled.as_bool() == Some(true) {
                    names.insert(name.clone());
                }
            }
        }
    }
    names
}

/// Same union, over a hypothetical matrix supplied by the simulator.
pub fn simulated_service_names(matrix: &HashMap<u8, DaySchedule>) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    for schedule in matrix.values() {
        for (name, enabled) in &schedule.services {
            if *enabled {
                names.insert(name.clone());
            }
        }
    }
    names
}

fn assemble_breakdown(
    mensalidade: BigDecimal,
    servicos_contratados: Vec<ServiceLine>,
    total_horas: &BigDecimal,
    valor_por_hora: BigDecimal,
    detalhamento_dias: Vec<DayDetail>,
) -> BudgetBreakdown {
    let subtotal = to_money(&(total_horas * &valor_por_hora));
    let total_servicos = servicos_contratados
        .iter()
        .fold(BigDecimal::from(0), |acc, line| acc + &line.valor);
    let total_geral = to_money(&(&mensalidade + &total_servicos + &subtotal));
    BudgetBreakdown {
        mensalidade,
        servicos_contratados,
        horas_extras: ExtraHoursSummary {
            total_horas: total_horas.to_f64().unwrap_or(0.0),
            valor_por_hora,
            subtotal,
        },
        total_geral,
        detalhamento_dias,
    }
}

fn breakdown_diff(current: &BudgetBreakdown, simulated: &BudgetBreakdown) -> BudgetDiff {
    let sum_services = |breakdown: &BudgetBreakdown| {
        breakdown
            .servicos_contratados
            .iter()
            .fold(BigDecimal::from(0), |acc, line| acc + &line.valor)
    };
    BudgetDiff {
        mensalidade: &simulated.mensalidade - &current.mensalidade,
        servicos_contratados: sum_services(simulated) - sum_services(current),
        horas_extras: &simulated.horas_extras.subtotal - &current.horas_extras.subtotal,
        total_geral: &simulated.total_geral - &current.total_geral,
    }
}

// ------------------------------------------------------------------
// Calculation service
// ------------------------------------------------------------------

#[derive(Clone)]
pub struct CalculationService {
    pool: PgPool,
    prices: PriceService,
}

impl CalculationService {
    pub fn new(pool: PgPool, prices: PriceService) -> Self {
        CalculationService { pool, prices }
    }

    async fn get_student(&self, lookup_id: i32) -> Result<Option<Student>, EscolarError> {
        let pool = self.pool.clone();
        task::spawn_blocking(move || -> Result<Option<Student>, EscolarError> {
            use crate::schema::students::dsl::*;
            let mut conn = pool.get().map_err(EscolarError::database)?;
            students
                .filter(id.eq(lookup_id))
                .first::<Student>(&mut conn)
                .optional()
                .map_err(EscolarError::database)
        })
        .await
        .map_err(EscolarError::internal)?
    }

    async fn get_contract_matrix(
        &self,
        lookup_student: i32,
    ) -> Result<Vec<ContractMatrixEntry>, EscolarError> {
        let pool = self.pool.clone();
        task::spawn_blocking(move || -> Result<Vec<ContractMatrixEntry>, EscolarError> {
            use crate::schema::contract_matrix::dsl::*;
            let mut conn = pool.get().map_err(EscolarError::database)?;
            contract_matrix
                .filter(student_id.eq(lookup_student))
                .order(day_of_week.asc())
                .load::<ContractMatrixEntry>(&mut conn)
                .map_err(EscolarError::database)
        })
        .await
        .map_err(EscolarError::internal)?
    }

    async fn get_extra_hours_between(
        &self,
        lookup_student: i32,
        start: NaiveDate,
        end: NaiveDate,
        newest_first: bool,
    ) -> Result<Vec<ExtraHoursRecord>, EscolarError> {
        let pool = self.pool.clone();
        task::spawn_blocking(move || -> Result<Vec<ExtraHoursRecord>, EscolarError> {
            use crate::schema::extra_hours::dsl::*;
            let mut conn = pool.get().map_err(EscolarError::database)?;
            let query = extra_hours
                .filter(student_id.eq(lookup_student))
                .filter(date.ge(start))
                .filter(date.le(end));
            let result = if newest_first {
                query.order(date.desc()).load::<ExtraHoursRecord>(&mut conn)
            } else {
                query.order(date.asc()).load::<ExtraHoursRecord>(&mut conn)
            };
            result.map_err(EscolarError::database)
        })
        .await
        .map_err(EscolarError::internal)?
    }

    /// Compute and persist the overage for one real school day. Idempotent:
    /// recomputation for the same (student, date) overwrites the prior row.
    pub async fn calculate_extra_hours(
        &self,
        for_student: i32,
        day: NaiveDate,
        real_entry_time: &str,
        real_exit_time: &str,
    ) -> Result<f64, EscolarError> {
        if day > Utc::now().date_naive() {
            return Err(EscolarError::FutureDate);
        }
        let weekday = time::weekday_index(day)?;

        let pool = self.pool.clone();
        let matrix_entry = task::spawn_blocking(
            move || -> Result<Option<ContractMatrixEntry>, EscolarError> {
                use crate::schema::contract_matrix::dsl::*;
                let mut conn = pool.get().map_err(EscolarError::database)?;
                contract_matrix
                    .filter(student_id.eq(for_student))
                    .filter(day_of_week.eq(weekday))
                    .first::<ContractMatrixEntry>(&mut conn)
                    .optional()
                    .map_err(EscolarError::database)
            },
        )
        .await
        .map_err(EscolarError::internal)??;

        let matrix_entry = matrix_entry.ok_or(EscolarError::ContractNotFound(weekday))?;

        let hours = extra_hours_between(
            &matrix_entry.entry_time,
            &matrix_entry.exit_time,
            real_entry_time,
            real_exit_time,
        )?;
        let stored_hours = hours_to_decimal(hours);

        // Single atomic write; concurrent recomputations are last-writer-wins.
        let pool = self.pool.clone();
        task::spawn_blocking(move || -> Result<(), EscolarError> {
            use crate::schema::extra_hours::dsl;
            let mut conn = pool.get().map_err(EscolarError::database)?;
            let now = Utc::now();
            let new_record = NewExtraHoursRecord {
                student_id: for_student,
                date: day,
                hours_calculated: stored_hours.clone(),
                created_at: now,
                updated_at: now,
            };
            diesel::insert_into(dsl::extra_hours)
                .values(&new_record)
                .on_conflict((dsl::student_id, dsl::date))
                .do_update()
                .set((
                    dsl::hours_calculated.eq(stored_hours),
                    dsl::updated_at.eq(now),
                ))
                .execute(&mut conn)
                .map_err(EscolarError::database)?;
            Ok(())
        })
        .await
        .map_err(EscolarError::internal)??;

        Ok(hours)
    }

    /// Full month breakdown: tuition + contracted services + priced overage.
    /// Pure read. Prices are resolved as of the last civil day of the
    /// queried month, for historical months as well as the current one.
    pub async fn calculate_monthly_budget(
        &self,
        for_student: i32,
        month: u32,
        year: i32,
    ) -> Result<BudgetBreakdown, EscolarError> {
        let (breakdown, _) = self
            .monthly_budget_with_hours(for_student, month, year)
            .await?;
        Ok(breakdown)
    }

    /// Budget plus the exact summed hours total. The simulator reuses that
    /// total as-is; legacy rows may hold values off the half-hour grid and
    /// they must survive a re-pricing pass unchanged.
    async fn monthly_budget_with_hours(
        &self,
        for_student: i32,
        month: u32,
        year: i32,
    ) -> Result<(BudgetBreakdown, BigDecimal), EscolarError> {
        let (first_day, last_day) = time::month_bounds(month, year)?;

        let student = self
            .get_student(for_student)
            .await?
            .ok_or(EscolarError::StudentNotFound)?;
        if !student.is_enrolled() {
            return Err(EscolarError::StudentNotActive);
        }

        // 1. Tuition, scoped to the student's series. A gap prices as zero
        // and stays visible in the breakdown.
        let tuition = self
            .prices
            .resolve_price(
                PriceType::Mensalidade,
                last_day,
                PriceScope::Series(student.series_id),
            )
            .await?;
        let mensalidade = match tuition {
            Some(price) => to_money(&price.value),
            None => {
                eprintln!(
                    "no active tuition price for series {} as of {}",
                    student.series_id, last_day
                );
                BigDecimal::from(0)
            }
        };

        // 2. Contracted services: union of names across all weekdays; a
        // service without a price is excluded from the breakdown.
        let matrix = self.get_contract_matrix(for_student).await?;
        let mut servicos_contratados: Vec<ServiceLine> = Vec::new();
        for name in contracted_service_names(&matrix) {
            let resolved = self
                .prices
                .resolve_price(
                    PriceType::Servico,
                    last_day,
                    PriceScope::Service(name.clone()),
                )
                .await?;
            if let Some(price) = resolved {
                servicos_contratados.push(ServiceLine {
                    nome: name,
                    valor: to_money(&price.value),
                });
            }
        }

        // 3. Overage rate, school-wide.
        let overage = self
            .prices
            .resolve_price(PriceType::HoraExtra, last_day, PriceScope::Global)
            .await?;
        let valor_por_hora = overage
            .and_then(|price| price.value_per_hour)
            .map(|rate| to_money(&rate))
            .unwrap_or_else(|| {
                eprintln!("no active overage price as of {}", last_day);
                BigDecimal::from(0)
            });

        // 4. Recorded overage hours for the month.
        let records = self
            .get_extra_hours_between(for_student, first_day, last_day, false)
            .await?;
        let mut total_horas = BigDecimal::from(0);
        let mut detalhamento_dias = Vec::with_capacity(records.len());
        for record in &records {
            total_horas += &record.hours_calculated;
            detalhamento_dias.push(DayDetail {
                data: record.date,
                horas_extras: record.hours_calculated.to_f64().unwrap_or(0.0),
                dia_semana: record.date.weekday().num_days_from_monday() as i32,
            });
        }

        let breakdown = assemble_breakdown(
            mensalidade,
            servicos_contratados,
            &total_horas,
            valor_por_hora,
            detalhamento_dias,
        );
        Ok((breakdown, total_horas))
    }

    /// What-if comparison: re-price the month under a hypothetical contract
    /// matrix and discount set, holding the recorded overage hours fixed.
    /// Nothing is persisted.
    pub async fn simulate_contract(
        &self,
        params: SimulationParams,
    ) -> Result<SimulationResult, EscolarError> {
        let (contrato_atual, total_horas) = self
            .monthly_budget_with_hours(params.student_id, params.month, params.year)
            .await?;
        let (_, last_day) = time::month_bounds(params.month, params.year)?;
        let discounts = params.discounts.unwrap_or_default();

        // Tuition and the hourly rate resolve to the same records the
        // current pass used; only the discount scaling differs.
        let mensalidade_simulada =
            apply_discount(&contrato_atual.mensalidade, discounts.mensalidade);
        let valor_por_hora_simulado = apply_discount(
            &contrato_atual.horas_extras.valor_por_hora,
            discounts.horas_extras,
        );

        let mut servicos_simulados: Vec<ServiceLine> = Vec::new();
        for name in simulated_service_names(&params.contract_matrix) {
            let resolved = self
                .prices
                .resolve_price(
                    PriceType::Servico,
                    last_day,
                    PriceScope::Service(name.clone()),
                )
                .await?;
            if let Some(price) = resolved {
                servicos_simulados.push(ServiceLine {
                    nome: name,
                    valor: apply_discount(&price.value, discounts.servicos),
                });
            }
        }

        // The hours themselves are history, not hypothesis: the recorded
        // total carries over exactly and only gets re-priced.
        let contrato_simulado = assemble_breakdown(
            mensalidade_simulada,
            servicos_simulados,
            &total_horas,
            valor_por_hora_simulado,
            contrato_atual.detalhamento_dias.clone(),
        );

        let diferencas = breakdown_diff(&contrato_atual, &contrato_simulado);
        Ok(SimulationResult {
            contrato_atual,
            contrato_simulado,
            diferencas,
        })
    }

    /// Recorded overage per day in a date range, priced at the currently
    /// governing hourly rate.
    pub async fn extra_hours_history(
        &self,
        for_student: i32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HistoryEntry>, EscolarError> {
        let records = self
            .get_extra_hours_between(for_student, start, end, true)
            .await?;

        let overage = self
            .prices
            .resolve_price(
                PriceType::HoraExtra,
                Utc::now().date_naive(),
                PriceScope::Global,
            )
            .await?;
        let valor_por_hora = overage
            .and_then(|price| price.value_per_hour)
            .map(|rate| to_money(&rate))
            .unwrap_or_else(|| BigDecimal::from(0));

        Ok(records
            .iter()
            .map(|record| HistoryEntry {
                id: record.id,
                date: record.date,
                horas_extras: record.hours_calculated.to_f64().unwrap_or(0.0),
                valor_por_hora: valor_por_hora.clone(),
                valor: to_money(&(&record.hours_calculated * &valor_por_hora)),
                dia_semana: record.date.weekday().num_days_from_monday() as i32,
            })
            .collect())
    }

    /// Budget plus enrollment header data, as raw JSON for the report
    /// exporters. Rendering lives outside this crate.
    pub async fn export_monthly_report(
        &self,
        for_student: i32,
        month: u32,
        year: i32,
    ) -> Result<MonthlyReport, EscolarError> {
        let orcamento = self
            .calculate_monthly_budget(for_student, month, year)
            .await?;

        let pool = self.pool.clone();
        let (student, student_series, student_segment, student_class) = task::spawn_blocking(
            move || -> Result<(Student, Series, Segment, SchoolClass), EscolarError> {
                let mut conn = pool.get().map_err(EscolarError::database)?;
                let student = {
                    use crate::schema::students::dsl::*;
                    students
                        .filter(id.eq(for_student))
                        .first::<Student>(&mut conn)
                        .map_err(EscolarError::database)?
                };
                let student_series = {
                    use crate::schema::series::dsl::*;
                    series
                        .filter(id.eq(student.series_id))
                        .first::<Series>(&mut conn)
                        .map_err(EscolarError::database)?
                };
                let student_segment = {
                    use crate::schema::segments::dsl::*;
                    segments
                        .filter(id.eq(student_series.segment_id))
                        .first::<Segment>(&mut conn)
                        .map_err(EscolarError::database)?
                };
                let student_class = {
                    use crate::schema::school_classes::dsl::*;
                    school_classes
                        .filter(id.eq(student.class_id))
                        .first::<SchoolClass>(&mut conn)
                        .map_err(EscolarError::database)?
                };
                Ok((student, student_series, student_segment, student_class))
            },
        )
        .await
        .map_err(EscolarError::internal)??;

        Ok(MonthlyReport {
            aluno: ReportStudent {
                id: student.id,
                nome: student.name,
                serie: student_series.name,
                segmento: student_segment.name,
                turma: student_class.name,
            },
            periodo: ReportPeriod {
                mes: month,
                ano: year,
            },
            orcamento,
            gerado_em: Utc::now(),
        })
    }
}

// -------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn matrix_entry(day: i32, entry: &str, exit: &str, services: serde_json::Value) -> ContractMatrixEntry {
        ContractMatrixEntry {
            id: day + 1,
            student_id: 1,
            day_of_week: day,
            entry_time: entry.to_string(),
            exit_time: exit.to_string(),
            services,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn money(raw: &str) -> BigDecimal {
        raw.parse::<BigDecimal>().unwrap()
    }

    #[test]
    fn contracted_day_with_exact_times_bills_nothing() {
        let hours = extra_hours_between("08:00", "12:00", "08:00", "12:00").unwrap();
        assert_eq!(hours, 0.0);
    }

    #[test]
    fn early_arrival_plus_late_exit() {
        // 30min early + 40min late = 70min = 1.1667h, billed as 1.0h.
        let hours = extra_hours_between("08:00", "12:00", "07:30", "12:40").unwrap();
        assert_eq!(hours, 1.0);
    }

    #[test]
    fn eighty_five_minutes_bill_as_one_and_a_half() {
        // 85min = 1.4167h raw; never stored unrounded.
        let hours = extra_hours_between("08:00", "12:00", "07:00", "12:25").unwrap();
        assert_eq!(hours, 1.5);
    }

    #[test]
    fn early_and_late_are_symmetric() {
        let early = extra_hours_between("08:00", "12:00", "07:15", "12:00").unwrap();
        let late = extra_hours_between("08:00", "12:00", "08:00", "12:45").unwrap();
        assert_eq!(early, late);
    }

    #[test]
    fn late_arrival_and_early_exit_never_credit() {
        let hours = extra_hours_between("08:00", "12:00", "09:00", "11:00").unwrap();
        assert_eq!(hours, 0.0);
    }

    #[test]
    fn malformed_real_times_are_rejected() {
        assert!(extra_hours_between("08:00", "12:00", "8:00", "12:00").is_err());
    }

    #[test]
    fn quantization_matches_the_documented_formula() {
        for minutes in [0, 10, 14, 15, 16, 29, 30, 44, 45, 70, 85, 100, 135] {
            let expected = ((minutes as f64 / 60.0) * 2.0).round() / 2.0;
            assert_eq!(round_to_half_hour(minutes), expected, "minutes={}", minutes);
        }
    }

    #[test]
    fn quantized_hours_convert_to_exact_decimals() {
        assert_eq!(hours_to_decimal(0.0), money("0"));
        assert_eq!(hours_to_decimal(0.5), money("0.5"));
        assert_eq!(hours_to_decimal(1.5), money("1.5"));
        assert_eq!(hours_to_decimal(4.0), money("4"));
    }

    #[test]
    fn discount_bounds() {
        let value = money("350.00");
        assert_eq!(apply_discount(&value, None), money("350.00"));
        assert_eq!(apply_discount(&value, Some(0.0)), money("350.00"));
        assert_eq!(apply_discount(&value, Some(100.0)), money("0.00"));
        assert_eq!(apply_discount(&value, Some(10.0)), money("315.00"));
        assert_eq!(apply_discount(&value, Some(12.5)), money("306.25"));
    }

    #[test]
    fn service_union_ignores_disabled_entries() {
        let entries = vec![
            matrix_entry(0, "08:00", "12:00", json!({"almoco": true, "transporte": false})),
            matrix_entry(1, "08:00", "12:00", json!({"almoco": true, "jantar": true})),
            matrix_entry(2, "08:00", "12:00", json!({})),
        ];
        let names: Vec<String> = contracted_service_names(&entries).into_iter().collect();
        assert_eq!(names, vec!["almoco".to_string(), "jantar".to_string()]);
    }

    #[test]
    fn simulated_service_union_matches_stored_semantics() {
        let mut matrix = HashMap::new();
        matrix.insert(
            0u8,
            DaySchedule {
                entry_time: "08:00".to_string(),
                exit_time: "12:00".to_string(),
                services: HashMap::from([
                    ("almoco".to_string(), true),
                    ("transporte".to_string(), false),
                ]),
            },
        );
        matrix.insert(
            3u8,
            DaySchedule {
                entry_time: "08:00".to_string(),
                exit_time: "17:00".to_string(),
                services: HashMap::from([("jantar".to_string(), true)]),
            },
        );
        let names: Vec<String> = simulated_service_names(&matrix).into_iter().collect();
        assert_eq!(names, vec!["almoco".to_string(), "jantar".to_string()]);
    }

    #[test]
    fn breakdown_totals_are_additive() {
        let breakdown = assemble_breakdown(
            money("850.00"),
            vec![
                ServiceLine { nome: "almoco".to_string(), valor: money("180.00") },
                ServiceLine { nome: "transporte".to_string(), valor: money("120.50") },
            ],
            &money("3.5"),
            money("25.00"),
            Vec::new(),
        );
        assert_eq!(breakdown.horas_extras.subtotal, money("87.50"));
        assert_eq!(breakdown.horas_extras.total_horas, 3.5);
        assert_eq!(
            breakdown.total_geral,
            &breakdown.mensalidade
                + money("180.00")
                + money("120.50")
                + &breakdown.horas_extras.subtotal
        );
        assert_eq!(breakdown.total_geral, money("1238.00"));
    }

    #[test]
    fn missing_prices_degrade_to_zero_components() {
        let breakdown = assemble_breakdown(
            BigDecimal::from(0),
            Vec::new(),
            &money("2.0"),
            BigDecimal::from(0),
            Vec::new(),
        );
        assert_eq!(breakdown.total_geral, money("0.00"));
        assert_eq!(breakdown.horas_extras.total_horas, 2.0);
    }

    #[test]
    fn rate_change_keeps_hours_fixed() {
        let hours = money("4.5");
        let current = assemble_breakdown(
            money("850.00"),
            Vec::new(),
            &hours,
            money("25.00"),
            Vec::new(),
        );
        let simulated = assemble_breakdown(
            money("850.00"),
            Vec::new(),
            &hours,
            apply_discount(&money("25.00"), Some(20.0)),
            Vec::new(),
        );
        assert_eq!(
            current.horas_extras.total_horas,
            simulated.horas_extras.total_horas
        );
        assert_eq!(simulated.horas_extras.subtotal, money("90.00"));
    }

    #[test]
    fn legacy_fractional_hour_totals_survive_repricing() {
        // Old rows can hold totals off the half-hour grid (e.g. 1.42h).
        // Re-pricing must carry them through exactly, never re-quantize.
        let hours = money("1.42");
        let current = assemble_breakdown(
            money("850.00"),
            Vec::new(),
            &hours,
            money("25.00"),
            Vec::new(),
        );
        let simulated = assemble_breakdown(
            money("850.00"),
            Vec::new(),
            &hours,
            apply_discount(&money("25.00"), Some(20.0)),
            Vec::new(),
        );
        assert_eq!(current.horas_extras.total_horas, 1.42);
        assert_eq!(
            simulated.horas_extras.total_horas,
            current.horas_extras.total_horas
        );
        assert_eq!(simulated.horas_extras.subtotal, money("28.40"));
    }

    #[test]
    fn recomputation_is_deterministic() {
        let first = extra_hours_between("08:00", "12:00", "07:30", "12:40").unwrap();
        let second = extra_hours_between("08:00", "12:00", "07:30", "12:40").unwrap();
        assert_eq!(first, second);
        assert_eq!(hours_to_decimal(first), hours_to_decimal(second));
    }

    #[test]
    fn diff_is_field_wise_simulated_minus_current() {
        let current = assemble_breakdown(
            money("850.00"),
            vec![ServiceLine { nome: "almoco".to_string(), valor: money("180.00") }],
            &money("2.0"),
            money("25.00"),
            Vec::new(),
        );
        let simulated = assemble_breakdown(
            money("765.00"),
            vec![ServiceLine { nome: "almoco".to_string(), valor: money("162.00") }],
            &money("2.0"),
            money("20.00"),
            Vec::new(),
        );
        let diff = breakdown_diff(&current, &simulated);
        assert_eq!(diff.mensalidade, money("-85.00"));
        assert_eq!(diff.servicos_contratados, money("-18.00"));
        assert_eq!(diff.horas_extras, money("-10.00"));
        assert_eq!(diff.total_geral, money("-113.00"));
    }
}
