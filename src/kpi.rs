//! Sales-KPI aggregation over the customer collection.
//!
//! Pure functions: a slice of customers in, derived metrics out. No storage
//! access and no side effects, so the dashboard can recompute on demand from
//! whatever slice the period filter produced. Every rate guards the
//! zero-denominator case and yields `0`, never NaN.
//!
//! Closing convention: a customer counts as closed when the contract
//! milestone is checked. The instant-close, loan, trade-in, and
//! option-attach figures are computed over closed customers only; the LINE
//! exchange rate is over the whole group.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::types::{Customer, PaymentMethod};

/// Average month length used for pro-rating monthly targets.
const AVERAGE_DAYS_PER_MONTH: f64 = 30.44;

/// Label used for the company-wide KPI row.
pub const COMPANY_LABEL: &str = "company";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesKpi {
    pub sales_rep: String,
    pub deal_count: u32,
    pub close_count: u32,
    /// Percentage of deals closed.
    pub close_rate: f64,
    /// Sum of closed customers' sales prices, in yen.
    pub sales: i64,
    pub instant_close_rate: f64,
    pub loan_rate: f64,
    pub trade_in_rate: f64,
    /// Average option line-items per closed deal (a count, not a percent).
    pub option_attach_rate: f64,
    pub line_exchange_rate: f64,
}

/// One bucket of the period trend charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodKpi {
    /// `YYYY-MM`, ISO `YYYY-Www`, or `YYYY-MM-DD` depending on the bucketing.
    pub period: String,
    #[serde(flatten)]
    pub kpi: SalesKpi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Reporting period, resolved against an explicit reference date so the
/// dashboard (and tests) control what "this month" means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    ThisMonth,
    LastMonth,
    Custom(DateRange),
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn month_range(year: i32, month: u32) -> DateRange {
    let start = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN);
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(NaiveDate::MAX);
    DateRange { start, end }
}

/// Resolve a period to inclusive calendar bounds.
pub fn period_bounds(period: Period, reference: NaiveDate) -> DateRange {
    match period {
        Period::ThisMonth => month_range(reference.year(), reference.month()),
        Period::LastMonth => {
            let (year, month) = if reference.month() == 1 {
                (reference.year() - 1, 12)
            } else {
                (reference.year(), reference.month() - 1)
            };
            month_range(year, month)
        }
        Period::Custom(range) => range,
    }
}

/// Keep customers whose `addedDate` falls inside the period, boundaries
/// inclusive. Records with an unparseable date are skipped with a warning.
pub fn filter_by_period(
    customers: &[Customer],
    period: Period,
    reference: NaiveDate,
) -> Vec<Customer> {
    let range = period_bounds(period, reference);
    customers
        .iter()
        .filter(|customer| match parse_date(&customer.added_date) {
            Some(added) => added >= range.start && added <= range.end,
            None => {
                log::warn!(
                    "customer {} has unparseable addedDate '{}'; excluded from period filter",
                    customer.id,
                    customer.added_date
                );
                false
            }
        })
        .cloned()
        .collect()
}

fn rate(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Compute the KPI set for one group of customers.
pub fn calculate_kpis(customers: &[Customer], sales_rep: &str) -> SalesKpi {
    let deal_count = customers.len();

    let closed: Vec<&Customer> = customers
        .iter()
        .filter(|c| c.deal_info.statuses.contract.checked)
        .collect();
    let close_count = closed.len();

    let sales: i64 = closed.iter().map(|c| c.deal_info.sales_price).sum();

    let instant_close_count = closed.iter().filter(|c| c.deal_info.is_instant_close).count();
    let loan_count = closed
        .iter()
        .filter(|c| c.deal_info.payment_method == PaymentMethod::Loan)
        .count();
    let trade_in_count = closed.iter().filter(|c| c.deal_info.has_trade_in).count();

    let total_options: usize = closed.iter().map(|c| c.deal_info.options.len()).sum();
    let option_attach_rate = if close_count == 0 {
        0.0
    } else {
        total_options as f64 / close_count as f64
    };

    let line_exchange_count = customers
        .iter()
        .filter(|c| c.deal_info.statuses.line_contact.checked)
        .count();

    SalesKpi {
        sales_rep: sales_rep.to_string(),
        deal_count: deal_count as u32,
        close_count: close_count as u32,
        close_rate: rate(close_count, deal_count),
        sales,
        instant_close_rate: rate(instant_close_count, close_count),
        loan_rate: rate(loan_count, close_count),
        trade_in_rate: rate(trade_in_count, close_count),
        option_attach_rate,
        line_exchange_rate: rate(line_exchange_count, deal_count),
    }
}

/// KPI set for a single sales rep's customers.
pub fn kpis_by_sales_rep(customers: &[Customer], sales_rep: &str) -> SalesKpi {
    let rep_customers: Vec<Customer> = customers
        .iter()
        .filter(|c| c.sales_rep == sales_rep)
        .cloned()
        .collect();
    calculate_kpis(&rep_customers, sales_rep)
}

/// Company-wide KPI row.
pub fn company_kpis(customers: &[Customer]) -> SalesKpi {
    calculate_kpis(customers, COMPANY_LABEL)
}

/// Distinct sales reps with at least one customer, sorted.
pub fn sales_reps(customers: &[Customer]) -> Vec<String> {
    customers
        .iter()
        .map(|c| c.sales_rep.clone())
        .filter(|rep| !rep.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// One KPI row per sales rep, in rep order.
pub fn all_sales_reps_kpis(customers: &[Customer]) -> Vec<SalesKpi> {
    sales_reps(customers)
        .into_iter()
        .map(|rep| kpis_by_sales_rep(customers, &rep))
        .collect()
}

fn bucket_kpis<K>(customers: &[Customer], sales_rep: Option<&str>, key: K) -> Vec<PeriodKpi>
where
    K: Fn(NaiveDate) -> String,
{
    let mut groups: std::collections::BTreeMap<String, Vec<Customer>> =
        std::collections::BTreeMap::new();

    for customer in customers {
        if let Some(rep) = sales_rep {
            if customer.sales_rep != rep {
                continue;
            }
        }
        match parse_date(&customer.added_date) {
            Some(added) => groups.entry(key(added)).or_default().push(customer.clone()),
            None => {
                log::warn!(
                    "customer {} has unparseable addedDate '{}'; excluded from trend buckets",
                    customer.id,
                    customer.added_date
                );
            }
        }
    }

    // BTreeMap iteration gives the buckets ascending by period key.
    groups
        .into_iter()
        .map(|(period, group)| PeriodKpi {
            period,
            kpi: calculate_kpis(&group, ""),
        })
        .collect()
}

/// KPI buckets by calendar month (`YYYY-MM`).
pub fn monthly_kpis(customers: &[Customer], sales_rep: Option<&str>) -> Vec<PeriodKpi> {
    bucket_kpis(customers, sales_rep, |d| {
        format!("{:04}-{:02}", d.year(), d.month())
    })
}

/// KPI buckets by ISO week (`YYYY-Www`).
pub fn weekly_kpis(customers: &[Customer], sales_rep: Option<&str>) -> Vec<PeriodKpi> {
    bucket_kpis(customers, sales_rep, |d| {
        let week = d.iso_week();
        format!("{:04}-W{:02}", week.year(), week.week())
    })
}

/// KPI buckets by exact day (`YYYY-MM-DD`).
pub fn daily_kpis(customers: &[Customer], sales_rep: Option<&str>) -> Vec<PeriodKpi> {
    bucket_kpis(customers, sales_rep, |d| d.format("%Y-%m-%d").to_string())
}

/// Pro-rate a monthly unit target over the period length.
pub fn target_units(monthly_target: u32, period: Period, reference: NaiveDate) -> u32 {
    let range = period_bounds(period, reference);
    let days = (range.end - range.start).num_days() + 1;
    if days <= 0 {
        return 0;
    }
    ((monthly_target as f64 / AVERAGE_DAYS_PER_MONTH) * days as f64).round() as u32
}
