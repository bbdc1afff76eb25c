//! Analytics service
//!
//! Every report works on the visits of one inclusive date range. The
//! repository loads that set and the aggregations below run in-process.

use chrono::{DateTime, Datelike, Local, NaiveDate};
use indexmap::{IndexMap, IndexSet};
use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::visit::{RangeQuery, Visit},
    repository::Repository,
};

/// Number of services listed on an employee detail card
const EMPLOYEE_TOP_SERVICES: usize = 5;

/// Inclusive local calendar date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    /// Resolve query parameters against `today`, defaulting to month-to-date
    pub fn resolve(query: &RangeQuery, today: NaiveDate) -> AppResult<Self> {
        let from = match non_blank(&query.from) {
            Some(s) => parse_local_date(s)
                .ok_or_else(|| AppError::Validation(format!("Invalid from date: {}", s)))?,
            None => today.with_day(1).unwrap_or(today),
        };
        let to = match non_blank(&query.to) {
            Some(s) => parse_local_date(s)
                .ok_or_else(|| AppError::Validation(format!("Invalid to date: {}", s)))?,
            None => today,
        };
        if from > to {
            return Err(AppError::Validation(format!(
                "from ({}) must not be after to ({})",
                from, to
            )));
        }
        Ok(Self { from, to })
    }

    /// Resolve against the current local date
    pub fn from_query(query: &RangeQuery) -> AppResult<Self> {
        Self::resolve(query, Local::now().date_naive())
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Parse `YYYY-MM-DD` as a local calendar date, or reduce an RFC 3339
/// timestamp to its local date
pub fn parse_local_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(value)
            .ok()
            .map(|dt| dt.with_timezone(&Local).date_naive())
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Summary {
    pub total_revenue: Decimal,
    pub total_visits: i64,
    pub unique_customers: i64,
    /// Revenue per visit, rounded to the nearest rupee
    pub avg_ticket: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ServiceStat {
    pub name: String,
    pub count: i64,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EmployeeStat {
    pub rank: usize,
    pub name: String,
    pub visits: i64,
    pub unique_customers: i64,
    pub revenue: Decimal,
    /// Hours worked, one decimal
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EmployeeDetail {
    pub name: String,
    /// Position by revenue among all artists in range, 0 when the artist has no visits
    pub rank: usize,
    pub visits: i64,
    pub unique_customers: i64,
    pub revenue: Decimal,
    pub hours: f64,
    pub top_services: Vec<ServiceStat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RepeatCustomer {
    pub contact: String,
    pub name: String,
    pub visits: i64,
    pub total_spent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RepeatCustomers {
    pub total_customers: i64,
    pub new_customers: i64,
    pub repeat_customers: i64,
    /// Percentage, one decimal
    pub repeat_rate: f64,
    pub customers: Vec<RepeatCustomer>,
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn minutes_to_hours(minutes: i64) -> f64 {
    round_one_decimal(minutes as f64 / 60.0)
}

pub fn summary(visits: &[Visit]) -> Summary {
    let total_revenue: Decimal = visits.iter().map(|v| v.final_total).sum();
    let total_visits = visits.len() as i64;
    let unique_customers = visits
        .iter()
        .map(|v| v.contact.as_str())
        .collect::<IndexSet<_>>()
        .len() as i64;
    let avg_ticket = if total_visits == 0 {
        0
    } else {
        (total_revenue / Decimal::from(total_visits))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .unwrap_or(0)
    };

    Summary {
        total_revenue,
        total_visits,
        unique_customers,
        avg_ticket,
    }
}

/// Booking count and revenue per service name, most booked first.
/// Ties keep first-seen order.
pub fn top_services(visits: &[Visit]) -> Vec<ServiceStat> {
    let mut by_name: IndexMap<&str, (i64, Decimal)> = IndexMap::new();
    for line in visits.iter().flat_map(|v| v.services.iter()) {
        let entry = by_name.entry(line.name.as_str()).or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 += line.price;
    }

    let mut stats: Vec<ServiceStat> = by_name
        .into_iter()
        .map(|(name, (count, revenue))| ServiceStat {
            name: name.to_string(),
            count,
            revenue,
        })
        .collect();
    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats
}

#[derive(Default)]
struct EmployeeAccumulator<'a> {
    visits: i64,
    customers: IndexSet<&'a str>,
    revenue: Decimal,
    minutes: i64,
}

/// Per-artist stats ranked 1..N by revenue, highest first.
/// Ties keep first-seen order.
pub fn employee_leaderboard(visits: &[Visit]) -> Vec<EmployeeStat> {
    let mut by_artist: IndexMap<&str, EmployeeAccumulator<'_>> = IndexMap::new();
    for visit in visits {
        let acc = by_artist.entry(visit.artist.as_str()).or_default();
        acc.visits += 1;
        acc.customers.insert(visit.contact.as_str());
        acc.revenue += visit.final_total;
        acc.minutes += visit.worked_minutes();
    }

    let mut stats: Vec<EmployeeStat> = by_artist
        .into_iter()
        .map(|(name, acc)| EmployeeStat {
            rank: 0,
            name: name.to_string(),
            visits: acc.visits,
            unique_customers: acc.customers.len() as i64,
            revenue: acc.revenue,
            hours: minutes_to_hours(acc.minutes),
        })
        .collect();
    stats.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    for (index, stat) in stats.iter_mut().enumerate() {
        stat.rank = index + 1;
    }
    stats
}

/// Stats for one artist. An artist without visits yields an all-zero record.
pub fn employee_detail(visits: &[Visit], name: &str) -> EmployeeDetail {
    let rank = employee_leaderboard(visits)
        .into_iter()
        .find(|stat| stat.name == name)
        .map(|stat| stat.rank)
        .unwrap_or(0);

    let own: Vec<Visit> = visits.iter().filter(|v| v.artist == name).cloned().collect();
    let revenue: Decimal = own.iter().map(|v| v.final_total).sum();
    let minutes: i64 = own.iter().map(Visit::worked_minutes).sum();
    let unique_customers = own
        .iter()
        .map(|v| v.contact.as_str())
        .collect::<IndexSet<_>>()
        .len() as i64;

    let mut services = top_services(&own);
    services.truncate(EMPLOYEE_TOP_SERVICES);

    EmployeeDetail {
        name: name.to_string(),
        rank,
        visits: own.len() as i64,
        unique_customers,
        revenue,
        hours: minutes_to_hours(minutes),
        top_services: services,
    }
}

/// New (one visit) versus repeat (more than one) customers, keyed by contact
pub fn repeat_customers(visits: &[Visit]) -> RepeatCustomers {
    let mut by_contact: IndexMap<&str, RepeatCustomer> = IndexMap::new();
    for visit in visits {
        let customer = by_contact
            .entry(visit.contact.as_str())
            .or_insert_with(|| RepeatCustomer {
                contact: visit.contact.clone(),
                name: visit.client_name.clone(),
                visits: 0,
                total_spent: Decimal::ZERO,
            });
        customer.visits += 1;
        customer.total_spent += visit.final_total;
    }

    let total_customers = by_contact.len() as i64;
    let mut customers: Vec<RepeatCustomer> = by_contact
        .into_values()
        .filter(|c| c.visits > 1)
        .collect();
    customers.sort_by(|a, b| b.visits.cmp(&a.visits));

    let repeat = customers.len() as i64;
    let repeat_rate = if total_customers == 0 {
        0.0
    } else {
        round_one_decimal(repeat as f64 / total_customers as f64 * 100.0)
    };

    RepeatCustomers {
        total_customers,
        new_customers: total_customers - repeat,
        repeat_customers: repeat,
        repeat_rate,
        customers,
    }
}

#[derive(Clone)]
pub struct AnalyticsService {
    repository: Repository,
}

impl AnalyticsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    async fn load(&self, range: DateRange) -> AppResult<Vec<Visit>> {
        let visits = self.repository.visits.list_in_range(range.from, range.to).await?;
        tracing::debug!("Loaded {} visits for {} .. {}", visits.len(), range.from, range.to);
        Ok(visits)
    }

    pub async fn summary(&self, range: DateRange) -> AppResult<Summary> {
        Ok(summary(&self.load(range).await?))
    }

    pub async fn top_services(&self, range: DateRange) -> AppResult<Vec<ServiceStat>> {
        Ok(top_services(&self.load(range).await?))
    }

    pub async fn employees(&self, range: DateRange) -> AppResult<Vec<EmployeeStat>> {
        Ok(employee_leaderboard(&self.load(range).await?))
    }

    pub async fn employee(&self, range: DateRange, name: &str) -> AppResult<EmployeeDetail> {
        Ok(employee_detail(&self.load(range).await?, name))
    }

    pub async fn repeat_customers(&self, range: DateRange) -> AppResult<RepeatCustomers> {
        Ok(repeat_customers(&self.load(range).await?))
    }

    /// Visits in range, for export
    pub async fn visits(&self, range: DateRange) -> AppResult<Vec<Visit>> {
        self.load(range).await
    }
}
