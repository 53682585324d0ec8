//! Dashboard summary statistics.
//!
//! Everything is derived from the full service and client lists on every call;
//! nothing is cached or maintained incrementally. All passes are linear except the
//! renewal sort, which only sees the filtered subset.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::dates;
use crate::types::{ClientRecord, ServiceKind, ServiceRecord};

/// How far ahead a renewal still counts as upcoming.
pub const RENEWAL_WINDOW_MONTHS: u32 = 3;
pub const MAX_UPCOMING_RENEWALS: usize = 5;
pub const MAX_RECENT_CLIENTS: usize = 3;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_services: usize,
    pub active_services: usize,
    pub total_domains: usize,
    pub active_domains: usize,
    pub total_clients: usize,
    pub total_revenue: Decimal,
    pub monthly_revenue: Decimal,
    /// `monthly_revenue / total_revenue * 100`, unrounded; zero when there is no revenue.
    pub renewal_rate: Decimal,
    pub upcoming_renewals: Vec<ServiceRecord>,
    pub recent_clients: Vec<ClientRecord>,
}

impl Overview {
    pub fn compute(services: &[ServiceRecord], clients: &[ClientRecord], today: NaiveDate) -> Self {
        let mut overview = Overview {
            total_services: services.len(),
            total_clients: clients.len(),
            ..Default::default()
        };

        for s in services {
            let is_domain = s.kind == ServiceKind::Domain;
            if s.is_active() {
                overview.active_services += 1;
                if is_domain {
                    overview.active_domains += 1;
                }
            }
            if is_domain {
                overview.total_domains += 1;
            }
            overview.total_revenue += s.purchase_price;
            overview.monthly_revenue += s.renewal_price;
        }

        overview.renewal_rate = renewal_rate(overview.monthly_revenue, overview.total_revenue);
        overview.upcoming_renewals = upcoming_renewals(services, today);
        overview.recent_clients = recent_clients(clients);
        overview
    }

    /// Renewal rate formatted for display with one decimal, e.g. `93.3%`.
    pub fn renewal_rate_display(&self) -> String {
        format!("{:.1}%", self.renewal_rate.round_dp(1))
    }
}

pub fn renewal_rate(monthly: Decimal, total: Decimal) -> Decimal {
    if total <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    monthly
        .checked_div(total)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

/// Active services renewing within `[today, today + 3 months]`, soonest first, at most five.
pub fn upcoming_renewals(services: &[ServiceRecord], today: NaiveDate) -> Vec<ServiceRecord> {
    let horizon = dates::add_months(today, RENEWAL_WINDOW_MONTHS);
    let mut due: Vec<(NaiveDate, &ServiceRecord)> = services
        .iter()
        .filter(|s| s.is_active())
        .filter_map(|s| s.effective_renewal().map(|d| (d, s)))
        .filter(|(d, _)| *d >= today && *d <= horizon)
        .collect();
    due.sort_by_key(|(d, _)| *d);
    due.into_iter()
        .take(MAX_UPCOMING_RENEWALS)
        .map(|(_, s)| s.clone())
        .collect()
}

/// The last three clients in the list, newest first.
pub fn recent_clients(clients: &[ClientRecord]) -> Vec<ClientRecord> {
    clients.iter().rev().take(MAX_RECENT_CLIENTS).cloned().collect()
}
