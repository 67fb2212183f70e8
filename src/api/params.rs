//! Query parameters for the paginated endpoints

use crate::models::{format_iso, GroupBy, Timestamp};
use crate::types::QueryParams;

fn push_flag(params: &mut QueryParams, key: &str, value: Option<bool>) {
    if let Some(value) = value {
        params.push((key.to_string(), value.to_string()));
    }
}

fn push_time(params: &mut QueryParams, key: &str, value: Option<&Timestamp>) {
    if let Some(value) = value {
        params.push((key.to_string(), format_iso(value)));
    }
}

// ============================================================================
// Products
// ============================================================================

/// Filters for the product listing.
///
/// Unset filters are not sent, except `is_business`, which is sent as
/// `false` unless set so business products stay out of the default listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    pub is_variable: Option<bool>,
    pub is_green: Option<bool>,
    pub is_tracker: Option<bool>,
    pub is_prepay: Option<bool>,
    pub is_business: Option<bool>,
    /// Show products available at this time (server default: now)
    pub available_at: Option<Timestamp>,
    /// Overrides the client's default page size
    pub page_size: Option<u32>,
}

impl ProductQuery {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn variable(mut self, value: bool) -> Self {
        self.is_variable = Some(value);
        self
    }

    #[must_use]
    pub fn green(mut self, value: bool) -> Self {
        self.is_green = Some(value);
        self
    }

    #[must_use]
    pub fn tracker(mut self, value: bool) -> Self {
        self.is_tracker = Some(value);
        self
    }

    #[must_use]
    pub fn prepay(mut self, value: bool) -> Self {
        self.is_prepay = Some(value);
        self
    }

    #[must_use]
    pub fn business(mut self, value: bool) -> Self {
        self.is_business = Some(value);
        self
    }

    #[must_use]
    pub fn available_at(mut self, at: Timestamp) -> Self {
        self.available_at = Some(at);
        self
    }

    #[must_use]
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Fixed query parameters, in a stable order
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        push_flag(&mut params, "is_variable", self.is_variable);
        push_flag(&mut params, "is_green", self.is_green);
        push_flag(&mut params, "is_tracker", self.is_tracker);
        push_flag(&mut params, "is_prepay", self.is_prepay);
        push_flag(&mut params, "is_business", Some(self.is_business.unwrap_or(false)));
        push_time(&mut params, "available_at", self.available_at.as_ref());
        params
    }
}

// ============================================================================
// Tariff charges
// ============================================================================

/// Time window for tariff charges
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateQuery {
    pub period_from: Option<Timestamp>,
    /// Requires `period_from`
    pub period_to: Option<Timestamp>,
    pub page_size: Option<u32>,
}

impl RateQuery {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn period_from(mut self, from: Timestamp) -> Self {
        self.period_from = Some(from);
        self
    }

    #[must_use]
    pub fn period_to(mut self, to: Timestamp) -> Self {
        self.period_to = Some(to);
        self
    }

    #[must_use]
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        push_time(&mut params, "period_from", self.period_from.as_ref());
        push_time(&mut params, "period_to", self.period_to.as_ref());
        params
    }
}

// ============================================================================
// Consumption
// ============================================================================

/// Window, ordering and aggregation for consumption readings.
///
/// Readings are returned newest first unless `reverse` is set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsumptionQuery {
    pub period_from: Option<Timestamp>,
    /// Requires `period_from`
    pub period_to: Option<Timestamp>,
    pub page_size: Option<u32>,
    /// Oldest readings first
    pub reverse: bool,
    pub group_by: Option<GroupBy>,
}

impl ConsumptionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn period_from(mut self, from: Timestamp) -> Self {
        self.period_from = Some(from);
        self
    }

    #[must_use]
    pub fn period_to(mut self, to: Timestamp) -> Self {
        self.period_to = Some(to);
        self
    }

    #[must_use]
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    #[must_use]
    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    #[must_use]
    pub fn group_by(mut self, group_by: GroupBy) -> Self {
        self.group_by = Some(group_by);
        self
    }

    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        push_time(&mut params, "period_from", self.period_from.as_ref());
        push_time(&mut params, "period_to", self.period_to.as_ref());
        if self.reverse {
            params.push(("order_by".to_string(), "period".to_string()));
        }
        if let Some(group_by) = self.group_by {
            params.push(("group_by".to_string(), group_by.as_str().to_string()));
        }
        params
    }
}
