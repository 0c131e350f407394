//! Figures derived client-side from listing responses.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::collections::HashSet;
use vayuhu_shared::models::listings::{
    BlogPost, RevenuePoint, Reservation, VisitorRecord, WorkspaceBooking,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReservationStats {
    /// Booked within the last seven days.
    pub new: usize,
    /// Every reservation on record.
    pub ongoing: usize,
    /// Reserved date already in the past.
    pub completed: usize,
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .ok()
        .or_else(|| parse_date(raw).and_then(|d| d.and_hms_opt(0, 0, 0)))
}

pub fn reservation_stats(rows: &[Reservation], now: NaiveDateTime) -> ReservationStats {
    let week_ago = now - Duration::days(7);
    let today = now.date();

    let new = rows
        .iter()
        .filter_map(|r| r.booked_on.as_deref().and_then(parse_timestamp))
        .filter(|booked| *booked >= week_ago)
        .count();
    let completed = rows
        .iter()
        .filter_map(|r| r.date.as_deref().and_then(parse_date))
        .filter(|date| *date < today)
        .count();

    ReservationStats {
        new,
        ongoing: rows.len(),
        completed,
    }
}

fn contains_ci(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|value| value.to_lowercase().contains(needle))
}

/// Reservations whose name, mobile, space, space code or seat codes contain `term`.
pub fn search_reservations<'a>(rows: &'a [Reservation], term: &str) -> Vec<&'a Reservation> {
    let needle = term.to_lowercase();
    rows.iter()
        .filter(|r| {
            contains_ci(r.name.as_deref(), &needle)
                || contains_ci(r.mobile_no.as_deref(), &needle)
                || contains_ci(r.space.as_deref(), &needle)
                || contains_ci(r.space_code.as_deref(), &needle)
                || contains_ci(r.seat_codes.as_deref(), &needle)
        })
        .collect()
}

/// Case-insensitive substring match over a visitor's searchable fields.
pub fn search_visitors<'a>(rows: &'a [VisitorRecord], term: &str) -> Vec<&'a VisitorRecord> {
    let needle = term.to_lowercase();
    rows.iter()
        .filter(|v| {
            [
                &v.name,
                &v.contact,
                &v.email,
                &v.company_name,
                &v.reason,
                &v.payment_id,
                &v.workspace,
            ]
            .into_iter()
            .any(|field| contains_ci(field.as_deref(), &needle))
        })
        .collect()
}

/// Bookings starting on `today`.
pub fn todays_bookings(rows: &[WorkspaceBooking], today: NaiveDate) -> Vec<&WorkspaceBooking> {
    rows.iter()
        .filter(|b| b.start_date.as_deref().and_then(parse_date) == Some(today))
        .collect()
}

/// Distinct users behind the visitors. Admin walk-ins have no user and are not counted.
pub fn unique_visitor_users(rows: &[VisitorRecord]) -> usize {
    rows.iter()
        .filter_map(|v| v.user_id)
        .collect::<HashSet<_>>()
        .len()
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RevenueSeries {
    pub categories: Vec<String>,
    pub totals: Vec<Decimal>,
}

pub fn revenue_series(points: &[RevenuePoint]) -> RevenueSeries {
    RevenueSeries {
        categories: points.iter().map(|p| p.month.clone()).collect(),
        totals: points.iter().map(|p| p.total_revenue).collect(),
    }
}

/// Blogs marked active, ignoring case.
pub fn active_blogs(posts: Vec<BlogPost>) -> Vec<BlogPost> {
    posts
        .into_iter()
        .filter(|p| {
            p.status
                .as_deref()
                .is_some_and(|s| s.eq_ignore_ascii_case("active"))
        })
        .collect()
}

#[derive(Debug, PartialEq)]
pub struct Page<'a, T> {
    pub rows: &'a [T],
    /// 1-based, clamped into range.
    pub number: usize,
    pub total_pages: usize,
    pub total: usize,
    /// Page size after clamping to at least 1.
    pub per_page: usize,
}

impl<T> Page<'_, T> {
    /// 1-based index of the first row shown, 0 when empty.
    pub fn first(&self) -> usize {
        if self.rows.is_empty() {
            0
        } else {
            (self.number - 1) * self.per_page + 1
        }
    }

    /// 1-based index of the last row shown, 0 when empty.
    pub fn last(&self) -> usize {
        if self.rows.is_empty() {
            0
        } else {
            self.first() + self.rows.len() - 1
        }
    }
}

pub fn page<T>(rows: &[T], number: usize, per_page: usize) -> Page<'_, T> {
    let per_page = per_page.max(1);
    let total_pages = rows.len().div_ceil(per_page).max(1);
    let number = number.clamp(1, total_pages);
    let start = (number - 1) * per_page;
    let end = (start + per_page).min(rows.len());

    Page {
        rows: &rows[start.min(rows.len())..end],
        number,
        total_pages,
        total: rows.len(),
        per_page,
    }
}
