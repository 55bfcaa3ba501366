//! Gap computation for incremental syncs.

use chrono::NaiveDate;

use crate::fetch::DateWindow;
use crate::models::LotteryDraw;

/// What an incremental sync needs to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPlan {
    /// Nothing can be missing: the next candidate date is after `today`.
    UpToDate {
        /// Date of the latest stored draw, if any
        latest: Option<NaiveDate>,
    },
    /// Fetch every draw dated within the window.
    Fetch(DateWindow),
}

/// Determines the date gap between the latest stored draw and `today`.
///
/// The gap starts the day after `latest` (or at `bootstrap` for an empty
/// store) and ends at `today`, both inclusive. Draws happen at most once a
/// day, so starting the day after the latest draw cannot miss one.
pub fn plan_sync(latest: Option<&LotteryDraw>, today: NaiveDate, bootstrap: NaiveDate) -> SyncPlan {
    let latest_date = latest.map(|d| d.date);
    let start = match latest_date {
        Some(date) => match date.succ_opt() {
            Some(next) => next,
            None => return SyncPlan::UpToDate { latest: latest_date },
        },
        None => bootstrap,
    };

    if start > today {
        SyncPlan::UpToDate {
            latest: latest_date,
        }
    } else {
        SyncPlan::Fetch(DateWindow { start, end: today })
    }
}
