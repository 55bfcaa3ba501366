//! Turns a fetched batch of notices into the draws to upsert.

use std::collections::HashMap;

use log::{debug, warn};
use serde_json::Value;

use crate::error_handling::{SkipReason, SyncStats};
use crate::fetch::DateWindow;
use serde::Deserialize;

use crate::models::{normalize_notice, DrawNotice, LotteryDraw};

/// Decodes and normalizes raw `notices`, drops those dated outside `window`
/// (if any) and de-duplicates by issue code.
///
/// When a code appears more than once the later notice wins but keeps the
/// position of the first. Every dropped notice is counted in `stats`.
pub fn prepare_draws(
    notices: &[Value],
    window: Option<&DateWindow>,
    stats: &SyncStats,
) -> Vec<LotteryDraw> {
    let mut draws: Vec<LotteryDraw> = Vec::with_capacity(notices.len());
    let mut positions: HashMap<String, usize> = HashMap::new();

    for raw in notices {
        let notice = match DrawNotice::deserialize(raw) {
            Ok(notice) => notice,
            Err(e) => {
                let code = raw.get("code").map(Value::to_string).unwrap_or_default();
                warn!("Skipping malformed notice {}: {}", code, e);
                stats.increment(SkipReason::MalformedNotice);
                continue;
            }
        };

        let draw = match normalize_notice(&notice) {
            Ok(draw) => draw,
            Err(e) => {
                warn!("Skipping notice: {}", e);
                stats.increment(SkipReason::from(&e));
                continue;
            }
        };

        if let Some(window) = window {
            if !window.contains(draw.date) {
                debug!(
                    "Skipping issue {} dated {} outside {}",
                    draw.code, draw.date, window
                );
                stats.increment(SkipReason::OutsideWindow);
                continue;
            }
        }

        match positions.get(&draw.code) {
            Some(&index) => {
                debug!("Issue {} repeated in batch, keeping the later copy", draw.code);
                stats.increment(SkipReason::DuplicateCode);
                draws[index] = draw;
            }
            None => {
                positions.insert(draw.code.clone(), draws.len());
                draws.push(draw);
            }
        }
    }

    draws
}
