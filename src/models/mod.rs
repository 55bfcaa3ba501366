//! Draw data models.
//!
//! - [`DrawNotice`] / [`PrizeGrade`]: the JSON shape published by the data source
//! - [`LotteryDraw`]: the normalized row kept in the database
//! - [`normalize_notice`]: the mapping between the two

mod draw;
mod normalize;
mod notice;

pub use draw::{format_thousands, LotteryDraw};
pub use normalize::{normalize_notice, parse_draw_date};
pub use notice::{DrawNotice, PrizeGrade};
pub(crate) use notice::{lenient_i64, lenient_string, lenient_vec};
