//! HTTP client for the draw-notice endpoint.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use log::{debug, info, warn};
use reqwest::{StatusCode, Url};
use serde_json::Value;
use tokio::sync::OnceCell;

use super::request::{apply_notice_headers, NoticeQuery};
use super::response::NoticePage;
use super::window::{year_windows, DateWindow};
use super::DrawSource;
use crate::config::{Config, DRAW_NOTICE_PATH, HOME_PATH, MAX_PAGES_PER_WINDOW};
use crate::error_handling::FetchError;

/// Fetches draw notices from the data source.
///
/// The underlying `reqwest::Client` must have a cookie store enabled (see
/// [`crate::initialization::init_client`]): the first fetch visits the home
/// page once so the server can set its session cookie, and every later
/// request in this client's lifetime reuses that session.
pub struct DrawNoticeClient {
    http: Arc<reqwest::Client>,
    home_url: Url,
    notice_url: Url,
    lottery: String,
    page_size: u32,
    window_pause: Duration,
    session: OnceCell<()>,
}

impl DrawNoticeClient {
    /// Creates a client for the data source described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidBaseUrl` if `config.base_url` is not a valid URL.
    pub fn new(http: Arc<reqwest::Client>, config: &Config) -> Result<Self, FetchError> {
        let base = Url::parse(&config.base_url)?;
        Ok(Self {
            http,
            home_url: base.join(HOME_PATH)?,
            notice_url: base.join(DRAW_NOTICE_PATH)?,
            lottery: config.lottery.clone(),
            page_size: config.page_size.max(1),
            window_pause: Duration::ZERO,
            session: OnceCell::new(),
        })
    }

    /// Sets a pause between consecutive yearly windows.
    pub fn with_window_pause(mut self, pause: Duration) -> Self {
        self.window_pause = pause;
        self
    }

    async fn ensure_session(&self) -> Result<(), FetchError> {
        self.session
            .get_or_try_init(|| async {
                debug!("Opening session at {}", self.home_url);
                let response = self.http.get(self.home_url.clone()).send().await?;
                if !response.status().is_success() {
                    // The cookie may still have been set; the notice request decides.
                    warn!(
                        "Home page returned {} while opening session",
                        response.status()
                    );
                }
                Ok::<(), FetchError>(())
            })
            .await
            .map(|_| ())
    }

    /// Fetches every page of one window.
    ///
    /// The envelope's `total` and `pageNum` decide when paging ends; a page
    /// shorter than requested only ends it when the source reports neither.
    ///
    /// # Errors
    ///
    /// Besides request failures, returns `FetchError::IncompleteWindow` when
    /// the pages run out before `total` notices arrived, and
    /// `FetchError::PageLimitExceeded` when paging does not end within
    /// `MAX_PAGES_PER_WINDOW` pages.
    pub async fn fetch_window(&self, window: &DateWindow) -> Result<Vec<Value>, FetchError> {
        let mut collected: Vec<Value> = Vec::new();
        let mut page_no = 1;

        loop {
            if page_no > MAX_PAGES_PER_WINDOW {
                return Err(FetchError::PageLimitExceeded {
                    start: window.start.to_string(),
                    end: window.end.to_string(),
                    pages: MAX_PAGES_PER_WINDOW,
                });
            }

            let page = self.fetch_page(window, page_no).await?;
            let received = page.result.len();
            collected.extend(page.result);
            debug!(
                "Window {} page {}: {} notice(s), total {}, pages {}",
                window, page_no, received, page.total, page.page_num
            );

            if page.total <= 0 && page.page_num <= 0 {
                // No paging metadata: a short page is the last one
                if received < self.page_size as usize {
                    break;
                }
            } else {
                let have_all = page.total > 0 && collected.len() as i64 >= page.total;
                let last_page = page.page_num > 0 && i64::from(page_no) >= page.page_num;
                if have_all {
                    break;
                }
                if last_page || received == 0 {
                    if page.total > 0 {
                        return Err(FetchError::IncompleteWindow {
                            start: window.start.to_string(),
                            end: window.end.to_string(),
                            expected: page.total,
                            received: collected.len(),
                        });
                    }
                    break;
                }
            }
            page_no += 1;
        }

        Ok(collected)
    }

    async fn fetch_page(&self, window: &DateWindow, page_no: u32) -> Result<NoticePage, FetchError> {
        let query = NoticeQuery {
            lottery: &self.lottery,
            window: *window,
            page_no,
            page_size: self.page_size,
        };
        let request = self
            .http
            .get(self.notice_url.clone())
            .query(&query.params());
        let response = apply_notice_headers(request, self.home_url.as_str())
            .send()
            .await?;

        let status = response.status();
        let url = response.url().to_string();
        if status != StatusCode::OK {
            return Err(FetchError::StatusError {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let page: NoticePage =
            serde_json::from_str(&body).map_err(|source| FetchError::DecodeError {
                url: url.clone(),
                source,
            })?;
        if page.state != 0 {
            return Err(FetchError::ApiError {
                state: page.state,
                message: page.message,
            });
        }
        Ok(page)
    }
}

impl DrawSource for DrawNoticeClient {
    async fn fetch_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Value>, FetchError> {
        let windows = year_windows(start, end);
        if windows.is_empty() {
            return Ok(Vec::new());
        }

        self.ensure_session().await?;

        let mut notices = Vec::new();
        for (i, window) in windows.iter().enumerate() {
            if i > 0 && !self.window_pause.is_zero() {
                tokio::time::sleep(self.window_pause).await;
            }
            let batch = self.fetch_window(window).await?;
            info!("Fetched {} notice(s) for {}", batch.len(), window);
            notices.extend(batch);
        }
        Ok(notices)
    }
}
