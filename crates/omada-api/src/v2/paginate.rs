// Paged GET enumeration
//
// List endpoints return one page per request, addressed by `currentPage` /
// `currentPageSize` query parameters. `paginate` turns that into a lazy
// stream: nothing is requested until the first poll, page N+1 is requested
// only after page N has been handed out, and any failure ends the stream.

use async_stream::stream;
use futures_util::stream::BoxStream;
use serde::de::DeserializeOwned;
use tracing::{trace, warn};

use crate::error::Error;
use crate::v2::client::{OmadaClient, QueryParams};
use crate::v2::models::Page;

const PAGE_PARAM: &str = "currentPage";
const PAGE_SIZE_PARAM: &str = "currentPageSize";

/// Lazy, finite, non-restartable sequence of items from a list endpoint.
pub type Pages<'a, T> = BoxStream<'a, Result<T, Error>>;

/// What to do after a page has been received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Advance {
    /// Hand out the page's items; request another page if `more`.
    Yield { more: bool },
    /// Drop the page and end the sequence.
    End,
}

/// Paging position for one enumeration.
#[derive(Debug, Clone)]
pub(crate) struct Cursor {
    params: QueryParams,
    page: u64,
    page_size: u64,
    last_page: Option<u64>,
    seen: u64,
}

impl Cursor {
    /// Start from the caller's parameters. `currentPage` and
    /// `currentPageSize` are honoured when supplied.
    pub(crate) fn new(mut params: QueryParams, default_size: u32) -> Self {
        let page = params
            .remove(PAGE_PARAM)
            .and_then(|p| p.parse().ok())
            .filter(|p| *p > 0)
            .unwrap_or(1);
        let page_size = params
            .remove(PAGE_SIZE_PARAM)
            .and_then(|s| s.parse().ok())
            .filter(|s| *s > 0)
            .unwrap_or_else(|| u64::from(default_size.max(1)));
        Self {
            params,
            page,
            page_size,
            last_page: None,
            seen: (page - 1).saturating_mul(page_size),
        }
    }

    pub(crate) fn page(&self) -> u64 {
        self.page
    }

    /// Filters plus the current paging parameters.
    pub(crate) fn request_params(&self) -> QueryParams {
        let mut params = self.params.clone();
        params.insert(PAGE_PARAM.into(), self.page.to_string());
        params.insert(PAGE_SIZE_PARAM.into(), self.page_size.to_string());
        params
    }

    /// Account for a received page and decide whether to continue.
    ///
    /// Rows are counted as received, starting from the rows skipped by a
    /// caller-supplied `currentPage`. The next page number follows the
    /// server's reported `currentPage`, falling back to what was requested.
    pub(crate) fn observe(
        &mut self,
        received: usize,
        total_rows: u64,
        current_page: Option<u64>,
        current_size: Option<u64>,
    ) -> Advance {
        if received == 0 {
            return Advance::End;
        }

        let page = current_page.filter(|p| *p > 0).unwrap_or(self.page);
        if self.last_page.is_some_and(|last| page <= last) {
            warn!(page, "controller repeated a page; ending enumeration");
            return Advance::End;
        }
        self.last_page = Some(page);

        let size = current_size.filter(|s| *s > 0).unwrap_or(self.page_size);
        let received = u64::try_from(received).unwrap_or(u64::MAX);
        self.seen = self.seen.saturating_add(received);
        let seen = self.seen;
        if seen >= total_rows {
            return Advance::Yield { more: false };
        }

        // A short page while rows remain is still progress; only an empty
        // or repeated page ends the sequence.
        if received < size {
            trace!(page, seen, total_rows, "short page with rows remaining");
        }

        self.page = page + 1;
        Advance::Yield { more: true }
    }
}

impl OmadaClient {
    /// Enumerate a paged list endpoint as a lazy stream of items.
    ///
    /// Requests `currentPage = 1` and the client's page size unless the
    /// caller supplies them. Each pull that exhausts the buffered page
    /// issues the next request; a decode or transport failure is yielded
    /// once and ends the stream. Restarting requires a fresh call.
    ///
    /// A page whose envelope has `errorCode = 0` but no `result` is a
    /// [`Error::Protocol`] failure, not an empty listing.
    pub fn paginate<'a, T>(&'a self, path: impl Into<String>, params: QueryParams) -> Pages<'a, T>
    where
        T: DeserializeOwned + Send + 'a,
    {
        let path = path.into();
        let mut cursor = Cursor::new(params, self.page_size());

        Box::pin(stream! {
            loop {
                let page: Page<T> = match self.get(&path, cursor.request_params()).await {
                    Ok(page) => page,
                    Err(e) => {
                        yield Err(e);
                        break;
                    }
                };
                trace!(
                    path = %path,
                    page = cursor.page(),
                    received = page.data.len(),
                    total_rows = page.total_rows,
                    "received page"
                );

                let advance = cursor.observe(
                    page.data.len(),
                    page.total_rows,
                    page.current_page,
                    page.current_size,
                );
                let Advance::Yield { more } = advance else {
                    break;
                };
                for item in page.data {
                    yield Ok(item);
                }
                if !more {
                    break;
                }
            }
        })
    }
}
