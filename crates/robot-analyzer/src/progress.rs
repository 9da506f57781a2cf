//! Work-done progress (`$/progress`) for long-running server tasks such as
//! the workspace scan.
//!
//! ```ignore
//! let progress = ProgressToken::begin(&client, "Indexing", total).await;
//! progress.advance(done).await;
//! progress.end(Some("40 file(s) indexed".into())).await;
//! ```

use std::{
    panic::AssertUnwindSafe,
    sync::atomic::{AtomicU64, Ordering},
};

use futures::FutureExt;
use tower_lsp::{Client, lsp_types::*};
use tracing::{debug, warn};

static NEXT_PROGRESS_ID: AtomicU64 = AtomicU64::new(1);
const PROGRESS_TITLE_PREFIX: &str = "robot-analyzer:";
/// Report every n-th item; the last item is always reported.
const REPORT_EVERY: usize = 5;

/// An active progress session over a known number of items.
///
/// Dropping the token without calling [`end`](Self::end) closes the session
/// with a "Cancelled" message.
pub struct ProgressToken {
    client: Option<Client>,
    token: Option<NumberOrString>,
    total: usize,
}

impl ProgressToken {
    /// Ask the client to create a token and send the `Begin` notification.
    ///
    /// The create request runs in its own task so an editor that never
    /// answers cannot stall the caller.
    pub async fn begin(
        client: &Client,
        title: &str,
        total: usize,
    ) -> Self {
        let id = NEXT_PROGRESS_ID.fetch_add(1, Ordering::Relaxed);
        let token = NumberOrString::String(format!("robotAnalyzer/{}/{id}", title.trim()));
        let display_title = prefixed_progress_title(title);

        let create_client = client.clone();
        let create_token = token.clone();
        tokio::spawn(async move {
            let params = WorkDoneProgressCreateParams {
                token: create_token,
            };
            match AssertUnwindSafe(create_client.send_request::<request::WorkDoneProgressCreate>(params))
                .catch_unwind()
                .await
            {
                Ok(Ok(())) => {},
                Ok(Err(error)) => debug!("workDoneProgress/create rejected: {error}"),
                Err(_) => warn!("workDoneProgress/create panicked (client may have disconnected)"),
            }
        });

        let begin = WorkDoneProgress::Begin(WorkDoneProgressBegin {
            title: display_title.clone(),
            cancellable: Some(false),
            message: Some(items_message(0, total)),
            percentage: Some(0),
        });
        if !send(client, token.clone(), begin).await {
            warn!("progress begin notification panicked (client may have disconnected)");
            return Self {
                client: None,
                token: None,
                total,
            };
        }
        debug!("progress begin: {display_title} ({total} item(s))");

        Self {
            client: Some(client.clone()),
            token: Some(token),
            total,
        }
    }

    /// Record that `done` items are finished. Only every few items produce
    /// a notification.
    pub async fn advance(
        &self,
        done: usize,
    ) {
        if done % REPORT_EVERY != 0 && done != self.total {
            return;
        }
        let (Some(client), Some(token)) = (&self.client, &self.token) else {
            return;
        };

        let report = WorkDoneProgress::Report(WorkDoneProgressReport {
            cancellable: Some(false),
            message: Some(items_message(done, self.total)),
            percentage: Some(percentage(done, self.total)),
        });
        send(client, token.clone(), report).await;
    }

    pub async fn end(
        mut self,
        message: Option<String>,
    ) {
        let (Some(client), Some(token)) = (self.client.take(), self.token.take()) else {
            return;
        };
        debug!("progress end: {token:?}");
        send(&client, token, WorkDoneProgress::End(WorkDoneProgressEnd {
            message,
        }))
        .await;
    }
}

impl Drop for ProgressToken {
    fn drop(&mut self) {
        if let (Some(client), Some(token)) = (self.client.take(), self.token.take()) {
            debug!("progress cancelled (drop): {token:?}");
            tokio::spawn(async move {
                let end = WorkDoneProgress::End(WorkDoneProgressEnd {
                    message: Some("Cancelled".to_string()),
                });
                send(&client, token, end).await;
            });
        }
    }
}

/// Send one `$/progress` notification. Returns `false` if sending panicked.
async fn send(
    client: &Client,
    token: NumberOrString,
    value: WorkDoneProgress,
) -> bool {
    AssertUnwindSafe(client.send_notification::<notification::Progress>(ProgressParams {
        token,
        value: ProgressParamsValue::WorkDone(value),
    }))
    .catch_unwind()
    .await
    .is_ok()
}

fn items_message(
    done: usize,
    total: usize,
) -> String {
    format!("{done} / {total} files")
}

fn percentage(
    done: usize,
    total: usize,
) -> u32 {
    if total == 0 {
        return 100;
    }
    (done.min(total) * 100 / total) as u32
}

fn prefixed_progress_title(title: &str) -> String {
    let trimmed = title.trim();
    if trimmed.starts_with(PROGRESS_TITLE_PREFIX) {
        return trimmed.to_owned();
    }
    format!("{PROGRESS_TITLE_PREFIX} {trimmed}")
}

#[cfg(test)]
#[path = "../tests/src/progress_tests.rs"]
mod tests;
