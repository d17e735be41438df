use std::time::Duration;

use futures::{FutureExt, StreamExt};
use futures::channel::mpsc;

use skw_gauth::{list_codes, now_unix_seconds, Credential, Timestamp};

use crate::table::{tabulify, TableStyle};

const REFRESH_INTERVAL: Duration = Duration::from_secs(1);
const HEADER: [&str; 4] = ["User", "Domain", "Code", "Life Time"];
pub const CONTINUE_HINT: &str = "press Ctrl+C to break ...";

/// One rendered frame of the code table at `now`
pub fn render_listing(credentials: &[Credential], now: Timestamp, style: &TableStyle) -> String {
    let mut rows = vec![HEADER.iter().map(|h| h.to_string()).collect::<Vec<_>>()];

    for entry in list_codes(credentials, now) {
        let code = match entry.code {
            Ok(code) => code.to_string(),
            Err(e) => {
                log::warn!("no code for {}@{}: {}", entry.user, entry.domain, e);
                "invalid secret".to_string()
            },
        };
        rows.push(vec![
            entry.user,
            entry.domain,
            code,
            format!("  {} (s)", entry.remaining_seconds),
        ]);
    }

    tabulify(&rows, style)
}

/// Renders the code table once, or every second until a message
/// arrives on the termination channel.
///
/// The `gauth` binary never sends on that channel: a live listing there
/// ends with the process on Ctrl+C. Embedders stop the loop by sending `()`.
pub struct ListingEventLoop {
    credentials: Vec<Credential>,
    style: TableStyle,

    continuous: bool,
    max_refreshes: Option<usize>,
    refresh_interval: Duration,
    clock: fn() -> Timestamp,

    termination_receiver: mpsc::Receiver<()>,
}

impl ListingEventLoop {
    pub fn new(
        credentials: Vec<Credential>,
        style: TableStyle,
        termination_receiver: mpsc::Receiver<()>,
    ) -> Self {
        Self {
            credentials,
            style,
            continuous: false,
            max_refreshes: None,
            refresh_interval: REFRESH_INTERVAL,
            clock: now_unix_seconds,
            termination_receiver,
        }
    }

    pub fn continuous(mut self, continuous: bool) -> Self {
        self.continuous = continuous;
        self
    }

    pub fn max_refreshes(mut self, max_refreshes: usize) -> Self {
        self.max_refreshes = Some(max_refreshes);
        self
    }

    pub fn refresh_interval(mut self, refresh_interval: Duration) -> Self {
        self.refresh_interval = refresh_interval;
        self
    }

    pub fn clock(mut self, clock: fn() -> Timestamp) -> Self {
        self.clock = clock;
        self
    }

    /// Returns the number of frames rendered.
    pub async fn run<F: FnMut(&str)>(mut self, mut sink: F) -> usize {
        let mut refreshes = 0;

        loop {
            let now = (self.clock)();
            sink(&render_listing(&self.credentials, now, &self.style));
            refreshes += 1;

            if !self.continuous || self.max_refreshes.map_or(false, |max| refreshes >= max) {
                break;
            }
            sink(CONTINUE_HINT);

            futures::select! {
                _ = async_std::task::sleep(self.refresh_interval).fuse() => {},
                _ = self.termination_receiver.select_next_some() => {
                    log::debug!("listing terminated after {} refreshes", refreshes);
                    break;
                }
            }
        }

        refreshes
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use futures::SinkExt;

    fn credentials() -> Vec<Credential> {
        vec![
            Credential::new("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ", "alice", "example.com"),
            Credential::new("not base32", "bob", "example.org"),
        ]
    }

    fn fixed_clock() -> Timestamp { 59 }

    #[test]
    fn frame() {
        let frame = render_listing(&credentials(), 59, &TableStyle::Plain);
        let lines: Vec<&str> = frame.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with(" User "));
        assert!(lines[1].contains("alice") && lines[1].contains("287082") && lines[1].contains("  1 (s)"));
        assert!(lines[2].contains("invalid secret"));
    }

    #[async_std::test]
    async fn single_shot() {
        let (_termination_sender, termination_receiver) = mpsc::channel(0);
        let mut frames = Vec::new();

        let refreshes = ListingEventLoop::new(credentials(), TableStyle::Boxed, termination_receiver)
            .clock(fixed_clock)
            .run(|frame| frames.push(frame.to_string()))
            .await;

        assert_eq!(refreshes, 1);
        assert_eq!(frames.len(), 1);
        assert!(frames[0].starts_with("+"));
    }

    #[async_std::test]
    async fn bounded_refreshes() {
        let (_termination_sender, termination_receiver) = mpsc::channel(0);
        let mut frames = Vec::new();

        let refreshes = ListingEventLoop::new(credentials(), TableStyle::Plain, termination_receiver)
            .continuous(true)
            .max_refreshes(3)
            .refresh_interval(Duration::from_millis(5))
            .clock(fixed_clock)
            .run(|frame| frames.push(frame.to_string()))
            .await;

        assert_eq!(refreshes, 3);
        // three tables with a hint between each
        assert_eq!(frames.len(), 5);
        assert_eq!(frames[1], CONTINUE_HINT);
    }

    #[async_std::test]
    async fn terminates_on_signal() {
        let (mut termination_sender, termination_receiver) = mpsc::channel(1);
        termination_sender.send(()).await.unwrap();

        let refreshes = ListingEventLoop::new(credentials(), TableStyle::Plain, termination_receiver)
            .continuous(true)
            .refresh_interval(Duration::from_secs(3600))
            .clock(fixed_clock)
            .run(|_| {})
            .await;

        assert_eq!(refreshes, 1);
    }
}
