//! Outbound alert notifications.
//!
//! A [`Notifier`] delivers one short text message to a single configured
//! destination. [`dispatch_alerts`] walks a list of alerts sequentially, one
//! message per alert, pausing a fixed interval between sends so the downstream
//! transport's rate limit is respected. The pause goes through a [`Pacer`] so
//! tests can run the loop without sleeping.
//!
//! Delivery is best effort: a failed send is logged and counted, and the
//! remaining alerts are still attempted. Nothing is retried.

pub mod telegram;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::alert::Alert;

#[derive(Debug, Error)]
pub enum NotifyError {
    /// Transport failure talking to the messaging API.
    #[error("notification request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The messaging API rejected the message.
    #[error("notification rejected ({status}): {message}")]
    Api { status: u16, message: String },
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends one message to the configured destination.
    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}

/// Pause between consecutive sends.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self, duration: Duration);
}

/// Sleeps on the tokio timer.
pub struct TokioPacer;

#[async_trait]
impl Pacer for TokioPacer {
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Returns immediately. For tests and dry runs.
pub struct NoPause;

#[async_trait]
impl Pacer for NoPause {
    async fn pause(&self, _duration: Duration) {}
}

/// Outcome of one [`dispatch_alerts`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub sent: usize,
    pub failed: usize,
}

/// Renders an alert as a short human-readable block.
pub fn format_alert_message(alert: &Alert, at: DateTime<Utc>) -> String {
    format!(
        "{glyph} {name} ({symbol}) {direction}\n\
         Price: ${price:.2}\n\
         24h change: {change:+.2}%\n\
         Time: {time}",
        glyph = alert.direction.glyph(),
        name = alert.coin_name,
        symbol = alert.symbol.to_uppercase(),
        direction = alert.direction,
        price = alert.price,
        change = alert.change_pct,
        time = at.format("%Y-%m-%d %H:%M:%S UTC"),
    )
}

/// Sends one message per alert, in order, pausing `spacing` between sends.
///
/// No pause is taken before the first message or after the last one.
pub async fn dispatch_alerts(
    notifier: &dyn Notifier,
    alerts: &[Alert],
    at: DateTime<Utc>,
    spacing: Duration,
    pacer: &dyn Pacer,
) -> DispatchReport {
    let mut report = DispatchReport::default();

    for (i, alert) in alerts.iter().enumerate() {
        if i > 0 {
            pacer.pause(spacing).await;
        }

        let text = format_alert_message(alert, at);
        match notifier.send(&text).await {
            Ok(()) => {
                debug!(symbol = %alert.symbol, "alert sent");
                report.sent += 1;
            }
            Err(e) => {
                warn!(symbol = %alert.symbol, error = %e, "failed to send alert");
                report.failed += 1;
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::TimeZone;

    use super::*;
    use crate::models::alert::Direction;

    /// Records every message; fails the ones whose text contains `fail_on`.
    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<String>>,
        fail_on: Option<&'static str>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send(&self, text: &str) -> Result<(), NotifyError> {
            if self.fail_on.is_some_and(|needle| text.contains(needle)) {
                return Err(NotifyError::Api {
                    status: 429,
                    message: "Too Many Requests".into(),
                });
            }
            self.sent.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct CountingPacer {
        pauses: Mutex<Vec<Duration>>,
    }

    #[async_trait]
    impl Pacer for CountingPacer {
        async fn pause(&self, duration: Duration) {
            self.pauses.lock().unwrap().push(duration);
        }
    }

    fn alert(name: &str, symbol: &str, change: f64) -> Alert {
        Alert {
            coin_name: name.into(),
            symbol: symbol.into(),
            price: 1234.5,
            change_pct: change,
            direction: if change > 0.0 {
                Direction::Up
            } else {
                Direction::Down
            },
        }
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap()
    }

    #[test]
    fn test_message_layout() {
        let msg = format_alert_message(&alert("Bitcoin", "btc", 6.2), at());
        assert_eq!(
            msg,
            "📈 Bitcoin (BTC) UP\nPrice: $1234.50\n24h change: +6.20%\n\
             Time: 2024-06-01 08:30:00 UTC"
        );

        let down = format_alert_message(&alert("Solana", "sol", -10.0), at());
        assert!(down.starts_with("📉 Solana (SOL) DOWN"));
        assert!(down.contains("24h change: -10.00%"));
    }

    #[tokio::test]
    async fn test_dispatch_sends_in_order_with_spacing() {
        let notifier = RecordingNotifier::default();
        let pacer = CountingPacer::default();
        let alerts = vec![
            alert("Bitcoin", "btc", 6.2),
            alert("Ethereum", "eth", -7.0),
            alert("Solana", "sol", 9.9),
        ];

        let report =
            dispatch_alerts(&notifier, &alerts, at(), Duration::from_millis(1000), &pacer).await;

        assert_eq!(report, DispatchReport { sent: 3, failed: 0 });
        let sent = notifier.sent.lock().unwrap();
        assert!(sent[0].contains("Bitcoin"));
        assert!(sent[1].contains("Ethereum"));
        assert!(sent[2].contains("Solana"));
        assert_eq!(
            *pacer.pauses.lock().unwrap(),
            vec![Duration::from_millis(1000); 2]
        );
    }

    #[tokio::test]
    async fn test_failed_send_does_not_stop_the_rest() {
        let notifier = RecordingNotifier {
            fail_on: Some("Ethereum"),
            ..Default::default()
        };
        let alerts = vec![
            alert("Bitcoin", "btc", 6.2),
            alert("Ethereum", "eth", -7.0),
            alert("Solana", "sol", 9.9),
        ];

        let report = dispatch_alerts(&notifier, &alerts, at(), Duration::ZERO, &NoPause).await;

        assert_eq!(report, DispatchReport { sent: 2, failed: 1 });
        assert_eq!(notifier.sent.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_no_alerts_no_pauses() {
        let pacer = CountingPacer::default();
        let report =
            dispatch_alerts(&RecordingNotifier::default(), &[], at(), Duration::ZERO, &pacer).await;
        assert_eq!(report, DispatchReport::default());
        assert!(pacer.pauses.lock().unwrap().is_empty());
    }
}
