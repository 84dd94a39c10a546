//! Notification delivery for the command-line host
//!
//! Real delivery (email, SMS, push) is outside this crate. The host logs each
//! notice as a structured `tracing` event instead.

use crate::core::traits::NotificationService;
use crate::types::PaymentError;

/// Notifier that emits one `info` event per notice
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotificationService;

impl NotificationService for LogNotificationService {
    fn notify_funds_low(&self, email: &str) -> Result<(), PaymentError> {
        tracing::info!(email, notice = "funds_low", "Notifying user that funds are low");
        Ok(())
    }

    fn notify_approaching_pay_in_limit(&self, email: &str) -> Result<(), PaymentError> {
        tracing::info!(
            email,
            notice = "approaching_pay_in_limit",
            "Notifying user that the pay-in limit is close"
        );
        Ok(())
    }
}
