use anyhow::Result;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub identifier: String,
    pub title: String,
    pub body: String,
    // play the platform's default alert sound
    pub sound: bool,
}

impl Notification {
    pub fn arrival() -> Self {
        Notification {
            identifier: "instant_notification".to_owned(),
            title: "📍 Reached your destination".to_owned(),
            body: "🍔 Check out nearby food options.".to_owned(),
            sound: true,
        }
    }
}

/// Where one-shot alerts go. Delivery is fire-and-forget: the caller logs a
/// returned error and moves on.
pub trait NotificationSink {
    fn deliver(&mut self, notification: &Notification) -> Result<()>;
}

impl<F> NotificationSink for F
where
    F: FnMut(&Notification) -> Result<()>,
{
    fn deliver(&mut self, notification: &Notification) -> Result<()> {
        self(notification)
    }
}

pub struct LogNotificationSink;

impl NotificationSink for LogNotificationSink {
    fn deliver(&mut self, notification: &Notification) -> Result<()> {
        info!(
            "[{}] {} -- {}",
            notification.identifier, notification.title, notification.body
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_sink() {
        let mut delivered = Vec::new();
        let mut sink = |n: &Notification| -> Result<()> {
            delivered.push(n.identifier.clone());
            Ok(())
        };
        sink.deliver(&Notification::arrival()).unwrap();
        assert_eq!(delivered, vec!["instant_notification".to_owned()]);
    }

    #[test]
    fn arrival_content() {
        let n = Notification::arrival();
        assert!(n.title.contains("Reached your destination"));
        assert!(n.sound);
        assert!(LogNotificationSink.deliver(&n).is_ok());
    }
}
