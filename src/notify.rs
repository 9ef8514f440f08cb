use crate::models::{ChannelId, TeamId};

/// Delivers messages to a team's channel.
pub trait Notifier: Send + Sync {
  fn send(&self, channel: ChannelId, message: String);
}

pub fn flag_lost_message(finder: TeamId) -> String {
  format!("Team {} has found one of your flags!", finder)
}

/// Writes notifications to the log.
#[derive(Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
  fn send(&self, channel: ChannelId, message: String) {
    info!("notify channel={}: {}", channel, message);
  }
}

/// Keeps every notification in memory.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryNotifier {
  sent: std::sync::Mutex<Vec<(ChannelId, String)>>,
}

#[cfg(test)]
impl MemoryNotifier {
  pub fn sent(&self) -> Vec<(ChannelId, String)> {
    self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
  }
}

#[cfg(test)]
impl Notifier for MemoryNotifier {
  fn send(&self, channel: ChannelId, message: String) {
    if let Ok(mut sent) = self.sent.lock() {
      sent.push((channel, message));
    }
  }
}
