use crate::model::{Notification, NotificationTab};

/// Notifications held locally, newest first
#[derive(Debug, Clone, Default)]
pub struct NotificationsState {
    notifications: Vec<Notification>,
}

impl NotificationsState {
    pub fn new(mut notifications: Vec<Notification>) -> Self {
        notifications.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Self { notifications }
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn receive(&mut self, notification: Notification) {
        self.notifications.insert(0, notification);
    }

    /// Returns false when no notification has that id
    pub fn mark_read(&mut self, id: u64) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.read = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_read(&mut self) {
        for notification in self.notifications.iter_mut() {
            notification.read = true;
        }
    }

    pub fn filtered(&self, tab: NotificationTab) -> Vec<&Notification> {
        self.notifications
            .iter()
            .filter(|notification| tab.accepts(notification))
            .collect()
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }
}
