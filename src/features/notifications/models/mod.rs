mod notification;

pub use notification::{Notification, NotificationStatus, NotificationType};
