use super::super::models::NewNotification;
use crate::core::Result;
use async_trait::async_trait;
use sqlx::MySqlPool;
use tracing::debug;

/// Delivery seam for in-app notifications
///
/// Callers in the payment flow treat delivery as best-effort: a failed
/// insert is logged and swallowed there, never bubbled into the
/// payment's own transaction.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, user_id: &str, notification: NewNotification) -> Result<()>;
}

pub struct MySqlNotifier {
    pool: MySqlPool,
}

impl MySqlNotifier {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Notifier for MySqlNotifier {
    async fn notify(&self, user_id: &str, notification: NewNotification) -> Result<()> {
        let id = uuid::Uuid::new_v4().to_string();

        sqlx::query(
            r#"
            INSERT INTO notifications (id, user_id, title, message, type, is_read, action_url)
            VALUES (?, ?, ?, ?, ?, FALSE, ?)
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.kind.to_string())
        .bind(&notification.action_url)
        .execute(&self.pool)
        .await?;

        debug!(
            notification_id = %id,
            user_id = %user_id,
            title = %notification.title,
            "Notification stored"
        );

        Ok(())
    }
}
