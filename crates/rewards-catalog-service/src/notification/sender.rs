//! 通知发送器
//!
//! 提供业务服务发送通知的便捷接口。
//!
//! ## 设计说明
//!
//! `NotificationSender` 是一个轻量级的通知发送封装，注入到兑换
//! 事务处理器中。它负责：
//! - 根据业务事件创建通知
//! - 异步发送通知（不阻塞主业务流程）
//! - 处理发送失败（记录日志但不影响业务）

use std::sync::Arc;

use tracing::{error, info, warn};

use super::service::NotificationService;
use super::types::{Notification, NotificationBuilder};

/// 通知发送器
///
/// 封装 NotificationService，提供业务友好的发送接口
#[derive(Clone)]
pub struct NotificationSender {
    service: Arc<NotificationService>,
}

impl NotificationSender {
    pub fn new(service: Arc<NotificationService>) -> Self {
        Self { service }
    }

    /// 发送兑换成功通知
    ///
    /// 在兑换事务提交后调用，异步发送通知到用户
    pub fn send_claim_succeeded(&self, user_id: &str, reward_title: &str) {
        let notification = NotificationBuilder::claim_succeeded(user_id, reward_title);
        self.send_async(notification);
    }

    /// 发送自定义通知（同步等待结果）
    pub async fn send_sync(
        &self,
        notification: Notification,
    ) -> crate::error::Result<super::types::NotificationResult> {
        self.service.send(notification).await
    }

    /// 异步发送通知（fire-and-forget）
    fn send_async(&self, notification: Notification) {
        let service = self.service.clone();
        let notification_id = notification.notification_id.clone();
        let user_id = notification.user_id.clone();

        tokio::spawn(async move {
            match service.send(notification).await {
                Ok(result) => {
                    if result.success {
                        info!(
                            notification_id = %notification_id,
                            user_id = %user_id,
                            "通知发送成功"
                        );
                    } else {
                        warn!(
                            notification_id = %notification_id,
                            user_id = %user_id,
                            failure_count = result.failure_count(),
                            "通知发送未完全成功"
                        );
                    }
                }
                Err(e) => {
                    error!(
                        notification_id = %notification_id,
                        user_id = %user_id,
                        error = %e,
                        "通知发送异常"
                    );
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::types::NotificationType;

    #[tokio::test]
    async fn test_notification_sender_fire_and_forget() {
        let service = Arc::new(NotificationService::with_defaults());
        let sender = NotificationSender::new(service);

        // 发送不会 panic，也不阻塞调用方
        sender.send_claim_succeeded("user-123", "测试奖品");

        // 等待异步任务完成
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
    }

    #[tokio::test]
    async fn test_send_sync() {
        let service = Arc::new(NotificationService::with_defaults());
        let sender = NotificationSender::new(service);

        let notification = Notification::new(
            "user-123",
            NotificationType::ClaimSucceeded,
            "测试标题",
            "测试内容",
        );

        let result = sender.send_sync(notification).await.unwrap();
        assert!(result.success);
    }
}
