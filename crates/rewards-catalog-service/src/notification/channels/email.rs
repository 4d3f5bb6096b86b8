//! Email 邮件通知渠道
//!
//! 通过邮件服务发送兑换成功邮件。
//! 当前为模拟实现，生产环境需要接入真实的邮件服务（如 SendGrid、AWS SES）。

use std::time::Instant;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use super::{ChannelConfig, NotificationChannel};
use crate::error::Result;
use crate::notification::types::{ChannelResult, ChannelType, Notification};

/// Email 邮件通知渠道
pub struct EmailChannel {
    config: ChannelConfig,
    /// 发件人地址
    from_address: String,
}

impl EmailChannel {
    pub fn new(config: ChannelConfig, from_address: String) -> Self {
        Self {
            config,
            from_address,
        }
    }

    /// 使用默认配置创建
    pub fn with_defaults() -> Self {
        Self::new(
            ChannelConfig::new(true).with_timeout(10000),
            "noreply@rewards-catalog.com".to_string(),
        )
    }

    /// 构建 HTML 邮件内容
    fn build_html_content(&self, notification: &Notification) -> String {
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{}</title>
</head>
<body>
    <h1>{}</h1>
    <p>{}</p>
    <p style="color: #888; font-size: 12px;">此邮件由积分商城自动发送，请勿回复。</p>
</body>
</html>"#,
            notification.title, notification.title, notification.body
        )
    }

    /// 模拟发送邮件（生产环境应接入真实邮件服务）
    async fn send_email(&self, notification: &Notification) -> Result<String> {
        // 模拟网络延迟
        tokio::time::sleep(tokio::time::Duration::from_millis(30)).await;

        let html_content = self.build_html_content(notification);

        debug!(
            notification_id = %notification.notification_id,
            user_id = %notification.user_id,
            from = %self.from_address,
            subject = %notification.title,
            content_length = html_content.len(),
            "Email 发送中..."
        );

        let message_id = format!("email-{}", Uuid::new_v4());
        Ok(message_id)
    }
}

#[async_trait]
impl NotificationChannel for EmailChannel {
    fn channel_type(&self) -> ChannelType {
        ChannelType::Email
    }

    fn name(&self) -> &str {
        "email"
    }

    async fn is_available(&self, _notification: &Notification) -> bool {
        self.config.enabled
    }

    async fn send(&self, notification: &Notification) -> Result<ChannelResult> {
        let start = Instant::now();

        match self.send_email(notification).await {
            Ok(message_id) => Ok(ChannelResult::success(
                ChannelType::Email,
                Some(message_id),
                start.elapsed().as_millis() as u64,
            )),
            Err(e) => Ok(ChannelResult::failed(
                ChannelType::Email,
                e.to_string(),
                start.elapsed().as_millis() as u64,
            )),
        }
    }
}
