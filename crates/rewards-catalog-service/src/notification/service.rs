//! 通知服务
//!
//! 将通知分发到配置的各个渠道并汇总结果

use std::sync::Arc;
use std::time::Instant;

use tracing::{instrument, warn};

use super::channels::{EmailChannel, NotificationChannel};
use super::types::{ChannelResult, Notification, NotificationResult};
use crate::error::Result;

/// 通知服务
///
/// 持有已注册的渠道实现，按通知声明的渠道列表逐个分发。
/// 单个渠道失败不中断其余渠道的发送。
pub struct NotificationService {
    channels: Vec<Arc<dyn NotificationChannel>>,
}

impl NotificationService {
    pub fn new(channels: Vec<Arc<dyn NotificationChannel>>) -> Self {
        Self { channels }
    }

    /// 使用默认渠道（邮件）创建
    pub fn with_defaults() -> Self {
        Self::new(vec![Arc::new(EmailChannel::with_defaults())])
    }

    /// 发送通知
    ///
    /// 遍历通知声明的渠道：未注册或不可用的渠道记为跳过，
    /// 其余渠道依次发送并收集结果
    #[instrument(skip(self, notification), fields(notification_id = %notification.notification_id))]
    pub async fn send(&self, notification: Notification) -> Result<NotificationResult> {
        let start = Instant::now();
        let mut channel_results = Vec::with_capacity(notification.channels.len());

        for channel_type in &notification.channels {
            let Some(channel) = self
                .channels
                .iter()
                .find(|c| c.channel_type() == *channel_type)
            else {
                channel_results.push(ChannelResult::skipped(*channel_type, "渠道未注册"));
                continue;
            };

            if !channel.is_available(&notification).await {
                channel_results.push(ChannelResult::skipped(*channel_type, "渠道不可用"));
                continue;
            }

            match channel.send(&notification).await {
                Ok(result) => channel_results.push(result),
                Err(e) => {
                    warn!(
                        channel = channel.name(),
                        error = %e,
                        "渠道发送异常"
                    );
                    channel_results.push(ChannelResult::failed(
                        *channel_type,
                        e.to_string(),
                        0,
                    ));
                }
            }
        }

        Ok(NotificationResult::from_results(
            notification.notification_id,
            channel_results,
            start.elapsed().as_millis() as u64,
        ))
    }
}
