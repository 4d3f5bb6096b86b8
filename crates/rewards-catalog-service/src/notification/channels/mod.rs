//! 通知渠道实现
//!
//! 定义通知渠道 trait 并提供具体实现。当前支持邮件渠道，
//! 与原始产品的兑换成功邮件对应。

mod email;

pub use email::EmailChannel;

use async_trait::async_trait;

use super::types::{ChannelResult, ChannelType, Notification};
use crate::error::Result;

/// 通知渠道 trait
///
/// 所有通知渠道都需要实现此 trait，提供统一的发送接口。
/// 渠道实现应当是无状态的，便于并发调用。
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// 渠道类型标识
    fn channel_type(&self) -> ChannelType;

    /// 渠道名称（用于日志）
    fn name(&self) -> &str;

    /// 检查渠道是否可用
    ///
    /// 在发送前调用，用于判断是否应该跳过此渠道
    async fn is_available(&self, notification: &Notification) -> bool;

    /// 发送通知
    ///
    /// 发送失败应返回 ChannelResult::failed 而非 Err，
    /// 以便调用方区分「可重试的错误」和「永久失败」
    async fn send(&self, notification: &Notification) -> Result<ChannelResult>;
}

/// 渠道配置
#[derive(Debug, Clone, Default)]
pub struct ChannelConfig {
    /// 是否启用
    pub enabled: bool,
    /// 请求超时（毫秒）
    pub timeout_ms: u64,
}

impl ChannelConfig {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            timeout_ms: 5000,
        }
    }

    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}
