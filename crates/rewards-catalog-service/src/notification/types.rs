//! 通知类型定义

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 通知类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    /// 兑换成功
    ClaimSucceeded,
}

/// 通知渠道类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChannelType {
    Email,
}

/// 通知请求
///
/// 包含发送通知所需的所有信息
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// 通知唯一标识
    pub notification_id: String,
    /// 目标用户 ID
    pub user_id: String,
    /// 通知类型
    pub notification_type: NotificationType,
    /// 通知标题
    pub title: String,
    /// 通知正文
    pub body: String,
    /// 要发送的渠道列表
    pub channels: Vec<ChannelType>,
    /// 通知携带的业务数据
    pub data: HashMap<String, serde_json::Value>,
    /// 创建时间
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// 创建新通知
    pub fn new(
        user_id: impl Into<String>,
        notification_type: NotificationType,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            notification_id: Uuid::now_v7().to_string(),
            user_id: user_id.into(),
            notification_type,
            title: title.into(),
            body: body.into(),
            channels: vec![ChannelType::Email],
            data: HashMap::new(),
            created_at: Utc::now(),
        }
    }

    /// 设置发送渠道
    pub fn with_channels(mut self, channels: Vec<ChannelType>) -> Self {
        self.channels = channels;
        self
    }

    /// 添加业务数据
    pub fn with_data(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }
}

/// 通知构建器
///
/// 提供便捷的通知创建方法
pub struct NotificationBuilder;

impl NotificationBuilder {
    /// 创建兑换成功通知
    pub fn claim_succeeded(
        user_id: impl Into<String>,
        reward_title: impl Into<String>,
    ) -> Notification {
        let reward_title = reward_title.into();
        Notification::new(
            user_id,
            NotificationType::ClaimSucceeded,
            "兑换成功！",
            format!("恭喜！您已成功兑换「{}」。", reward_title),
        )
        .with_data("reward_title", serde_json::json!(&reward_title))
    }
}

/// 通知发送结果
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResult {
    /// 通知 ID
    pub notification_id: String,
    /// 是否所有渠道都成功
    pub success: bool,
    /// 各渠道发送结果
    pub channel_results: Vec<ChannelResult>,
    /// 发送耗时（毫秒）
    pub duration_ms: u64,
    /// 发送时间
    pub sent_at: DateTime<Utc>,
}

impl NotificationResult {
    pub fn from_results(
        notification_id: String,
        channel_results: Vec<ChannelResult>,
        duration_ms: u64,
    ) -> Self {
        let all_success = channel_results
            .iter()
            .all(|r| r.status == SendStatus::Success);
        Self {
            notification_id,
            success: all_success,
            channel_results,
            duration_ms,
            sent_at: Utc::now(),
        }
    }

    /// 获取失败的渠道数量
    pub fn failure_count(&self) -> usize {
        self.channel_results
            .iter()
            .filter(|r| r.status == SendStatus::Failed)
            .count()
    }
}

/// 单渠道发送结果
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelResult {
    /// 渠道类型
    pub channel: ChannelType,
    /// 发送状态
    pub status: SendStatus,
    /// 错误信息（失败时）
    pub error: Option<String>,
    /// 外部系统消息 ID（成功时）
    pub external_message_id: Option<String>,
    /// 发送耗时（毫秒）
    pub duration_ms: u64,
}

impl ChannelResult {
    /// 创建成功结果
    pub fn success(
        channel: ChannelType,
        external_message_id: Option<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            channel,
            status: SendStatus::Success,
            error: None,
            external_message_id,
            duration_ms,
        }
    }

    /// 创建失败结果
    pub fn failed(channel: ChannelType, error: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            channel,
            status: SendStatus::Failed,
            error: Some(error.into()),
            external_message_id: None,
            duration_ms,
        }
    }

    /// 创建跳过结果（渠道未配置或不可用）
    pub fn skipped(channel: ChannelType, reason: impl Into<String>) -> Self {
        Self {
            channel,
            status: SendStatus::Skipped,
            error: Some(reason.into()),
            external_message_id: None,
            duration_ms: 0,
        }
    }
}

/// 发送状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SendStatus {
    /// 发送成功
    Success,
    /// 发送失败
    Failed,
    /// 已跳过（渠道不可用）
    Skipped,
}
