//! 通知服务模块
//!
//! 兑换成功后的出站通知。通知发送与兑换事务完全解耦：
//! 事务提交后异步派发，发送失败只记日志，永不回滚或影响
//! 兑换结果。

pub mod channels;
mod sender;
mod service;
mod types;

pub use channels::{ChannelConfig, EmailChannel, NotificationChannel};
pub use sender::NotificationSender;
pub use service::NotificationService;
pub use types::{
    ChannelResult, ChannelType, Notification, NotificationBuilder, NotificationResult,
    NotificationType, SendStatus,
};
