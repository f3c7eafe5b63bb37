// ==========================================
// 賃貸管理システム - 通知接缝
// ==========================================
// 职责: 单向事件下沉（宿主的 Toast 等）；核心只发射，
//       从不依赖通知方状态
// ==========================================

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyLevel {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotifyLevel,
    pub message: String,
    pub duration_ms: Option<u64>,
}

impl Notification {
    pub fn new(level: NotifyLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            duration_ms: None,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotifyLevel::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotifyLevel::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotifyLevel::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotifyLevel::Info, message)
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }
}

// ==========================================
// Notifier Trait - 通知下沉（外部协作者接口）
// ==========================================
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

// ==========================================
// LogNotifier - 默认实现（落到 tracing）
// ==========================================
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotifyLevel::Success | NotifyLevel::Info => {
                info!(level = ?notification.level, "{}", notification.message)
            }
            NotifyLevel::Warning => warn!("{}", notification.message),
            NotifyLevel::Error => error!("{}", notification.message),
        }
    }
}
