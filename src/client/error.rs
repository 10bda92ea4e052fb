use reqwest::StatusCode;
use thiserror::Error;

use crate::config::Messages;

/// 与服务端通信时的错误
#[derive(Debug, Error)]
pub enum ClientError {
    /// 服务端明确返回了失败状态
    #[error("服务端返回 {status}: {}", .message.as_deref().unwrap_or("<无 message>"))]
    Backend { status: StatusCode, message: Option<String> },
    /// 网络不可达等传输层错误
    #[error("请求失败: {0}")]
    Transport(#[from] reqwest::Error),
    /// 成功响应的内容无法解析
    #[error("响应格式错误: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// 转换为展示给用户的提示，传输层细节不对用户暴露
    pub fn user_message(&self, messages: &Messages) -> String {
        match self {
            ClientError::Backend { message: Some(message), .. } => message.clone(),
            ClientError::Backend { message: None, .. } => messages.search_failed.to_string(),
            ClientError::Transport(_) | ClientError::Decode(_) => {
                messages.connection_error.to_string()
            }
        }
    }
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;
