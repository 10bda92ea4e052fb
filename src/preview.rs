use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::error::ImageFormatHint;
use image::{GenericImageView, ImageError};
use log::debug;
use thiserror::Error;
use tokio::task::spawn_blocking;

use crate::file::CandidateFile;

/// 可直接显示的预览图
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewHandle {
    /// `data:<type>;base64,...` 形式的地址
    pub data_url: String,
    /// 像素尺寸，格式无法在本地解码时为空
    pub dimensions: Option<(u32, u32)>,
}

impl PreviewHandle {
    /// 不解码，直接由文件内容生成
    pub fn from_file(file: &CandidateFile) -> Self {
        Self { data_url: data_url(&file.media_type, &file.data), dimensions: None }
    }
}

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("无法解码图片: {0}")]
    Decode(#[from] image::ImageError),
    #[error("解码任务异常退出: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// 解码图片并生成预览
///
/// 图片内容损坏时返回错误，这种情况与选择了非图片文件同等对待。
/// 能识别格式但没有对应解码器的图片仍然可以预览，只是没有尺寸。
pub fn decode(file: &CandidateFile) -> Result<PreviewHandle, PreviewError> {
    let dimensions = match image::load_from_memory(&file.data) {
        Ok(img) => Some(img.dimensions()),
        Err(ImageError::Unsupported(e)) if matches!(e.format_hint(), ImageFormatHint::Exact(_)) => {
            debug!("{} 的格式不支持本地解码: {e}", file.name);
            None
        }
        Err(e) => return Err(e.into()),
    };
    Ok(PreviewHandle { dimensions, ..PreviewHandle::from_file(file) })
}

/// 在阻塞线程池中解码，避免卡住事件循环
pub async fn decode_async(file: Arc<CandidateFile>) -> Result<PreviewHandle, PreviewError> {
    spawn_blocking(move || decode(&file)).await?
}

fn data_url(media_type: &str, data: &[u8]) -> String {
    format!("data:{};base64,{}", media_type, STANDARD.encode(data))
}
