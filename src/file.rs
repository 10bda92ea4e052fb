use std::path::Path;

use anyhow::Result;
use image::ImageFormat;
use log::debug;

/// 无法识别的文件类型
pub const OCTET_STREAM: &str = "application/octet-stream";

/// 用户选择或拖入的文件，尚未确认是否可以用于搜索
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    /// 文件名，上传时作为 multipart 的 filename
    pub name: String,
    /// 声明的 MIME 类型
    pub media_type: String,
    /// 文件内容
    pub data: Vec<u8>,
}

impl CandidateFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self { name: name.into(), media_type: media_type.into(), data }
    }

    /// 从磁盘读取文件，MIME 类型由后缀名推断
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Ok(Self::new(name, media_type_of(path), data))
    }

    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }
}

/// 根据后缀名推断 MIME 类型
pub fn media_type_of(path: &Path) -> &'static str {
    ImageFormat::from_path(path).map(|f| f.to_mime_type()).unwrap_or(OCTET_STREAM)
}

/// 文件的来源
#[derive(Debug, Clone)]
pub enum AcquireSource {
    /// 拖放到上传区域
    Drop(Vec<CandidateFile>),
    /// 通过文件选择器选择
    Picker(Vec<CandidateFile>),
}

impl AcquireSource {
    pub fn is_drop(&self) -> bool {
        matches!(self, AcquireSource::Drop(_))
    }

    fn into_files(self) -> Vec<CandidateFile> {
        match self {
            AcquireSource::Drop(files) | AcquireSource::Picker(files) => files,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acquisition {
    /// 文件是图片，可以成为当前选择
    Accepted(CandidateFile),
    /// 文件不是图片
    Rejected(CandidateFile),
    /// 没有提供任何文件
    Empty,
}

/// 从拖放或文件选择器中取出候选文件
///
/// 一次只处理一个文件：如果提供了多个，只使用第一个，其余的忽略。
pub fn acquire(source: AcquireSource) -> Acquisition {
    let mut files = source.into_files().into_iter();
    let Some(file) = files.next() else {
        return Acquisition::Empty;
    };
    let ignored = files.count();
    if ignored > 0 {
        debug!("一次只能选择一个文件，忽略其余 {ignored} 个");
    }
    if file.is_image() { Acquisition::Accepted(file) } else { Acquisition::Rejected(file) }
}
