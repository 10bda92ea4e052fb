mod api;
mod error;
mod types;

use std::future::Future;

pub use self::api::*;
pub use self::error::*;
pub use self::types::*;
use crate::file::CandidateFile;

/// 以图搜图服务
///
/// 控制器只通过这个接口与服务端交互，测试时可以替换为其他实现。
pub trait Backend: Send + Sync {
    /// 上传图片，返回最相似的一张
    fn search(&self, file: &CandidateFile) -> impl Future<Output = Result<SearchResult>> + Send;

    /// 获取已索引的图片列表
    fn indexed(&self) -> impl Future<Output = Result<IndexedGallery>> + Send;
}
