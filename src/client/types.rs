use serde::{Deserialize, Serialize};

/// 搜索成功时的响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// 最相似图片的文件名
    pub match_image: String,
    /// 相似度百分比，范围 0 到 100，由服务端计算
    pub percentage: f64,
    /// 原始相似度分数，范围 0 到 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

/// 服务端返回的错误信息
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    /// 错误类别，仅用于日志
    #[serde(default)]
    pub error: Option<String>,
    /// 面向用户的错误描述
    #[serde(default)]
    pub message: Option<String>,
}

/// `/api` 的响应：已索引的图片
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedGallery {
    /// 已索引图片数量
    pub indexed_images: usize,
    /// 已索引图片的文件名，保持服务端给出的顺序
    pub indexed_files: Vec<String>,
}

/// `/health` 的响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub indexed_images: usize,
}

/// `/reindex` 的响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReindexStatus {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    pub indexed_images: usize,
}
