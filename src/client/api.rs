use log::{debug, info};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

use super::error::{ClientError, Result};
use super::types::*;
use super::Backend;
use crate::file::CandidateFile;

/// 上传图片使用的表单字段名
pub const IMAGE_FIELD: &str = "image";

/// 基于 HTTP 的服务端实现
///
/// 不设置超时，也不重试：请求会一直等到服务端响应或连接出错。
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base: Url,
}

impl HttpBackend {
    pub fn new(base: Url) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("imsearch-client/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, base: normalize_base(base) })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// 检查服务状态
    pub async fn health(&self) -> Result<HealthStatus> {
        let resp = self.client.get(self.endpoint("health")).send().await?;
        parse(resp).await
    }

    /// 让服务端重新扫描并索引图片
    pub async fn reindex(&self) -> Result<ReindexStatus> {
        info!("请求服务端重新索引");
        let resp = self.client.post(self.endpoint("reindex")).send().await?;
        parse(resp).await
    }

    fn endpoint(&self, path: &str) -> Url {
        endpoint(&self.base, path)
    }
}

impl Backend for HttpBackend {
    async fn search(&self, file: &CandidateFile) -> Result<SearchResult> {
        let part = Part::bytes(file.data.clone())
            .file_name(file.name.clone())
            .mime_str(&file.media_type)?;
        let form = Form::new().part(IMAGE_FIELD, part);

        debug!("上传图片 {} ({} 字节)", file.name, file.data.len());
        let resp = self.client.post(self.endpoint("search")).multipart(form).send().await?;
        parse(resp).await
    }

    async fn indexed(&self) -> Result<IndexedGallery> {
        let resp = self.client.get(self.endpoint("api")).send().await?;
        parse(resp).await
    }
}

/// 将服务地址与相对路径拼接
///
/// 例如 `http://host/app/` 与 `images/a.jpg` 得到 `http://host/app/images/a.jpg`
pub fn endpoint(base: &Url, path: &str) -> Url {
    let base = normalize_base(base.clone());
    match base.join(path.trim_start_matches('/')) {
        Ok(url) => url,
        // 去掉开头的 `/` 后只会是相对路径，不会解析失败
        Err(_) => base,
    }
}

/// 服务端 `/images/` 下某张图片的地址，标识符作为单独一段路径转义
pub fn image_url(base: &Url, identifier: &str) -> Url {
    let mut url = normalize_base(base.clone());
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push("images").push(identifier);
    }
    url
}

/// 保证路径以 `/` 结尾，否则 `join` 会替换掉最后一段
fn normalize_base(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

/// 成功状态解析为 `T`，失败状态取出 `message`
async fn parse<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let status = resp.status();
    let body = resp.bytes().await?;
    if status.is_success() {
        return Ok(serde_json::from_slice(&body)?);
    }
    // 不是 JSON 的错误页面按响应格式错误处理
    let body: ErrorBody = serde_json::from_slice(&body)?;
    if let Some(error) = &body.error {
        debug!("服务端错误类别: {error}");
    }
    Err(ClientError::Backend { status, message: body.message })
}
