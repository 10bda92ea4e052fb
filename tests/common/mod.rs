#![allow(dead_code)]

use std::io::Cursor;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum_typed_multipart::{FieldData, TryFromMultipart, TypedMultipart};
use image::{ImageFormat, RgbImage};
use reqwest::Url;
use tokio::net::TcpListener;

/// 上传表单，字段名与客户端一致
#[derive(TryFromMultipart)]
pub struct SearchForm {
    pub image: FieldData<Bytes>,
}

/// 服务端收到的一次上传
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// 模拟的以图搜图服务
#[derive(Clone)]
pub struct MockServer {
    pub search: (StatusCode, String),
    pub api: (StatusCode, String),
    pub uploads: Arc<Mutex<Vec<Upload>>>,
}

impl MockServer {
    pub fn new() -> Self {
        Self {
            search: (
                StatusCode::OK,
                r#"{"match_image": "cat2.png", "similarity": 0.9213, "percentage": 92}"#.into(),
            ),
            api: (
                StatusCode::OK,
                r#"{"indexed_images": 3, "indexed_files": ["a.jpg", "b.jpg", "c.jpg"]}"#.into(),
            ),
            uploads: Arc::default(),
        }
    }

    pub fn search_reply(mut self, status: StatusCode, body: &str) -> Self {
        self.search = (status, body.to_string());
        self
    }

    pub fn api_reply(mut self, status: StatusCode, body: &str) -> Self {
        self.api = (status, body.to_string());
        self
    }

    pub fn uploads(&self) -> Vec<Upload> {
        self.uploads.lock().unwrap().clone()
    }

    /// 在随机端口上启动，返回服务地址
    pub async fn start(&self) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new()
            .route("/search", post(search_handler))
            .route("/api", get(api_handler))
            .route("/health", get(health_handler))
            .route("/reindex", post(reindex_handler))
            .with_state(self.clone());
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        Url::parse(&format!("http://{addr}/")).unwrap()
    }
}

async fn search_handler(
    State(state): State<MockServer>,
    TypedMultipart(form): TypedMultipart<SearchForm>,
) -> (StatusCode, String) {
    state.uploads.lock().unwrap().push(Upload {
        file_name: form.image.metadata.file_name.clone(),
        content_type: form.image.metadata.content_type.clone(),
        data: form.image.contents.to_vec(),
    });
    state.search.clone()
}

async fn api_handler(State(state): State<MockServer>) -> (StatusCode, String) {
    state.api.clone()
}

async fn health_handler() -> (StatusCode, String) {
    (StatusCode::OK, r#"{"status": "healthy", "indexed_images": 3}"#.into())
}

async fn reindex_handler() -> (StatusCode, String) {
    (
        StatusCode::OK,
        r#"{"status": "success", "message": "Reindexing done", "indexed_images": 4}"#.into(),
    )
}

/// 一个没有服务监听的地址
pub fn offline() -> Url {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}/")).unwrap()
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    let mut buf = Cursor::new(vec![]);
    RgbImage::new(width, height).write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}
