mod recording;
mod terminal;

pub use self::recording::*;
pub use self::terminal::*;
use reqwest::Url;

use crate::client::{IndexedGallery, SearchResult, image_url};
use crate::preview::PreviewHandle;

/// 渲染接口
///
/// 状态机只通过这里修改界面，因此可以在没有真实界面的情况下测试。
pub trait View {
    /// 显示一个面板，同类面板的旧内容会被替换
    fn show(&mut self, panel: Panel);

    /// 隐藏一个面板，面板本来就不可见时什么也不做
    fn hide(&mut self, panel: PanelId);

    /// 设置搜索按钮是否可用
    fn set_search_enabled(&mut self, enabled: bool);

    /// 重置文件选择器，使同一个文件可以立即被再次选择
    fn reset_picker(&mut self) {}

    /// 将面板滚动到可见区域，顶部对齐
    fn scroll_into_view(&mut self, _panel: PanelId) {}
}

#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    /// 上传区域
    Upload,
    /// 拖拽经过上传区域时的高亮
    DropHighlight,
    /// 已选择图片的预览
    Preview(PreviewHandle),
    /// 搜索中，替换搜索按钮的文字
    Busy,
    Result(ResultView),
    Error(String),
    Gallery(GalleryView),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    Upload,
    DropHighlight,
    Preview,
    Busy,
    Result,
    Error,
    Gallery,
}

impl Panel {
    pub fn id(&self) -> PanelId {
        match self {
            Panel::Upload => PanelId::Upload,
            Panel::DropHighlight => PanelId::DropHighlight,
            Panel::Preview(_) => PanelId::Preview,
            Panel::Busy => PanelId::Busy,
            Panel::Result(_) => PanelId::Result,
            Panel::Error(_) => PanelId::Error,
            Panel::Gallery(_) => PanelId::Gallery,
        }
    }
}

/// 服务端 `/images/` 下的一张图片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef(pub String);

impl ImageRef {
    pub fn identifier(&self) -> &str {
        &self.0
    }

    /// 在给定服务地址下的完整地址
    pub fn url(&self, base: &Url) -> Url {
        image_url(base, &self.0)
    }
}

/// 搜索结果面板的内容
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    /// 上传的图片，预览尚未解码完成时为空
    pub sent: Option<PreviewHandle>,
    pub matched: ImageRef,
    pub percentage: f64,
    pub similarity: Option<f64>,
}

impl ResultView {
    pub fn new(result: SearchResult, sent: Option<PreviewHandle>) -> Self {
        Self {
            sent,
            matched: ImageRef(result.match_image),
            percentage: result.percentage,
            similarity: result.similarity,
        }
    }

    pub fn filename(&self) -> &str {
        self.matched.identifier()
    }

    /// 例如 `92%`，数值按服务端给出的原样显示
    pub fn percentage_label(&self) -> String {
        format!("{}%", self.percentage)
    }

    /// 相似度条的宽度，占整条的百分比
    pub fn bar_width(&self) -> f64 {
        if self.percentage.is_nan() { 0.0 } else { self.percentage.clamp(0.0, 100.0) }
    }
}

/// 缩略图
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub image: ImageRef,
    pub alt: String,
    /// 延迟加载：接近可见区域时才请求图片内容
    pub lazy: bool,
}

/// 已索引图片的网格
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryView {
    pub count: usize,
    pub thumbnails: Vec<Thumbnail>,
}

impl From<IndexedGallery> for GalleryView {
    fn from(gallery: IndexedGallery) -> Self {
        let thumbnails = gallery
            .indexed_files
            .into_iter()
            .map(|name| Thumbnail { alt: name.clone(), image: ImageRef(name), lazy: true })
            .collect();
        Self { count: gallery.indexed_images, thumbnails }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(percentage: f64) -> ResultView {
        ResultView::new(
            SearchResult { match_image: "cat2.png".to_string(), percentage, similarity: None },
            None,
        )
    }

    #[test]
    fn test_percentage_label() {
        assert_eq!(result(92.0).percentage_label(), "92%");
        assert_eq!(result(87.5).percentage_label(), "87.5%");
        assert_eq!(result(0.0).percentage_label(), "0%");
    }

    #[test]
    fn test_bar_width() {
        assert_eq!(result(92.0).bar_width(), 92.0);
        assert_eq!(result(100.0).bar_width(), 100.0);
        assert_eq!(result(130.0).bar_width(), 100.0);
        assert_eq!(result(-3.0).bar_width(), 0.0);
        assert_eq!(result(f64::NAN).bar_width(), 0.0);
    }

    #[test]
    fn test_image_url() {
        let base = Url::parse("http://127.0.0.1:5000/").unwrap();
        assert_eq!(result(1.0).matched.url(&base).path(), "/images/cat2.png");
        assert_eq!(ImageRef("cat#1.png".into()).url(&base).path(), "/images/cat%231.png");
    }

    #[test]
    fn test_gallery_keeps_order() {
        let gallery = GalleryView::from(IndexedGallery {
            indexed_images: 3,
            indexed_files: vec!["a.jpg".into(), "b.jpg".into(), "c.jpg".into()],
        });
        assert_eq!(gallery.count, 3);
        let names: Vec<_> = gallery.thumbnails.iter().map(|t| t.image.identifier()).collect();
        assert_eq!(names, ["a.jpg", "b.jpg", "c.jpg"]);
        assert!(gallery.thumbnails.iter().all(|t| t.lazy));
        assert_eq!(gallery.thumbnails[1].alt, "b.jpg");
    }
}
