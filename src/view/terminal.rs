use std::io::{self, Stdout, Write};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, warn};
use reqwest::Url;
use serde_json::json;

use super::{GalleryView, ImageRef, Panel, PanelId, ResultView, View};
use crate::config::OutputFormat;

/// 相似度条的字符宽度
const BAR_CHARS: usize = 20;

/// 输出到终端的界面
pub struct TerminalView<W: Write = Stdout> {
    base: Url,
    format: OutputFormat,
    out: W,
    spinner: Option<ProgressBar>,
}

impl TerminalView<Stdout> {
    pub fn stdout(base: Url, format: OutputFormat) -> Self {
        Self::new(base, format, io::stdout())
    }
}

impl<W: Write> TerminalView<W> {
    pub fn new(base: Url, format: OutputFormat, out: W) -> Self {
        Self { base, format, out, spinner: None }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn url(&self, image: &ImageRef) -> Url {
        image.url(&self.base)
    }

    fn emit(&mut self, text: impl AsRef<str>) {
        if let Err(e) = writeln!(self.out, "{}", text.as_ref()) {
            warn!("无法写入终端: {e}");
        }
    }

    fn render_result(&mut self, result: &ResultView) {
        let url = self.url(&result.matched);
        let text = match self.format {
            OutputFormat::Json => json!({
                "match_image": result.filename(),
                "percentage": result.percentage,
                "similarity": result.similarity,
                "image_url": url.as_str(),
            })
            .to_string(),
            OutputFormat::Table => format!(
                "{}\t[{}]\t{}\t{}",
                result.percentage_label(),
                bar(result.bar_width()),
                result.filename(),
                url
            ),
        };
        self.emit(text);
    }

    fn render_gallery(&mut self, gallery: &GalleryView) {
        let urls: Vec<String> = gallery.thumbnails.iter().map(|t| self.url(&t.image).into()).collect();
        match self.format {
            OutputFormat::Json => {
                let files: Vec<&str> = gallery.thumbnails.iter().map(|t| t.alt.as_str()).collect();
                let text = json!({
                    "indexed_images": gallery.count,
                    "indexed_files": files,
                    "urls": urls,
                });
                self.emit(text.to_string());
            }
            OutputFormat::Table => {
                self.emit(gallery.count.to_string());
                for (thumb, url) in gallery.thumbnails.iter().zip(urls) {
                    self.emit(format!("{}\t{}", thumb.alt, url));
                }
            }
        }
    }

    fn render_error(&mut self, message: &str) {
        let text = match self.format {
            OutputFormat::Json => json!({ "message": message }).to_string(),
            OutputFormat::Table => format!("[!] {message}"),
        };
        self.emit(text);
    }
}

impl<W: Write> View for TerminalView<W> {
    fn show(&mut self, panel: Panel) {
        match panel {
            Panel::Upload | Panel::DropHighlight => {}
            Panel::Preview(preview) => {
                if let OutputFormat::Table = self.format {
                    match preview.dimensions {
                        Some((width, height)) => self.emit(format!("[+] {width}x{height}")),
                        None => self.emit("[+] ?x?"),
                    }
                }
            }
            Panel::Busy => {
                let style = ProgressStyle::with_template("{spinner:.green} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner());
                let pb = ProgressBar::new_spinner().with_style(style).with_message("...");
                pb.enable_steady_tick(Duration::from_millis(100));
                self.spinner = Some(pb);
            }
            Panel::Result(result) => self.render_result(&result),
            Panel::Error(message) => self.render_error(&message),
            Panel::Gallery(gallery) => self.render_gallery(&gallery),
        }
    }

    fn hide(&mut self, panel: PanelId) {
        if panel == PanelId::Busy {
            if let Some(pb) = self.spinner.take() {
                pb.finish_and_clear();
            }
        }
    }

    fn set_search_enabled(&mut self, enabled: bool) {
        debug!("搜索按钮: {}", if enabled { "可用" } else { "禁用" });
    }
}

/// 按百分比绘制相似度条
fn bar(width: f64) -> String {
    let filled = ((width / 100.0) * BAR_CHARS as f64).round() as usize;
    let filled = filled.min(BAR_CHARS);
    format!("{}{}", "#".repeat(filled), "-".repeat(BAR_CHARS - filled))
}
