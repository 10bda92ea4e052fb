use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;

use super::read_files;
use crate::cli::SubCommandExtend;
use crate::client::HttpBackend;
use crate::config::{Opts, OutputFormat};
use crate::controller::{Event, SearchState};
use crate::file::AcquireSource;
use crate::runtime::App;
use crate::view::TerminalView;

#[derive(Parser, Debug, Clone)]
pub struct SearchCommand {
    /// 被搜索的图片路径，提供多张时只使用第一张
    #[arg(required = true)]
    pub images: Vec<PathBuf>,
    /// 输出格式
    #[arg(long, value_name = "FORMAT", value_enum, default_value_t)]
    pub output_format: OutputFormat,
}

impl SubCommandExtend for SearchCommand {
    async fn run(&self, opts: &Opts) -> Result<()> {
        let files = read_files(&self.images).await?;

        let backend = HttpBackend::new(opts.server.clone())?;
        let view = TerminalView::stdout(backend.base().clone(), self.output_format);
        let mut app = App::new(backend, view, opts.lang.messages());

        // 先等待预览解码完成，损坏的图片不会被上传
        app.dispatch(Event::Acquire(AcquireSource::Picker(files)));
        app.run_until_idle().await;

        app.dispatch(Event::SearchRequested);
        app.run_until_idle().await;

        match app.controller().state() {
            SearchState::Succeeded => Ok(()),
            state => Err(anyhow!("搜索未成功 ({state:?})")),
        }
    }
}
