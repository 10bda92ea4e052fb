use anyhow::Result;
use clap::Parser;

use crate::cli::SubCommandExtend;
use crate::client::HttpBackend;
use crate::config::{Opts, OutputFormat};
use crate::controller::Event;
use crate::runtime::App;
use crate::view::TerminalView;

#[derive(Parser, Debug, Clone)]
pub struct GalleryCommand {
    /// 输出格式
    #[arg(long, value_name = "FORMAT", value_enum, default_value_t)]
    pub output_format: OutputFormat,
}

impl SubCommandExtend for GalleryCommand {
    async fn run(&self, opts: &Opts) -> Result<()> {
        let backend = HttpBackend::new(opts.server.clone())?;
        let view = TerminalView::stdout(backend.base().clone(), self.output_format);
        let mut app = App::new(backend, view, opts.lang.messages());

        // 加载失败只记录日志，与界面中的行为一致
        app.dispatch(Event::Started);
        app.run_until_idle().await;
        Ok(())
    }
}
