use std::path::Path;

use anyhow::Result;
use clap::Parser;
use futures::{Stream, StreamExt, stream};
use log::warn;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::cli::SubCommandExtend;
use crate::client::HttpBackend;
use crate::config::{Opts, OutputFormat};
use crate::controller::Event;
use crate::file::{AcquireSource, CandidateFile};
use crate::runtime::App;
use crate::view::TerminalView;

const USAGE: &str = "drop <FILE>... | pick <FILE>... | hover | leave | clear | search | quit";

#[derive(Parser, Debug, Clone)]
pub struct InteractiveCommand {
    /// 输出格式
    #[arg(long, value_name = "FORMAT", value_enum, default_value_t)]
    pub output_format: OutputFormat,
}

impl SubCommandExtend for InteractiveCommand {
    async fn run(&self, opts: &Opts) -> Result<()> {
        let backend = HttpBackend::new(opts.server.clone())?;
        let view = TerminalView::stdout(backend.base().clone(), self.output_format);
        let mut app = App::new(backend, view, opts.lang.messages());

        eprintln!("{USAGE}");
        app.dispatch(Event::Started);
        let input = app.subscribe(input_events(BufReader::new(tokio::io::stdin())));
        app.run().await;
        input.cancel();
        // 退出前等待进行中的预览和搜索，保证结果已经输出
        app.run_until_idle().await;
        Ok(())
    }
}

/// 将逐行输入的指令转换为事件，输入结束时产生 `Event::Quit`
pub fn input_events<R>(reader: R) -> impl Stream<Item = Event> + Send
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    let lines = stream::unfold(reader.lines(), |mut lines| async move {
        match lines.next_line().await {
            Ok(Some(line)) => Some((line, lines)),
            Ok(None) => None,
            Err(e) => {
                warn!("读取输入失败: {e}");
                None
            }
        }
    });
    lines
        .filter_map(|line| async move { parse_line(&line).await })
        .chain(stream::once(async { Event::Quit }))
}

/// 解析一行指令
pub async fn parse_line(line: &str) -> Option<Event> {
    let mut words = line.split_whitespace();
    let event = match words.next()? {
        "drop" => Event::Acquire(AcquireSource::Drop(open_all(words).await)),
        "pick" => Event::Acquire(AcquireSource::Picker(open_all(words).await)),
        "hover" => Event::DragOver,
        "leave" => Event::DragLeave,
        "clear" => Event::Clear,
        "search" => Event::SearchRequested,
        "quit" | "exit" => Event::Quit,
        other => {
            warn!("未知指令: {other}");
            eprintln!("{USAGE}");
            return None;
        }
    };
    Some(event)
}

/// 读取失败的文件会被跳过
async fn open_all<'a>(paths: impl Iterator<Item = &'a str>) -> Vec<CandidateFile> {
    let mut files = vec![];
    for path in paths {
        match CandidateFile::open(Path::new(path)).await {
            Ok(file) => files.push(file),
            Err(e) => warn!("无法读取 {path}: {e}"),
        }
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_parse_simple() {
        assert!(matches!(parse_line("search").await, Some(Event::SearchRequested)));
        assert!(matches!(parse_line("  clear ").await, Some(Event::Clear)));
        assert!(matches!(parse_line("quit").await, Some(Event::Quit)));
        assert!(matches!(parse_line("hover").await, Some(Event::DragOver)));
        assert!(parse_line("").await.is_none());
        assert!(parse_line("bogus").await.is_none());
    }

    #[tokio::test]
    async fn test_parse_drop() -> Result<()> {
        let dir = assert_fs::TempDir::new()?;
        let cat = dir.path().join("cat.png");
        std::fs::write(&cat, b"png")?;
        let missing = dir.path().join("missing.png");

        let line = format!("drop {} {}", missing.display(), cat.display());
        match parse_line(&line).await {
            Some(Event::Acquire(AcquireSource::Drop(files))) => {
                assert_eq!(files.len(), 1);
                assert_eq!(files[0].name, "cat.png");
                assert_eq!(files[0].media_type, "image/png");
            }
            other => panic!("unexpected {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_input_events_end_with_quit() {
        let input: &[u8] = b"clear\nsearch\n";
        let events: Vec<Event> = input_events(input).collect().await;
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], Event::Clear));
        assert!(matches!(events[1], Event::SearchRequested));
        assert!(matches!(events[2], Event::Quit));
    }
}
