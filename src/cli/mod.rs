mod gallery;
mod health;
mod interactive;
mod search;

use std::path::PathBuf;

use anyhow::{Context, anyhow};
use log::warn;

pub use gallery::*;
pub use health::*;
pub use interactive::*;
pub use search::*;

use crate::client::ClientError;
use crate::config::Opts;
use crate::file::CandidateFile;

pub trait SubCommandExtend {
    fn run(&self, opts: &Opts) -> impl std::future::Future<Output = anyhow::Result<()>> + Send;
}

/// 依次读取文件，任何一个读取失败都会返回错误
async fn read_files(paths: &[PathBuf]) -> anyhow::Result<Vec<CandidateFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let file = CandidateFile::open(path)
            .await
            .with_context(|| format!("无法读取 {}", path.display()))?;
        files.push(file);
    }
    Ok(files)
}

/// 记录详细错误，只把用户提示返回给上层
fn report(err: ClientError, opts: &Opts) -> anyhow::Error {
    warn!("{err}");
    anyhow!(err.user_message(&opts.lang.messages()))
}
