use clap::{Parser, Subcommand, ValueEnum};
use reqwest::Url;

use crate::cli::*;

#[derive(Parser, Debug, Clone)]
#[command(name = "imsearch-client", version)]
pub struct Opts {
    #[command(subcommand)]
    pub subcmd: SubCommand,
    /// 以图搜图服务地址
    #[arg(short, long, global = true, value_name = "URL", default_value = "http://127.0.0.1:5000/")]
    pub server: Url,
    /// 提示信息使用的语言
    #[arg(short, long, global = true, value_enum, default_value_t = Locale::En)]
    pub lang: Locale,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SubCommand {
    /// 上传一张图片并显示最相似的结果
    Search(SearchCommand),
    /// 显示服务端已索引的图片
    Gallery(GalleryCommand),
    /// 交互模式，逐行读取指令
    Interactive(InteractiveCommand),
    /// 检查服务状态
    Health(HealthCommand),
    /// 让服务端重新索引图片
    Reindex(ReindexCommand),
}

#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    Json,
    #[default]
    Table,
}

/// 界面提示所使用的语言
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    En,
    Pt,
    Zh,
}

impl Locale {
    pub fn messages(self) -> Messages {
        match self {
            Locale::En => Messages {
                invalid_file: "Please select an image file.",
                search_failed: "Failed to search for a similar image.",
                connection_error: "Connection error. Please try again.",
            },
            Locale::Pt => Messages {
                invalid_file: "Por favor, selecione um arquivo de imagem.",
                search_failed: "Erro ao buscar imagem similar.",
                connection_error: "Erro de conexão. Tente novamente.",
            },
            Locale::Zh => Messages {
                invalid_file: "请选择一个图片文件。",
                search_failed: "搜索相似图片失败。",
                connection_error: "连接错误，请重试。",
            },
        }
    }
}

/// 面向用户的提示文本
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Messages {
    /// 选择了非图片文件，或图片无法解码
    pub invalid_file: &'static str,
    /// 服务端返回失败但没有附带 message
    pub search_failed: &'static str,
    /// 网络不可达或响应无法解析
    pub connection_error: &'static str,
}

impl Default for Messages {
    fn default() -> Self {
        Locale::default().messages()
    }
}
