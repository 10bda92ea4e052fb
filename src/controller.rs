use std::sync::Arc;

use log::{debug, error, info, warn};

use crate::client::{ClientError, IndexedGallery, SearchResult};
use crate::config::Messages;
use crate::file::{AcquireSource, Acquisition, CandidateFile, acquire};
use crate::preview::{PreviewError, PreviewHandle};
use crate::selection::Selection;
use crate::view::{GalleryView, Panel, PanelId, ResultView, View};

/// 搜索流程的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// 尚未启动
    Idle,
    /// 等待用户选择图片
    AwaitingSelection,
    /// 已选择图片，可以搜索
    Ready,
    /// 请求进行中
    Searching,
    Succeeded,
    Failed,
}

/// 输入事件，包括用户操作和异步任务的完成通知
#[derive(Debug)]
pub enum Event {
    /// 界面准备就绪
    Started,
    DragOver,
    DragLeave,
    Acquire(AcquireSource),
    Clear,
    SearchRequested,
    PreviewDecoded { generation: u64, result: Result<PreviewHandle, PreviewError> },
    SearchFinished { generation: u64, outcome: Result<SearchResult, ClientError> },
    GalleryLoaded(Result<IndexedGallery, ClientError>),
    /// 退出事件循环
    Quit,
}

impl Event {
    /// 是否为某个 `Command` 的完成通知
    pub fn is_completion(&self) -> bool {
        matches!(
            self,
            Event::PreviewDecoded { .. } | Event::SearchFinished { .. } | Event::GalleryLoaded(_)
        )
    }
}

/// 需要异步执行的任务，完成后以 `Event` 的形式返回
#[derive(Debug, Clone)]
pub enum Command {
    DecodePreview { generation: u64, file: Arc<CandidateFile> },
    Search { generation: u64, file: Arc<CandidateFile> },
    LoadGallery,
}

/// 界面状态机
///
/// 所有状态都在 `update` 中修改，`update` 本身不做任何 IO，
/// 只返回需要执行的 `Command`。
pub struct Controller<V: View> {
    view: V,
    messages: Messages,
    state: SearchState,
    selection: Selection,
    /// 当前选择的预览，解码完成前为空
    preview: Option<PreviewHandle>,
    gallery_requested: bool,
}

impl<V: View> Controller<V> {
    pub fn new(view: V, messages: Messages) -> Self {
        Self {
            view,
            messages,
            state: SearchState::Idle,
            selection: Selection::new(),
            preview: None,
            gallery_requested: false,
        }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn selection(&self) -> Option<&Arc<CandidateFile>> {
        self.selection.current()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// 只有选择了图片并且没有进行中的搜索时才能搜索
    pub fn can_search(&self) -> bool {
        !self.selection.is_empty() && self.state != SearchState::Searching
    }

    pub fn update(&mut self, event: Event) -> Option<Command> {
        match event {
            Event::Started => self.start(),
            Event::DragOver => {
                self.view.show(Panel::DropHighlight);
                None
            }
            Event::DragLeave => {
                self.view.hide(PanelId::DropHighlight);
                None
            }
            Event::Acquire(source) => self.acquire(source),
            Event::Clear => {
                self.clear();
                None
            }
            Event::SearchRequested => self.begin_search(),
            Event::PreviewDecoded { generation, result } => {
                self.preview_decoded(generation, result);
                None
            }
            Event::SearchFinished { generation, outcome } => {
                self.finish_search(generation, outcome);
                None
            }
            Event::GalleryLoaded(result) => {
                self.gallery_loaded(result);
                None
            }
            Event::Quit => None,
        }
    }

    fn start(&mut self) -> Option<Command> {
        if self.gallery_requested {
            return None;
        }
        self.gallery_requested = true;
        if self.state == SearchState::Idle {
            self.set_state(SearchState::AwaitingSelection);
        }
        self.view.show(Panel::Upload);
        self.sync_trigger();
        Some(Command::LoadGallery)
    }

    fn acquire(&mut self, source: AcquireSource) -> Option<Command> {
        if source.is_drop() {
            self.view.hide(PanelId::DropHighlight);
        }
        match acquire(source) {
            Acquisition::Empty => None,
            Acquisition::Rejected(file) => {
                info!("拒绝非图片文件: {} ({})", file.name, file.media_type);
                self.show_error(self.messages.invalid_file.to_string());
                None
            }
            Acquisition::Accepted(file) => {
                debug!("选择图片: {}", file.name);
                let generation = self.selection.select(file);
                self.preview = None;
                if self.state != SearchState::Searching {
                    self.set_state(SearchState::Ready);
                }
                self.sync_trigger();
                let file = self.selection.current().cloned()?;
                Some(Command::DecodePreview { generation, file })
            }
        }
    }

    fn preview_decoded(&mut self, generation: u64, result: Result<PreviewHandle, PreviewError>) {
        if !self.selection.is_current(generation) {
            debug!("丢弃过期的预览 (generation {generation})");
            return;
        }
        match result {
            Ok(preview) => {
                self.preview = Some(preview.clone());
                self.view.show(Panel::Preview(preview));
                self.view.hide(PanelId::Upload);
            }
            Err(e) => {
                warn!("{e}");
                self.selection.clear();
                self.preview = None;
                self.view.hide(PanelId::Preview);
                self.view.show(Panel::Upload);
                if self.state != SearchState::Searching {
                    self.set_state(SearchState::AwaitingSelection);
                }
                self.sync_trigger();
                self.show_error(self.messages.invalid_file.to_string());
            }
        }
    }

    fn clear(&mut self) {
        self.selection.clear();
        self.preview = None;
        self.view.reset_picker();
        self.view.hide(PanelId::Preview);
        self.view.show(Panel::Upload);
        self.view.hide(PanelId::Result);
        self.view.hide(PanelId::Error);
        if self.state != SearchState::Searching {
            self.set_state(SearchState::AwaitingSelection);
        }
        self.sync_trigger();
    }

    fn begin_search(&mut self) -> Option<Command> {
        if self.state == SearchState::Searching {
            debug!("已有搜索在进行中");
            return None;
        }
        let Some(file) = self.selection.current().cloned() else {
            debug!("没有选择图片，忽略搜索");
            return None;
        };
        let generation = self.selection.generation();

        self.set_state(SearchState::Searching);
        self.view.set_search_enabled(false);
        self.view.show(Panel::Busy);
        self.view.hide(PanelId::Result);
        self.view.hide(PanelId::Error);

        info!("正在搜索 {}", file.name);
        Some(Command::Search { generation, file })
    }

    fn finish_search(&mut self, generation: u64, outcome: Result<SearchResult, ClientError>) {
        if self.state != SearchState::Searching {
            debug!("没有进行中的搜索，忽略响应");
            return;
        }

        let next = if !self.selection.is_current(generation) {
            debug!("选择已改变，丢弃搜索结果");
            None
        } else {
            match outcome {
                Ok(result) => {
                    info!("最相似图片: {} ({}%)", result.match_image, result.percentage);
                    self.show_result(result);
                    Some(SearchState::Succeeded)
                }
                Err(e) => {
                    warn!("搜索失败: {e}");
                    self.show_error(e.user_message(&self.messages));
                    Some(SearchState::Failed)
                }
            }
        };

        // 无论成功与否都要恢复按钮状态
        self.view.hide(PanelId::Busy);
        let next = next.unwrap_or(if self.selection.is_empty() {
            SearchState::AwaitingSelection
        } else {
            SearchState::Ready
        });
        self.set_state(next);
        self.sync_trigger();
    }

    fn gallery_loaded(&mut self, result: Result<IndexedGallery, ClientError>) {
        match result {
            Ok(gallery) => {
                info!("已索引图片: {}", gallery.indexed_images);
                self.view.show(Panel::Gallery(GalleryView::from(gallery)));
            }
            Err(e) => error!("加载已索引图片失败: {e}"),
        }
    }

    fn show_result(&mut self, result: SearchResult) {
        // 预览尚未解码完成时直接使用上传的文件内容
        let sent = self
            .preview
            .clone()
            .or_else(|| self.selection.current().map(|file| PreviewHandle::from_file(file)));
        self.view.show(Panel::Result(ResultView::new(result, sent)));
        self.view.hide(PanelId::Error);
        self.view.scroll_into_view(PanelId::Result);
    }

    fn show_error(&mut self, message: String) {
        self.view.show(Panel::Error(message));
        self.view.hide(PanelId::Result);
    }

    fn sync_trigger(&mut self) {
        let enabled = self.can_search();
        self.view.set_search_enabled(enabled);
    }

    fn set_state(&mut self, state: SearchState) {
        if self.state != state {
            debug!("状态 {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }
}
