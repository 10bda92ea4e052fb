use std::sync::Arc;

use futures::{Stream, StreamExt};
use log::debug;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::AbortHandle;

use crate::client::Backend;
use crate::config::Messages;
use crate::controller::{Command, Controller, Event};
use crate::preview::decode_async;
use crate::view::View;

/// 事件源的订阅，drop 时停止转发事件
#[must_use = "订阅被 drop 后会立即取消"]
pub struct Subscription {
    handle: AbortHandle,
}

impl Subscription {
    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// 单线程事件循环
///
/// 所有事件按顺序交给 `Controller` 处理，`Command` 以任务形式执行，
/// 完成后通过同一个通道送回。
pub struct App<B, V: View> {
    controller: Controller<V>,
    backend: Arc<B>,
    tx: UnboundedSender<Event>,
    rx: UnboundedReceiver<Event>,
    /// 尚未完成的 `Command` 数量
    pending: usize,
}

impl<B: Backend + 'static, V: View> App<B, V> {
    pub fn new(backend: B, view: V, messages: Messages) -> Self {
        let (tx, rx) = unbounded_channel();
        Self { controller: Controller::new(view, messages), backend: Arc::new(backend), tx, rx, pending: 0 }
    }

    pub fn controller(&self) -> &Controller<V> {
        &self.controller
    }

    pub fn into_view(self) -> V {
        self.controller.into_view()
    }

    /// 获取可以从其他任务发送事件的句柄
    pub fn sender(&self) -> UnboundedSender<Event> {
        self.tx.clone()
    }

    /// 将一个事件流接入事件循环
    pub fn subscribe<S>(&self, events: S) -> Subscription
    where
        S: Stream<Item = Event> + Send + 'static,
    {
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            let mut events = std::pin::pin!(events);
            while let Some(event) = events.next().await {
                if tx.send(event).is_err() {
                    break;
                }
            }
        });
        Subscription { handle: task.abort_handle() }
    }

    /// 立即处理一个事件
    pub fn dispatch(&mut self, event: Event) {
        if event.is_completion() {
            self.pending = self.pending.saturating_sub(1);
        }
        if let Some(command) = self.controller.update(event) {
            self.execute(command);
        }
    }

    /// 处理事件直到收到 `Event::Quit`
    pub async fn run(&mut self) {
        while let Some(event) = self.rx.recv().await {
            if let Event::Quit = event {
                debug!("退出事件循环");
                break;
            }
            self.dispatch(event);
        }
    }

    /// 处理事件直到所有 `Command` 都已完成
    pub async fn run_until_idle(&mut self) {
        while self.pending > 0 {
            let Some(event) = self.rx.recv().await else {
                break;
            };
            self.dispatch(event);
        }
    }

    fn execute(&mut self, command: Command) {
        self.pending += 1;
        let tx = self.tx.clone();
        match command {
            Command::DecodePreview { generation, file } => {
                tokio::spawn(async move {
                    let result = decode_async(file).await;
                    let _ = tx.send(Event::PreviewDecoded { generation, result });
                });
            }
            Command::Search { generation, file } => {
                let backend = self.backend.clone();
                tokio::spawn(async move {
                    let outcome = backend.search(&file).await;
                    let _ = tx.send(Event::SearchFinished { generation, outcome });
                });
            }
            Command::LoadGallery => {
                let backend = self.backend.clone();
                tokio::spawn(async move {
                    let result = backend.indexed().await;
                    let _ = tx.send(Event::GalleryLoaded(result));
                });
            }
        }
    }
}
