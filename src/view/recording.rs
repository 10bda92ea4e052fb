use std::collections::HashMap;

use super::{GalleryView, Panel, PanelId, ResultView, View};
use crate::preview::PreviewHandle;

/// 只在内存中记录界面状态的实现，用于无界面运行和测试
#[derive(Debug, Default)]
pub struct RecordingView {
    visible: HashMap<PanelId, Panel>,
    search_enabled: bool,
    picker_resets: usize,
    scrolls: Vec<PanelId>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self, panel: PanelId) -> bool {
        self.visible.contains_key(&panel)
    }

    pub fn panel(&self, panel: PanelId) -> Option<&Panel> {
        self.visible.get(&panel)
    }

    pub fn search_enabled(&self) -> bool {
        self.search_enabled
    }

    pub fn is_busy(&self) -> bool {
        self.is_visible(PanelId::Busy)
    }

    pub fn error(&self) -> Option<&str> {
        match self.visible.get(&PanelId::Error) {
            Some(Panel::Error(message)) => Some(message),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&ResultView> {
        match self.visible.get(&PanelId::Result) {
            Some(Panel::Result(result)) => Some(result),
            _ => None,
        }
    }

    pub fn preview(&self) -> Option<&PreviewHandle> {
        match self.visible.get(&PanelId::Preview) {
            Some(Panel::Preview(preview)) => Some(preview),
            _ => None,
        }
    }

    pub fn gallery(&self) -> Option<&GalleryView> {
        match self.visible.get(&PanelId::Gallery) {
            Some(Panel::Gallery(gallery)) => Some(gallery),
            _ => None,
        }
    }

    pub fn picker_resets(&self) -> usize {
        self.picker_resets
    }

    pub fn scrolls(&self) -> &[PanelId] {
        &self.scrolls
    }
}

impl View for RecordingView {
    fn show(&mut self, panel: Panel) {
        self.visible.insert(panel.id(), panel);
    }

    fn hide(&mut self, panel: PanelId) {
        self.visible.remove(&panel);
    }

    fn set_search_enabled(&mut self, enabled: bool) {
        self.search_enabled = enabled;
    }

    fn reset_picker(&mut self) {
        self.picker_resets += 1;
    }

    fn scroll_into_view(&mut self, panel: PanelId) {
        self.scrolls.push(panel);
    }
}
