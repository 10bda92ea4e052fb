use std::sync::Arc;

use crate::file::CandidateFile;

/// 当前选中的文件，同一时间最多一个
///
/// 每次选择或清除都会递增 `generation`，异步任务完成时据此判断结果是否已过期。
#[derive(Debug, Default)]
pub struct Selection {
    slot: Option<Arc<CandidateFile>>,
    generation: u64,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// 替换当前选择，返回新的 generation
    pub fn select(&mut self, file: CandidateFile) -> u64 {
        self.generation += 1;
        self.slot = Some(Arc::new(file));
        self.generation
    }

    pub fn clear(&mut self) {
        self.generation += 1;
        self.slot = None;
    }

    pub fn current(&self) -> Option<&Arc<CandidateFile>> {
        self.slot.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// `generation` 是否仍然对应当前的选择
    pub fn is_current(&self, generation: u64) -> bool {
        self.slot.is_some() && self.generation == generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_replaces() {
        let mut sel = Selection::new();
        let g1 = sel.select(CandidateFile::new("a.png", "image/png", vec![]));
        let g2 = sel.select(CandidateFile::new("b.png", "image/png", vec![]));
        assert_ne!(g1, g2);
        assert!(!sel.is_current(g1));
        assert!(sel.is_current(g2));
        assert_eq!(sel.current().unwrap().name, "b.png");
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut sel = Selection::new();
        sel.clear();
        sel.clear();
        assert!(sel.is_empty());

        let g = sel.select(CandidateFile::new("a.png", "image/png", vec![]));
        sel.clear();
        assert!(sel.is_empty());
        assert!(!sel.is_current(g));
    }
}
