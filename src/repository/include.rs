// ==========================================
// 学生档案后端 - 关联预加载描述
// ==========================================
// 说明: 由仓储实例在构造时持有，调用方无需记忆需预加载的关联
// ==========================================

use std::collections::BTreeSet;

/// 关联预加载描述（按关联名）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Include {
    relations: BTreeSet<String>,
}

impl Include {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一个需预加载的关联
    pub fn relation(mut self, name: impl Into<String>) -> Self {
        self.relations.insert(name.into());
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.relations.contains(name)
    }

    pub fn relations(&self) -> impl Iterator<Item = &str> {
        self.relations.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }
}
