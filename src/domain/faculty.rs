// ==========================================
// 学生档案后端 - 学院领域模型
// ==========================================
// 对齐: faculties 表
// 用途: 学生的可选关联 (faculty)，按需预加载
// ==========================================

use crate::repository::{Record, ToPersistable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faculty {
    pub id: i64,
    pub name: String, // 学院名称
}

/// 新建学院（不含 id，由数据库生成）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFaculty {
    pub name: String,
}

impl NewFaculty {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl ToPersistable for NewFaculty {
    fn to_persistable(&self) -> Record {
        let mut record = Record::new();
        record.insert("name".into(), self.name.clone().into());
        record
    }
}
