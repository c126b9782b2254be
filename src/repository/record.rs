// ==========================================
// 学生档案后端 - 普通记录与持久化能力
// ==========================================
// 职责: 定义后端读写的属性映射，以及富领域对象的"展平"能力
// ==========================================

use serde_json::{Map, Value};

/// 普通属性映射（字段名 → 标量值）
pub type Record = Map<String, Value>;

/// 主键字段名
pub const ID_FIELD: &str = "id";

// ==========================================
// Trait: ToPersistable
// ==========================================
// 用途: 富领域对象在持久化前展平为普通记录
// 实现者: NewStudent / StudentPatch / NewFaculty / Record 本身
pub trait ToPersistable {
    /// 返回一份新的普通记录（不得修改 self）
    fn to_persistable(&self) -> Record;
}

impl ToPersistable for Record {
    fn to_persistable(&self) -> Record {
        self.clone()
    }
}
