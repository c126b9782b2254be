// ==========================================
// 学生档案后端 - 持久化后端契约
// ==========================================
// 职责: 描述"每个实体类型一个模型句柄"的后端能力
// 形态: create / find_unique / update / delete，参数为 { data, where, include }
// 实现者: SqliteModel（使用 rusqlite）
// ==========================================

use crate::repository::error::ModelResult;
use crate::repository::include::Include;
use crate::repository::record::Record;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;

/// 按主键定位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WhereUnique {
    pub id: i64,
}

// ==========================================
// RecordCheck - 写入后、提交前的记录校验
// ==========================================
// 后端在同一事务内读回记录并执行校验；校验失败则回滚
#[derive(Clone, Copy)]
pub struct RecordCheck(fn(&Record) -> Result<(), String>);

impl RecordCheck {
    pub fn new(check: fn(&Record) -> Result<(), String>) -> Self {
        Self(check)
    }

    /// 记录必须能解码为实体 `T`
    pub fn decodes_as<T: DeserializeOwned>() -> Self {
        Self(decodes::<T>)
    }

    pub fn run(&self, record: &Record) -> Result<(), String> {
        (self.0)(record)
    }
}

impl fmt::Debug for RecordCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RecordCheck")
    }
}

fn decodes<T: DeserializeOwned>(record: &Record) -> Result<(), String> {
    serde_json::from_value::<T>(Value::Object(record.clone()))
        .map(|_| ())
        .map_err(|e| format!("记录无法解码为实体: {}", e))
}

#[derive(Debug, Clone)]
pub struct CreateArgs {
    pub data: Record,
    pub include: Option<Include>,
    pub check: Option<RecordCheck>,
}

#[derive(Debug, Clone)]
pub struct FindUniqueArgs {
    pub where_unique: WhereUnique,
    pub include: Option<Include>,
}

#[derive(Debug, Clone)]
pub struct UpdateArgs {
    pub where_unique: WhereUnique,
    pub data: Record,
    pub include: Option<Include>,
    pub check: Option<RecordCheck>,
}

#[derive(Debug, Clone)]
pub struct DeleteArgs {
    pub where_unique: WhereUnique,
    pub include: Option<Include>,
}

// ==========================================
// ModelDelegate Trait
// ==========================================
// 约定: 记录不存在返回 Ok(None)，不是错误
#[async_trait]
pub trait ModelDelegate: Send + Sync {
    /// 模型名（用于错误与日志）
    fn model_name(&self) -> &str;

    /// 插入新记录，返回持久化后的记录（含生成的 id 与预加载关联）
    ///
    /// 带 check 时，校验失败必须撤销本次插入
    async fn create(&self, args: CreateArgs) -> ModelResult<Record>;

    async fn find_unique(&self, args: FindUniqueArgs) -> ModelResult<Option<Record>>;

    /// 部分更新；data 为空时等价于读取。校验失败必须撤销本次更新
    async fn update(&self, args: UpdateArgs) -> ModelResult<Option<Record>>;

    /// 删除并返回删除前的最后状态
    async fn delete(&self, args: DeleteArgs) -> ModelResult<Option<Record>>;
}
