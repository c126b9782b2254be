// ==========================================
// 学生档案后端 - 通用仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 红线: 仓储是访问持久化后端的唯一入口
// ==========================================
// 职责: 对任意实体类型提供统一的 CRUD 语义
// 说明: 关联预加载描述在构造时绑定，调用方无需重复指定
// ==========================================

use crate::repository::error::{Operation, PersistenceError, PersistenceResult};
use crate::repository::include::Include;
use crate::repository::model::{
    CreateArgs, DeleteArgs, FindUniqueArgs, ModelDelegate, RecordCheck, UpdateArgs, WhereUnique,
};
use crate::repository::record::{Record, ToPersistable, ID_FIELD};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

// ==========================================
// GenericRepository<T, M>
// ==========================================
/// 通用仓储
///
/// - `T`: 实体类型（由后端记录反序列化而来）
/// - `M`: 实体对应的模型句柄
///
/// 并发: 不加应用层锁，同一 id 上的并发更新/删除由后端自身保证原子性
pub struct GenericRepository<T, M> {
    model: Arc<M>,
    includes: Option<Include>,
    _entity: PhantomData<fn() -> T>,
}

impl<T, M> Clone for GenericRepository<T, M> {
    fn clone(&self) -> Self {
        Self {
            model: Arc::clone(&self.model),
            includes: self.includes.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T, M> GenericRepository<T, M>
where
    T: DeserializeOwned,
    M: ModelDelegate,
{
    /// 创建新的 GenericRepository 实例
    ///
    /// # 参数
    /// - `model`: 实体对应的模型句柄
    /// - `includes`: 每次返回实体时应用的关联预加载描述
    pub fn new(model: Arc<M>, includes: Option<Include>) -> Self {
        Self {
            model,
            includes,
            _entity: PhantomData,
        }
    }

    pub fn includes(&self) -> Option<&Include> {
        self.includes.as_ref()
    }

    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }

    /// 创建实体
    ///
    /// 输入先展平为普通记录再交给后端；读回的记录无法解码为 `T` 时后端撤销插入
    ///
    /// # 返回
    /// - Ok(T): 持久化后的实体
    /// - Err(PersistenceError): 后端失败
    pub async fn create<D>(&self, data: &D) -> PersistenceResult<T>
    where
        D: ToPersistable + ?Sized,
    {
        let args = CreateArgs {
            data: data.to_persistable(),
            include: self.includes.clone(),
            check: Some(RecordCheck::decodes_as::<T>()),
        };

        let record = self
            .model
            .create(args)
            .await
            .map_err(|e| self.fail(Operation::Create, None, e))?;

        let entity = self.decode(Operation::Create, None, record)?;
        tracing::debug!(model = self.model_name(), "实体已创建");
        Ok(entity)
    }

    /// 按主键查询
    ///
    /// # 返回
    /// - Ok(Some(T)): 找到实体（已应用关联预加载）
    /// - Ok(None): 未找到
    /// - Err(PersistenceError): 后端失败，消息包含 id
    pub async fn fetch_by_id(&self, id: i64) -> PersistenceResult<Option<T>> {
        let args = FindUniqueArgs {
            where_unique: WhereUnique { id },
            include: self.includes.clone(),
        };

        let record = self
            .model
            .find_unique(args)
            .await
            .map_err(|e| self.fail(Operation::FetchById, Some(id), e))?;

        record
            .map(|r| self.decode(Operation::FetchById, Some(id), r))
            .transpose()
    }

    /// 部分更新
    ///
    /// 载荷中的 `id` 会被丢弃（id 不可变）；调用方的载荷不会被修改。
    /// 空载荷等价于一次无变更的更新。更新后的记录无法解码为 `T` 时后端撤销更新。
    ///
    /// # 返回
    /// - Ok(Some(T)): 更新后的实体
    /// - Ok(None): 未找到
    /// - Err(PersistenceError): 后端失败，消息包含 id
    pub async fn update<P>(&self, id: i64, partial: &P) -> PersistenceResult<Option<T>>
    where
        P: ToPersistable + ?Sized,
    {
        let data = strip_id(partial.to_persistable());
        let args = UpdateArgs {
            where_unique: WhereUnique { id },
            data,
            include: self.includes.clone(),
            check: Some(RecordCheck::decodes_as::<T>()),
        };

        let record = self
            .model
            .update(args)
            .await
            .map_err(|e| self.fail(Operation::Update, Some(id), e))?;

        record
            .map(|r| self.decode(Operation::Update, Some(id), r))
            .transpose()
    }

    /// 删除实体
    ///
    /// # 返回
    /// - Ok(Some(T)): 删除前的最后状态
    /// - Ok(None): 未找到
    /// - Err(PersistenceError): 后端失败，消息包含 id
    pub async fn delete(&self, id: i64) -> PersistenceResult<Option<T>> {
        let args = DeleteArgs {
            where_unique: WhereUnique { id },
            include: self.includes.clone(),
        };

        let record = self
            .model
            .delete(args)
            .await
            .map_err(|e| self.fail(Operation::Delete, Some(id), e))?;

        record
            .map(|r| self.decode(Operation::Delete, Some(id), r))
            .transpose()
    }

    fn decode(&self, operation: Operation, id: Option<i64>, record: Record) -> PersistenceResult<T> {
        serde_json::from_value(Value::Object(record)).map_err(|e| {
            self.fail(
                operation,
                id,
                format!("记录无法解码为实体: {}", e),
            )
        })
    }

    fn fail(
        &self,
        operation: Operation,
        id: Option<i64>,
        cause: impl std::fmt::Display,
    ) -> PersistenceError {
        let err = PersistenceError::new(operation, self.model_name(), id, cause);
        tracing::warn!(error = %err, "仓储操作失败");
        err
    }
}

/// 去掉 id 字段（拷贝后的记录）
fn strip_id(mut data: Record) -> Record {
    data.remove(ID_FIELD);
    data
}
