// ==========================================
// 学生档案后端 - SQLite 模型句柄
// ==========================================
// 职责: 以 TableSpec 描述的表结构实现 ModelDelegate
// 约束: 所有值均参数化绑定；表名/列名仅来自静态 TableSpec
// ==========================================

use crate::repository::error::{ModelError, ModelResult};
use crate::repository::include::Include;
use crate::repository::model::{CreateArgs, DeleteArgs, FindUniqueArgs, ModelDelegate, UpdateArgs};
use crate::repository::record::{Record, ID_FIELD};
use async_trait::async_trait;
use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// 表结构描述
// ==========================================

/// 字段 → 列 映射
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub field: &'static str,
    pub column: &'static str,
}

impl ColumnSpec {
    pub const fn new(field: &'static str, column: &'static str) -> Self {
        Self { field, column }
    }
}

/// 多对一关联：本表 foreign_key 字段指向 target 表主键
#[derive(Debug, Clone)]
pub struct RelationSpec {
    pub name: &'static str,
    pub foreign_key: &'static str,
    pub target: TableSpec,
}

#[derive(Debug, Clone)]
pub struct TableSpec {
    pub table: &'static str,
    /// 主键列名（对应字段固定为 `id`）
    pub primary_key: &'static str,
    pub columns: Vec<ColumnSpec>,
    pub relations: Vec<RelationSpec>,
}

impl TableSpec {
    pub fn new(table: &'static str, columns: Vec<ColumnSpec>) -> Self {
        Self {
            table,
            primary_key: "id",
            columns,
            relations: Vec::new(),
        }
    }

    pub fn with_relation(mut self, relation: RelationSpec) -> Self {
        self.relations.push(relation);
        self
    }

    fn column_for(&self, field: &str) -> ModelResult<&'static str> {
        if field == ID_FIELD {
            return Ok(self.primary_key);
        }
        self.columns
            .iter()
            .find(|c| c.field == field)
            .map(|c| c.column)
            .ok_or_else(|| ModelError::UnknownField {
                model: self.table.to_string(),
                field: field.to_string(),
            })
    }

    fn relation(&self, name: &str) -> ModelResult<&RelationSpec> {
        self.relations
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| ModelError::UnknownRelation {
                model: self.table.to_string(),
                relation: name.to_string(),
            })
    }

    fn select_sql(&self) -> String {
        let columns: Vec<&str> = self.columns.iter().map(|c| c.column).collect();
        format!(
            "SELECT {}, {} FROM {} WHERE {} = ?1",
            self.primary_key,
            columns.join(", "),
            self.table,
            self.primary_key
        )
    }
}

// ==========================================
// SqliteModel - 单表模型句柄
// ==========================================
pub struct SqliteModel {
    conn: Arc<Mutex<Connection>>,
    spec: TableSpec,
}

impl SqliteModel {
    /// 从已有连接创建模型句柄
    pub fn new(conn: Arc<Mutex<Connection>>, spec: TableSpec) -> Self {
        Self { conn, spec }
    }

    pub fn spec(&self) -> &TableSpec {
        &self.spec
    }

    /// 获取数据库连接
    fn get_conn(&self) -> ModelResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| ModelError::Lock(e.to_string()))
    }

    /// 校验字段并转换为 (列名, 绑定值) 列表
    fn bind_data(&self, data: &Record) -> ModelResult<Vec<(&'static str, SqlValue)>> {
        data.iter()
            .map(|(field, value)| {
                let column = self.spec.column_for(field)?;
                Ok((column, json_to_sql(field, value)?))
            })
            .collect()
    }

    /// 读取一行并按 include 挂载关联
    fn find_with_includes(
        &self,
        conn: &Connection,
        id: i64,
        include: Option<&Include>,
    ) -> ModelResult<Option<Record>> {
        let Some(mut record) = find_row(conn, &self.spec, id)? else {
            return Ok(None);
        };

        if let Some(include) = include {
            for name in include.relations() {
                let relation = self.spec.relation(name)?;
                let related = match record.get(relation.foreign_key).and_then(Value::as_i64) {
                    Some(fk) => find_row(conn, &relation.target, fk)?
                        .map(Value::Object)
                        .unwrap_or(Value::Null),
                    None => Value::Null,
                };
                record.insert(relation.name.to_string(), related);
            }
        }

        Ok(Some(record))
    }
}

#[async_trait]
impl ModelDelegate for SqliteModel {
    fn model_name(&self) -> &str {
        self.spec.table
    }

    async fn create(&self, args: CreateArgs) -> ModelResult<Record> {
        let bound = self.bind_data(&args.data)?;
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        if bound.is_empty() {
            tx.execute(&format!("INSERT INTO {} DEFAULT VALUES", self.spec.table), [])?;
        } else {
            let columns: Vec<&str> = bound.iter().map(|(c, _)| *c).collect();
            let placeholders: Vec<String> = (1..=bound.len()).map(|i| format!("?{}", i)).collect();
            let sql = format!(
                "INSERT INTO {} ({}) VALUES ({})",
                self.spec.table,
                columns.join(", "),
                placeholders.join(", ")
            );
            tx.execute(&sql, params_from_iter(bound.iter().map(|(_, v)| v)))?;
        }

        let id = tx.last_insert_rowid();
        let record = self
            .find_with_includes(&tx, id, args.include.as_ref())?
            .ok_or(ModelError::Sqlite(rusqlite::Error::QueryReturnedNoRows))?;

        // tx 未提交即被 drop 时自动回滚
        if let Some(check) = args.check {
            check.run(&record).map_err(ModelError::Rejected)?;
        }

        tx.commit()?;
        Ok(record)
    }

    async fn find_unique(&self, args: FindUniqueArgs) -> ModelResult<Option<Record>> {
        let conn = self.get_conn()?;
        self.find_with_includes(&conn, args.where_unique.id, args.include.as_ref())
    }

    async fn update(&self, args: UpdateArgs) -> ModelResult<Option<Record>> {
        let bound = self.bind_data(&args.data)?;
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;
        let mut id = args.where_unique.id;

        if !bound.is_empty() {
            let assignments: Vec<String> = bound
                .iter()
                .enumerate()
                .map(|(i, (column, _))| format!("{} = ?{}", column, i + 1))
                .collect();
            let sql = format!(
                "UPDATE {} SET {} WHERE {} = ?{}",
                self.spec.table,
                assignments.join(", "),
                self.spec.primary_key,
                bound.len() + 1
            );
            let mut values: Vec<SqlValue> = bound.iter().map(|(_, v)| v.clone()).collect();
            values.push(SqlValue::Integer(id));

            let affected = tx.execute(&sql, params_from_iter(values.iter()))?;
            if affected == 0 {
                return Ok(None);
            }

            // 后端本身允许改主键，读回时跟随新 id
            if let Some(new_id) = args.data.get(ID_FIELD).and_then(Value::as_i64) {
                id = new_id;
            }
        }

        let record = self.find_with_includes(&tx, id, args.include.as_ref())?;
        if let (Some(check), Some(record)) = (args.check, record.as_ref()) {
            check.run(record).map_err(ModelError::Rejected)?;
        }

        tx.commit()?;
        Ok(record)
    }

    async fn delete(&self, args: DeleteArgs) -> ModelResult<Option<Record>> {
        let conn = self.get_conn()?;
        let id = args.where_unique.id;

        let Some(last_known) = self.find_with_includes(&conn, id, args.include.as_ref())? else {
            return Ok(None);
        };

        conn.execute(
            &format!(
                "DELETE FROM {} WHERE {} = ?1",
                self.spec.table, self.spec.primary_key
            ),
            params![id],
        )?;

        Ok(Some(last_known))
    }
}

// ==========================================
// 行 ↔ 记录 转换
// ==========================================

fn find_row(conn: &Connection, spec: &TableSpec, id: i64) -> ModelResult<Option<Record>> {
    let mut stmt = conn.prepare(&spec.select_sql())?;
    let record = stmt
        .query_row(params![id], |row| {
            let mut record = Record::new();
            record.insert(ID_FIELD.to_string(), Value::from(row.get::<_, i64>(0)?));
            for (i, column) in spec.columns.iter().enumerate() {
                let value = sql_to_json(row.get_ref(i + 1)?);
                record.insert(column.field.to_string(), value);
            }
            Ok(record)
        })
        .optional()?;
    Ok(record)
}

fn sql_to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::from(bytes.to_vec()),
    }
}

fn json_to_sql(field: &str, value: &Value) -> ModelResult<SqlValue> {
    match value {
        Value::Null => Ok(SqlValue::Null),
        Value::Bool(b) => Ok(SqlValue::Integer(i64::from(*b))),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(SqlValue::Integer(i))
            } else if let Some(f) = n.as_f64() {
                Ok(SqlValue::Real(f))
            } else {
                Err(ModelError::UnsupportedValue {
                    field: field.to_string(),
                    message: format!("数值超出范围: {}", n),
                })
            }
        }
        Value::String(s) => Ok(SqlValue::Text(s.clone())),
        Value::Array(_) | Value::Object(_) => Err(ModelError::UnsupportedValue {
            field: field.to_string(),
            message: "只支持标量值".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::model::{RecordCheck, WhereUnique};
    use serde_json::json;

    fn setup() -> SqliteModel {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE tags (id INTEGER PRIMARY KEY AUTOINCREMENT, label TEXT NOT NULL);
            CREATE TABLE notes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                body TEXT NOT NULL,
                weight REAL,
                tag_id INTEGER REFERENCES tags(id)
            );
            INSERT INTO tags (label) VALUES ('urgent');
            "#,
        )
        .unwrap();

        let tags = TableSpec::new("tags", vec![ColumnSpec::new("label", "label")]);
        let notes = TableSpec::new(
            "notes",
            vec![
                ColumnSpec::new("body", "body"),
                ColumnSpec::new("weight", "weight"),
                ColumnSpec::new("tagId", "tag_id"),
            ],
        )
        .with_relation(RelationSpec {
            name: "tag",
            foreign_key: "tagId",
            target: tags,
        });

        SqliteModel::new(Arc::new(Mutex::new(conn)), notes)
    }

    fn data(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_create_and_find_with_relation() {
        let model = setup();
        let created = model
            .create(CreateArgs {
                data: data(json!({"body": "hola", "weight": 1.5, "tagId": 1})),
                include: Some(Include::new().relation("tag")),
                check: None,
            })
            .await
            .unwrap();

        assert_eq!(created["id"], 1);
        assert_eq!(created["body"], "hola");
        assert_eq!(created["weight"], 1.5);
        assert_eq!(created["tag"]["label"], "urgent");

        let found = model
            .find_unique(FindUniqueArgs {
                where_unique: WhereUnique { id: 1 },
                include: None,
            })
            .await
            .unwrap()
            .unwrap();
        assert!(found.get("tag").is_none());
        assert_eq!(found["tagId"], 1);
    }

    #[tokio::test]
    async fn test_null_foreign_key_attaches_null() {
        let model = setup();
        let created = model
            .create(CreateArgs {
                data: data(json!({"body": "sin etiqueta"})),
                include: Some(Include::new().relation("tag")),
                check: None,
            })
            .await
            .unwrap();

        assert_eq!(created["tag"], Value::Null);
        assert_eq!(created["weight"], Value::Null);
    }

    #[tokio::test]
    async fn test_unknown_field_and_relation_are_errors() {
        let model = setup();
        let err = model
            .create(CreateArgs {
                data: data(json!({"bogus": 1})),
                include: None,
                check: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::UnknownField { .. }));

        model
            .create(CreateArgs {
                data: data(json!({"body": "x"})),
                include: None,
                check: None,
            })
            .await
            .unwrap();
        let err = model
            .find_unique(FindUniqueArgs {
                where_unique: WhereUnique { id: 1 },
                include: Some(Include::new().relation("author")),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::UnknownRelation { .. }));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_rows_return_none() {
        let model = setup();
        let updated = model
            .update(UpdateArgs {
                where_unique: WhereUnique { id: 404 },
                data: data(json!({"body": "x"})),
                include: None,
                check: None,
            })
            .await
            .unwrap();
        assert!(updated.is_none());

        let deleted = model
            .delete(DeleteArgs {
                where_unique: WhereUnique { id: 404 },
                include: None,
            })
            .await
            .unwrap();
        assert!(deleted.is_none());
    }

    #[tokio::test]
    async fn test_delete_returns_last_known_state() {
        let model = setup();
        model
            .create(CreateArgs {
                data: data(json!({"body": "adiós", "tagId": 1})),
                include: None,
                check: None,
            })
            .await
            .unwrap();

        let deleted = model
            .delete(DeleteArgs {
                where_unique: WhereUnique { id: 1 },
                include: Some(Include::new().relation("tag")),
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(deleted["body"], "adiós");
        assert_eq!(deleted["tag"]["label"], "urgent");

        let gone = model
            .find_unique(FindUniqueArgs {
                where_unique: WhereUnique { id: 1 },
                include: None,
            })
            .await
            .unwrap();
        assert!(gone.is_none());
    }

    fn reject_heavy(record: &Record) -> Result<(), String> {
        match record.get("weight").and_then(Value::as_f64) {
            Some(w) if w > 10.0 => Err(format!("weight 过大: {}", w)),
            _ => Ok(()),
        }
    }

    fn count_notes(model: &SqliteModel) -> i64 {
        model
            .get_conn()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))
            .unwrap()
    }

    #[tokio::test]
    async fn test_failed_check_rolls_back_create_and_update() {
        let model = setup();

        let err = model
            .create(CreateArgs {
                data: data(json!({"body": "pesada", "weight": 99.0})),
                include: None,
                check: Some(RecordCheck::new(reject_heavy)),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::Rejected(_)));
        assert_eq!(count_notes(&model), 0);

        let created = model
            .create(CreateArgs {
                data: data(json!({"body": "ligera", "weight": 1.0})),
                include: None,
                check: Some(RecordCheck::new(reject_heavy)),
            })
            .await
            .unwrap();
        let id = created["id"].as_i64().unwrap();

        let err = model
            .update(UpdateArgs {
                where_unique: WhereUnique { id },
                data: data(json!({"weight": 50.0})),
                include: None,
                check: Some(RecordCheck::new(reject_heavy)),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::Rejected(_)));

        let stored = model
            .find_unique(FindUniqueArgs {
                where_unique: WhereUnique { id },
                include: None,
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored["weight"], 1.0);
    }

    #[test]
    fn test_nested_values_are_rejected() {
        let err = json_to_sql("body", &json!({"a": 1})).unwrap_err();
        assert!(matches!(err, ModelError::UnsupportedValue { .. }));
    }
}
