// ==========================================
// 学生档案后端 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod error;
pub mod generic_repo;
pub mod include;
pub mod model;
pub mod record;
pub mod sqlite_model;
pub mod student_repo;

// 重导出核心仓储
pub use error::{ModelError, ModelResult, Operation, PersistenceError, PersistenceResult};
pub use generic_repo::GenericRepository;
pub use include::Include;
pub use model::{
    CreateArgs, DeleteArgs, FindUniqueArgs, ModelDelegate, RecordCheck, UpdateArgs, WhereUnique,
};
pub use record::{Record, ToPersistable, ID_FIELD};
pub use sqlite_model::{ColumnSpec, RelationSpec, SqliteModel, TableSpec};
pub use student_repo::{
    default_student_includes, faculty_repository, student_repository, FacultyRepository,
    StudentRepository, FACULTY_RELATION,
};
