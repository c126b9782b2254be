// ==========================================
// 学生档案后端 - 领域模型层
// ==========================================
// 职责: 定义领域实体与创建/更新载荷
// 红线: 不含数据访问逻辑,不含导出逻辑
// ==========================================

pub mod faculty;
pub mod student;

// 重导出核心类型
pub use faculty::{Faculty, NewFaculty};
pub use student::{NewStudent, Student, StudentPatch};
