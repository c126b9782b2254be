// ==========================================
// 学生档案后端 - 学生领域模型
// ==========================================
// 对齐: students 表
// 序列化格式: camelCase (与对外 JSON 一致)
// ==========================================

use crate::domain::faculty::Faculty;
use crate::repository::{Record, ToPersistable};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Student - 学生实体（持久化形态）
// ==========================================
// 红线: id 创建后不可变
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    // ===== 主键 =====
    pub id: i64,

    // ===== 身份信息 =====
    pub surname: String,         // 姓 (apellido)
    pub given_name: String,      // 名 (nombre)
    pub document_number: String, // 证件号
    pub document_type: String,   // 证件类型 (DNI/PAS/...)
    pub birth_date: NaiveDate,   // 出生日期
    pub sex: String,             // 性别

    // ===== 学籍信息 =====
    pub file_number: i64,           // 学号 (legajo)
    pub enrollment_date: NaiveDate, // 入学日期

    // ===== 关联 =====
    #[serde(default)]
    pub faculty_id: Option<i64>,
    /// 仅当仓储的关联描述包含 `faculty` 时才会填充
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faculty: Option<Faculty>,
}

impl Student {
    /// PDF/展示用的学院名称（未关联时为空串）
    pub fn faculty_name(&self) -> &str {
        self.faculty.as_ref().map(|f| f.name.as_str()).unwrap_or("")
    }
}

// ==========================================
// NewStudent - 学生领域对象（创建用）
// ==========================================
// 用途: 携带构造逻辑的富领域对象，持久化前需展平为普通记录
#[derive(Debug, Clone, PartialEq)]
pub struct NewStudent {
    surname: String,
    given_name: String,
    document_number: String,
    document_type: String,
    birth_date: NaiveDate,
    sex: String,
    file_number: i64,
    enrollment_date: NaiveDate,
    faculty_id: Option<i64>,
}

impl NewStudent {
    /// 按档案字段顺序构造
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        surname: impl Into<String>,
        given_name: impl Into<String>,
        document_number: impl Into<String>,
        document_type: impl Into<String>,
        birth_date: NaiveDate,
        sex: impl Into<String>,
        file_number: i64,
        enrollment_date: NaiveDate,
    ) -> Self {
        Self {
            surname: surname.into(),
            given_name: given_name.into(),
            document_number: document_number.into(),
            document_type: document_type.into(),
            birth_date,
            sex: sex.into(),
            file_number,
            enrollment_date,
            faculty_id: None,
        }
    }

    /// 指定所属学院
    pub fn with_faculty(mut self, faculty_id: i64) -> Self {
        self.faculty_id = Some(faculty_id);
        self
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn given_name(&self) -> &str {
        &self.given_name
    }

    pub fn document_number(&self) -> &str {
        &self.document_number
    }

    pub fn document_type(&self) -> &str {
        &self.document_type
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn sex(&self) -> &str {
        &self.sex
    }

    pub fn file_number(&self) -> i64 {
        self.file_number
    }

    pub fn enrollment_date(&self) -> NaiveDate {
        self.enrollment_date
    }

    pub fn faculty_id(&self) -> Option<i64> {
        self.faculty_id
    }
}

impl ToPersistable for NewStudent {
    fn to_persistable(&self) -> Record {
        let mut record = Record::new();
        record.insert("surname".into(), self.surname.clone().into());
        record.insert("givenName".into(), self.given_name.clone().into());
        record.insert("documentNumber".into(), self.document_number.clone().into());
        record.insert("documentType".into(), self.document_type.clone().into());
        record.insert("birthDate".into(), self.birth_date.to_string().into());
        record.insert("sex".into(), self.sex.clone().into());
        record.insert("fileNumber".into(), self.file_number.into());
        record.insert("enrollmentDate".into(), self.enrollment_date.to_string().into());
        if let Some(faculty_id) = self.faculty_id {
            record.insert("facultyId".into(), faculty_id.into());
        }
        record
    }
}

// ==========================================
// StudentPatch - 部分更新载荷
// ==========================================
// 说明: 未设置的字段不会出现在展平后的记录中
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPatch {
    /// 仓储会丢弃此字段
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faculty_id: Option<i64>,
}

impl ToPersistable for StudentPatch {
    fn to_persistable(&self) -> Record {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => Record::new(),
        }
    }
}
