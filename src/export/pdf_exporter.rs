// ==========================================
// 学生档案后端 - PDF 导出器
// ==========================================
// 版式: 单页 A4，五行固定文本，固定坐标（自页面上沿起算，单位 mm）
//   20mm  Ficha del Alumno
//   40mm  Legajo: <fileNumber>
//   50mm  Apellido: <surname>
//   60mm  Nombre: <givenName>
//   70mm  Facultad: <faculty>
// 渲染在阻塞线程池中执行
// ==========================================

use crate::domain::Student;
use crate::export::{ExportError, ExportFormat, ExportResult, Exporter, Representation};
use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

const MM_TO_PT: f32 = 72.0 / 25.4;
const A4_WIDTH_PT: f32 = 595.0;
const A4_HEIGHT_PT: f32 = 842.0;

/// 固定版式参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FichaLayout {
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    pub font_size: f32,
    pub left_mm: f32,
}

impl Default for FichaLayout {
    fn default() -> Self {
        Self {
            page_width_pt: A4_WIDTH_PT,
            page_height_pt: A4_HEIGHT_PT,
            font_size: 16.0,
            left_mm: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExporter {
    layout: FichaLayout,
}

impl PdfExporter {
    pub fn new(layout: FichaLayout) -> Self {
        Self { layout }
    }
}

#[async_trait]
impl Exporter for PdfExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    async fn export(&self, student: &Student) -> ExportResult<Representation> {
        let layout = self.layout;
        let owned = student.clone();

        let bytes = tokio::task::spawn_blocking(move || render_ficha(&owned, &layout))
            .await
            .map_err(|e| ExportError::Render(format!("渲染任务异常终止: {}", e)))??;

        tracing::debug!(file_number = student.file_number, size = bytes.len(), "PDF 档案已生成");

        Ok(Representation::Binary {
            content_type: PDF_CONTENT_TYPE,
            file_name: format!("ficha_{}.pdf", student.file_number),
            bytes,
        })
    }
}

/// 档案五行文本及其纵向位置（mm）
pub fn ficha_lines(student: &Student) -> [(f32, String); 5] {
    [
        (20.0, "Ficha del Alumno".to_string()),
        (40.0, format!("Legajo: {}", student.file_number)),
        (50.0, format!("Apellido: {}", student.surname)),
        (60.0, format!("Nombre: {}", student.given_name)),
        (70.0, format!("Facultad: {}", student.faculty_name())),
    ]
}

/// 同步渲染单页 PDF
pub fn render_ficha(student: &Student, layout: &FichaLayout) -> ExportResult<Vec<u8>> {
    let mut document = Document::with_version("1.7");
    let pages_id = document.new_object_id();

    let font_id = document.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = document.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let x = layout.left_mm * MM_TO_PT;
    let mut operations = Vec::new();
    for (y_mm, text) in ficha_lines(student) {
        let y = layout.page_height_pt - y_mm * MM_TO_PT;
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec!["F1".into(), layout.font_size.into()]));
        operations.push(Operation::new("Td", vec![x.into(), y.into()]));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(to_win_ansi(&text), StringFormat::Literal)],
        ));
        operations.push(Operation::new("ET", vec![]));
    }
    let content = Content { operations };
    let content_id = document.add_object(Stream::new(dictionary! {}, content.encode()?));

    let page_id = document.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), layout.page_width_pt.into(), layout.page_height_pt.into()],
        "Contents" => content_id,
        "Resources" => resources_id,
    });
    document.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    let catalog_id = document.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    document.trailer.set("Root", catalog_id);
    let info_id = document.add_object(dictionary! {
        "Title" => Object::String(to_win_ansi("Ficha del Alumno"), StringFormat::Literal),
        "Producer" => Object::String(b"student-records".to_vec(), StringFormat::Literal),
    });
    document.trailer.set("Info", info_id);

    let mut buffer = Vec::new();
    document.save_to(&mut buffer)?;
    Ok(buffer)
}

/// Helvetica 使用 WinAnsi 编码；无法编码的字符以 '?' 代替
fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars().map(|c| win_ansi_byte(c).unwrap_or(b'?')).collect()
}

fn win_ansi_byte(c: char) -> Option<u8> {
    let byte = match c {
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        // C1 控制字符在 WinAnsi 中没有字形
        '\u{0080}'..='\u{009F}' => return None,
        c if (c as u32) <= 0xFF => c as u8,
        _ => return None,
    };
    Some(byte)
}
