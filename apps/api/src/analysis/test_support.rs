//! Fixtures shared by the analysis and screening tests.

use std::sync::Mutex;

use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use tempfile::NamedTempFile;

use crate::llm_client::{LanguageModel, LlmError};

/// What a fixture page draws.
#[derive(Debug, Clone, Copy)]
pub enum PageSpec<'a> {
    /// A single line of text in Courier.
    Text(&'a str),
    /// An empty content stream, like a scan without OCR.
    Blank,
    /// A content stream the text decoder cannot interpret.
    Undecodable,
}

/// Writes a PDF with one page per entry of `pages`, each drawing its text in Courier.
pub fn text_pdf(pages: &[&str]) -> NamedTempFile {
    build_pdf(pages.iter().copied().map(PageSpec::Text).collect())
}

pub fn blank_pdf() -> NamedTempFile {
    build_pdf(vec![PageSpec::Blank])
}

pub fn pdf_bytes(pages: &[&str]) -> Vec<u8> {
    std::fs::read(text_pdf(pages).path()).unwrap()
}

pub fn build_pdf(pages: Vec<PageSpec<'_>>) -> NamedTempFile {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let kids: Vec<Object> = pages
        .into_iter()
        .map(|page| {
            let content = match page {
                PageSpec::Text(text) => Content {
                    operations: vec![
                        Operation::new("BT", vec![]),
                        Operation::new("Tf", vec!["F1".into(), 12.into()]),
                        Operation::new("Td", vec![72.into(), 720.into()]),
                        Operation::new("Tj", vec![Object::string_literal(text)]),
                        Operation::new("ET", vec![]),
                    ],
                }
                .encode()
                .unwrap(),
                PageSpec::Blank => Vec::new(),
                // Tj with a number instead of a string operand.
                PageSpec::Undecodable => b"BT /F1 12 Tf 72 720 Td 42 Tj ET".to_vec(),
            };
            add_page(&mut doc, pages_id, resources_id, content).into()
        })
        .collect();

    finish_pdf(doc, pages_id, kids)
}

/// Writes a single-page PDF that draws "Hi" with a Type0 font in Identity-H
/// encoding, the way office suites and browsers export text. The glyph codes
/// are mapped back to Unicode only through the font's ToUnicode CMap.
pub fn identity_h_pdf() -> NamedTempFile {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let to_unicode = b"/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CMapName /Adobe-Identity-UCS def
/CMapType 2 def
1 begincodespacerange
<0000> <FFFF>
endcodespacerange
2 beginbfchar
<0001> <0048>
<0002> <0069>
endbfchar
endcmap
CMapName currentdict /CMap defineresource pop
end
end
";
    let to_unicode_id = doc.add_object(Stream::new(dictionary! {}, to_unicode.to_vec()));
    let descendant_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "CIDFontType2",
        "BaseFont" => "ResumeSans",
        "CIDSystemInfo" => dictionary! {
            "Registry" => Object::string_literal("Adobe"),
            "Ordering" => Object::string_literal("Identity"),
            "Supplement" => 0,
        },
        "FontDescriptor" => dictionary! {
            "Type" => "FontDescriptor",
            "FontName" => "ResumeSans",
            "Flags" => 32,
            "ItalicAngle" => 0,
            "Ascent" => 800,
            "Descent" => -200,
            "CapHeight" => 700,
            "StemV" => 80,
            "FontBBox" => vec![0.into(), (-200).into(), 1000.into(), 800.into()],
        },
        "DW" => 600,
    });
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type0",
        "BaseFont" => "ResumeSans",
        "Encoding" => "Identity-H",
        "DescendantFonts" => vec![Object::Reference(descendant_id)],
        "ToUnicode" => to_unicode_id,
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![72.into(), 720.into()]),
            Operation::new(
                "Tj",
                vec![Object::String(vec![0x00, 0x01, 0x00, 0x02], StringFormat::Hexadecimal)],
            ),
            Operation::new("ET", vec![]),
        ],
    }
    .encode()
    .unwrap();
    let page_id = add_page(&mut doc, pages_id, resources_id, content);

    finish_pdf(doc, pages_id, vec![page_id.into()])
}

fn finish_pdf(mut doc: Document, pages_id: ObjectId, kids: Vec<Object>) -> NamedTempFile {
    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let file = NamedTempFile::new().unwrap();
    doc.save(file.path()).unwrap();
    file
}

fn add_page(
    doc: &mut Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    content: Vec<u8>,
) -> ObjectId {
    let content_id = doc.add_object(Stream::new(dictionary! {}, content));
    doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
    })
}

type Reply = Box<dyn Fn(&str) -> Result<String, LlmError> + Send + Sync>;

/// A `LanguageModel` that answers from a closure and records every prompt it receives.
pub struct ScriptedModel {
    reply: Reply,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn new(reply: impl Fn(&str) -> Result<String, LlmError> + Send + Sync + 'static) -> Self {
        Self {
            reply: Box::new(reply),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: &str) -> Self {
        let text = text.to_string();
        Self::new(move |_| Ok(text.clone()))
    }

    pub fn failing(error: impl Fn() -> LlmError + Send + Sync + 'static) -> Self {
        Self::new(move |_| Err(error()))
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        (self.reply)(prompt)
    }
}
