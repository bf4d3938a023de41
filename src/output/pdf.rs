//! PDF export: rasterization collaborator with a print-view fallback

use crate::error::{Result, ResumeCrafterError};
use log::{debug, info, warn};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static STYLE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<(style|script|title)[^>]*>.*?</(style|script|title)>").expect("valid style pattern"));
static BLOCK_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</(div|h1|h2|h3|p|li)>|<br\s*/?>").expect("valid break pattern"));
static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));
static NUMERIC_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#(?:[xX]([0-9a-fA-F]+)|([0-9]+));").expect("valid entity pattern"));

const PRINT_SCRIPT: &str = "<script>window.addEventListener('load', function () { window.print(); });</script>";

/// Converts a finished HTML document into a PDF file
#[allow(async_fn_in_trait)]
pub trait PdfRasterizer {
    /// Render `html` and return the path of the written PDF
    async fn render_to_pdf(&self, html: &str, file_name: &str) -> Result<PathBuf>;
}

/// How a PDF export was fulfilled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfExport {
    Rasterized(PathBuf),
    /// Rasterization failed; an HTML page that opens the print dialog was written instead
    PrintView(PathBuf),
}

impl PdfExport {
    pub fn path(&self) -> &Path {
        match self {
            PdfExport::Rasterized(path) | PdfExport::PrintView(path) => path,
        }
    }
}

/// Text-layout rasterizer built on printpdf's builtin fonts
pub struct PrintPdfRasterizer {
    output_dir: PathBuf,
    page_width_mm: f32,
    page_height_mm: f32,
    margin_mm: f32,
    font_size: f32,
}

impl PrintPdfRasterizer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_mm: 12.0,
            font_size: 10.0,
        }
    }

    fn line_height_mm(&self) -> f32 {
        self.font_size * 0.3528 * 1.5
    }

    fn max_chars_per_line(&self) -> usize {
        // Helvetica averages roughly half an em per glyph
        let usable = self.page_width_mm - 2.0 * self.margin_mm;
        let glyph_mm = self.font_size * 0.3528 * 0.5;
        (usable / glyph_mm).floor().max(20.0) as usize
    }

    fn layout(&self, html: &str) -> Vec<String> {
        let width = self.max_chars_per_line();
        html_to_lines(html)
            .iter()
            .flat_map(|line| wrap_line(line, width))
            .collect()
    }

    fn build_pdf(&self, title: &str, lines: &[String]) -> Result<Vec<u8>> {
        let page_w = Mm(self.page_width_mm);
        let page_h = Mm(self.page_height_mm);
        let (doc, page, layer) = PdfDocument::new(title, page_w, page_h, "Layer 1");
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ResumeCrafterError::PdfRasterization(e.to_string()))?;

        let mut current = doc.get_page(page).get_layer(layer);
        let top = self.page_height_mm - self.margin_mm;
        let mut y = top;

        for line in lines {
            if y < self.margin_mm {
                let (next_page, next_layer) = doc.add_page(page_w, page_h, "Layer 1");
                current = doc.get_page(next_page).get_layer(next_layer);
                y = top;
            }
            if !line.is_empty() {
                current.use_text(line.clone(), self.font_size, Mm(self.margin_mm), Mm(y), &font);
            }
            y -= self.line_height_mm();
        }

        doc.save_to_bytes()
            .map_err(|e| ResumeCrafterError::PdfRasterization(e.to_string()))
    }
}

impl PdfRasterizer for PrintPdfRasterizer {
    async fn render_to_pdf(&self, html: &str, file_name: &str) -> Result<PathBuf> {
        let lines = self.layout(html);
        if lines.iter().all(|line| line.is_empty()) {
            return Err(ResumeCrafterError::PdfRasterization("document has no printable text".to_string()));
        }

        let bytes = self.build_pdf(file_name, &lines)?;
        tokio::fs::create_dir_all(&self.output_dir).await?;
        let path = self.output_dir.join(format!("{}.pdf", file_name));
        tokio::fs::write(&path, bytes).await?;

        debug!("Rasterized {} lines into {}", lines.len(), path.display());
        Ok(path)
    }
}

/// Flatten HTML into printable lines, one per block element
pub fn html_to_lines(html: &str) -> Vec<String> {
    let without_styles = STYLE_BLOCK.replace_all(html, "");
    let with_breaks = BLOCK_BREAK.replace_all(&without_styles, "\n");
    let text = ANY_TAG.replace_all(&with_breaks, "");

    let mut lines: Vec<String> = Vec::new();
    for raw in text.lines() {
        let line = decode_entities(raw.split_whitespace().collect::<Vec<_>>().join(" ").as_str());
        // Builtin PDF fonts only cover WinAnsi
        let line = line.replace('•', "-");
        if line.is_empty() && lines.last().map_or(true, |last| last.is_empty()) {
            continue;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|last| last.is_empty()) {
        lines.pop();
    }
    lines
}

fn decode_entities(text: &str) -> String {
    let numeric = NUMERIC_ENTITY.replace_all(text, |caps: &regex::Captures| {
        let code = match (caps.get(1), caps.get(2)) {
            (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
            (None, Some(dec)) => dec.as_str().parse::<u32>().ok(),
            (None, None) => None,
        };
        match code.and_then(char::from_u32) {
            Some(c) => c.to_string(),
            None => caps[0].to_string(),
        }
    });

    // &amp; last so escaped entity text stays literal
    numeric
        .replace("&bull;", "•")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

fn wrap_line(line: &str, width: usize) -> Vec<String> {
    if line.chars().count() <= width {
        return vec![line.to_string()];
    }

    let mut wrapped = Vec::new();
    let mut current = String::new();
    for word in line.split(' ') {
        let needed = current.chars().count() + word.chars().count() + usize::from(!current.is_empty());
        if needed > width && !current.is_empty() {
            wrapped.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        wrapped.push(current);
    }
    wrapped
}

/// Write the HTML with a script that opens the browser print dialog
pub async fn write_print_view(html: &str, output_dir: &Path, file_name: &str) -> Result<PathBuf> {
    let printable = match html.rfind("</body>") {
        Some(idx) => format!("{}{}\n{}", &html[..idx], PRINT_SCRIPT, &html[idx..]),
        None => format!("{}\n{}", html, PRINT_SCRIPT),
    };

    tokio::fs::create_dir_all(output_dir).await?;
    let path = output_dir.join(format!("{}.print.html", file_name));
    tokio::fs::write(&path, printable).await?;
    Ok(path)
}

/// Hand the HTML to the rasterizer, falling back to the print view on failure
pub async fn export_pdf<R: PdfRasterizer>(
    rasterizer: &R,
    html: &str,
    file_name: &str,
    fallback_dir: &Path,
) -> Result<PdfExport> {
    match rasterizer.render_to_pdf(html, file_name).await {
        Ok(path) => {
            info!("PDF written to {}", path.display());
            Ok(PdfExport::Rasterized(path))
        }
        Err(e) => {
            warn!("PDF rasterization failed ({}); opening print view instead", e);
            let path = write_print_view(html, fallback_dir, file_name).await?;
            Ok(PdfExport::PrintView(path))
        }
    }
}
