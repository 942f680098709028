//! Image-based PDF composition for the ROI report.
//!
//! Page geometry is in PDF points on a portrait A4 page. The header holds an
//! optional brand image and a title line; the body is the captured report
//! raster scaled to the page width. A raster taller than the remaining page
//! continues on the next page.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, RgbImage};
use thiserror::Error;
use tracing::debug;

pub const A4_WIDTH_PT: f64 = 595.28;
pub const A4_HEIGHT_PT: f64 = 841.89;
pub const REPORT_FILE_NAME: &str = "TGE_TrackTrace4Tools_ROI_Report.pdf";
pub const DOCUMENT_TITLE: &str = "Track&Trace4Tools – Detailed ROI Report";

const MARGIN_PT: f64 = 24.0;
const LOGO_WIDTH_PT: f64 = 120.0;
const LOGO_HEIGHT_PT: f64 = 32.0;
const TITLE_BASELINE_PT: f64 = 72.0;
const TITLE_FONT_SIZE: f64 = 14.0;
const BODY_TOP_PT: f64 = 90.0;
const JPEG_QUALITY: u8 = 90;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to capture report region: {0}")]
    Capture(String),
    #[error("failed to encode report image: {0}")]
    Encode(#[from] image::ImageError),
    #[error("failed to compose report document: {0}")]
    Compose(String),
}

/// Fixed header placed above the captured content.
#[derive(Debug, Clone, Default)]
pub struct DocumentHeader {
    pub brand_image: Option<RgbImage>,
    pub title: String,
}

impl DocumentHeader {
    pub fn new(title: &str) -> Self {
        Self {
            brand_image: None,
            title: title.to_string(),
        }
    }

    /// Loads the brand image from disk. Missing or undecodable images leave
    /// the header without one.
    pub fn with_brand_logo(mut self, path: Option<&str>) -> Self {
        self.brand_image = path.and_then(|path| match image::open(path) {
            Ok(logo) => Some(flatten_on_white(&logo.to_rgba8())),
            Err(e) => {
                debug!(%path, error = %e, "brand logo skipped");
                None
            }
        });
        self
    }
}

/// Turns a header and a content raster into a document file.
pub trait DocumentComposer: Send + Sync {
    fn compose_document(&self, header: &DocumentHeader, image: &RgbImage) -> Result<Vec<u8>, RenderError>;
}

#[derive(Debug, Clone, Default)]
pub struct PdfComposer;

impl DocumentComposer for PdfComposer {
    fn compose_document(&self, header: &DocumentHeader, image: &RgbImage) -> Result<Vec<u8>, RenderError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(RenderError::Compose("report image is empty".to_string()));
        }

        let body_width = A4_WIDTH_PT - 2.0 * MARGIN_PT;
        let points_per_pixel = body_width / image.width() as f64;
        let slices = paginate(image.height(), points_per_pixel);

        let mut pdf = PdfWriter::new();
        let catalog = pdf.reserve();
        let pages = pdf.reserve();
        let font = pdf.add(b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>".to_vec());

        let logo = match &header.brand_image {
            Some(logo) if logo.width() > 0 && logo.height() > 0 => Some(pdf.add_jpeg(logo)?),
            _ => None,
        };

        let mut page_ids = Vec::with_capacity(slices.len());
        for (index, slice) in slices.iter().enumerate() {
            let first_page = index == 0;
            let rows = image::imageops::crop_imm(image, 0, slice.first_row, image.width(), slice.rows).to_image();
            let content_image = pdf.add_jpeg(&rows)?;

            let top = if first_page { BODY_TOP_PT } else { MARGIN_PT };
            let height = slice.rows as f64 * points_per_pixel;
            let mut content = String::new();
            let mut xobjects = format!("/Im0 {content_image} 0 R");

            if first_page {
                if let Some(logo) = logo {
                    content.push_str(&draw_image_op(
                        "Im1",
                        MARGIN_PT,
                        A4_HEIGHT_PT - MARGIN_PT - LOGO_HEIGHT_PT,
                        LOGO_WIDTH_PT,
                        LOGO_HEIGHT_PT,
                    ));
                    xobjects.push_str(&format!(" /Im1 {logo} 0 R"));
                }
                content.push_str(&format!(
                    "BT /F1 {TITLE_FONT_SIZE} Tf {MARGIN_PT} {:.2} Td ({}) Tj ET\n",
                    A4_HEIGHT_PT - TITLE_BASELINE_PT,
                    escape_pdf_text(&header.title)
                ));
            }
            content.push_str(&draw_image_op(
                "Im0",
                MARGIN_PT,
                A4_HEIGHT_PT - top - height,
                body_width,
                height,
            ));

            let contents = pdf.add_stream("", content.as_bytes());
            let page = pdf.add(
                format!(
                    "<< /Type /Page /Parent {pages} 0 R /MediaBox [0 0 {A4_WIDTH_PT} {A4_HEIGHT_PT}] \
                     /Resources << /Font << /F1 {font} 0 R >> /XObject << {xobjects} >> >> /Contents {contents} 0 R >>"
                )
                .into_bytes(),
            );
            page_ids.push(page);
        }

        let kids: Vec<String> = page_ids.iter().map(|id| format!("{id} 0 R")).collect();
        pdf.set(
            pages,
            format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids.join(" "), page_ids.len()).into_bytes(),
        );
        pdf.set(catalog, format!("<< /Type /Catalog /Pages {pages} 0 R >>").into_bytes());

        pdf.finish(catalog)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PageSlice {
    first_row: u32,
    rows: u32,
}

/// Splits raster rows into pages: the first page starts below the header,
/// later pages use the full height between margins.
fn paginate(total_rows: u32, points_per_pixel: f64) -> Vec<PageSlice> {
    let first_capacity = rows_fitting(A4_HEIGHT_PT - BODY_TOP_PT - MARGIN_PT, points_per_pixel);
    let next_capacity = rows_fitting(A4_HEIGHT_PT - 2.0 * MARGIN_PT, points_per_pixel);

    let mut slices = Vec::new();
    let mut first_row = 0;
    while first_row < total_rows {
        let capacity = if slices.is_empty() { first_capacity } else { next_capacity };
        let rows = capacity.min(total_rows - first_row);
        slices.push(PageSlice { first_row, rows });
        first_row += rows;
    }
    slices
}

fn rows_fitting(available_pt: f64, points_per_pixel: f64) -> u32 {
    ((available_pt / points_per_pixel).floor() as u32).max(1)
}

fn draw_image_op(name: &str, x: f64, y: f64, width: f64, height: f64) -> String {
    format!("q {width:.2} 0 0 {height:.2} {x:.2} {y:.2} cm /{name} Do Q\n")
}

/// Escapes a string for a WinAnsi PDF literal. Characters the encoding lacks
/// become `?`.
fn escape_pdf_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                escaped.push('\\');
                escaped.push(c);
            }
            c if c.is_ascii() && !c.is_ascii_control() => escaped.push(c),
            c if (c as u32) >= 0xA0 && (c as u32) <= 0xFF => {
                escaped.push_str(&format!("\\{:03o}", c as u32));
            }
            '\u{2013}' => escaped.push_str("\\226"),
            '\u{2014}' => escaped.push_str("\\227"),
            _ => escaped.push('?'),
        }
    }
    escaped
}

fn flatten_on_white(rgba: &image::RgbaImage) -> RgbImage {
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let blend = |channel: u8| -> u8 {
            ((channel as u32 * a as u32 + 255 * (255 - a as u32)) / 255) as u8
        };
        image::Rgb([blend(r), blend(g), blend(b)])
    })
}

/// Minimal PDF object writer: numbered objects, a cross-reference table and
/// a trailer.
struct PdfWriter {
    objects: Vec<Option<Vec<u8>>>,
}

impl PdfWriter {
    fn new() -> Self {
        Self { objects: Vec::new() }
    }

    /// Allocates an object number to be filled later with `set`.
    fn reserve(&mut self) -> usize {
        self.objects.push(None);
        self.objects.len()
    }

    fn set(&mut self, id: usize, body: Vec<u8>) {
        self.objects[id - 1] = Some(body);
    }

    fn add(&mut self, body: Vec<u8>) -> usize {
        self.objects.push(Some(body));
        self.objects.len()
    }

    fn add_stream(&mut self, dictionary_entries: &str, data: &[u8]) -> usize {
        let mut body = format!("<< {dictionary_entries} /Length {} >>\nstream\n", data.len()).into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(b"\nendstream");
        self.add(body)
    }

    fn add_jpeg(&mut self, image: &RgbImage) -> Result<usize, RenderError> {
        let mut jpeg = Cursor::new(Vec::new());
        JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY).encode(
            image.as_raw(),
            image.width(),
            image.height(),
            ColorType::Rgb8,
        )?;
        let entries = format!(
            "/Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace /DeviceRGB /BitsPerComponent 8 /Filter /DCTDecode",
            image.width(),
            image.height()
        );
        Ok(self.add_stream(&entries, &jpeg.into_inner()))
    }

    fn finish(self, root: usize) -> Result<Vec<u8>, RenderError> {
        let mut out = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n".to_vec();
        let mut offsets = Vec::with_capacity(self.objects.len());
        for (index, body) in self.objects.into_iter().enumerate() {
            let body = body.ok_or_else(|| RenderError::Compose(format!("object {} was never written", index + 1)))?;
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n", index + 1).as_bytes());
            out.extend_from_slice(&body);
            out.extend_from_slice(b"\nendobj\n");
        }

        let xref_offset = out.len();
        out.extend_from_slice(format!("xref\n0 {}\n", offsets.len() + 1).as_bytes());
        out.extend_from_slice(b"0000000000 65535 f \n");
        for offset in &offsets {
            out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root {root} 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
                offsets.len() + 1
            )
            .as_bytes(),
        );
        Ok(out)
    }
}
