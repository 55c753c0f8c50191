use crate::{
    error::HandwritingError,
    image::{encode_for_pdf, ImageFormat},
    info::Info,
    pagesize::PageDimensions,
    rect::Rect,
    refs::{ObjectReferences, RefType},
    units::Px,
};
use id_arena::{Arena, Id};
use image::RgbaImage;
use pdf_writer::{Finish, Name, Pdf, Ref};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// File name stem of exported page images
pub const IMAGE_STEM: &str = "handwritten-note";
/// File name of an exported PDF
pub const PDF_FILE_NAME: &str = "handwritten-document.pdf";

/// One finished page, rasterized at its final size
pub struct RenderedPage {
    pub image: RgbaImage,
}

impl RenderedPage {
    /// The page's extent in PDF units, one unit per pixel
    pub fn media_box(&self) -> Rect {
        let (width, height) = self.image.dimensions();
        (Px(width as f32), Px(height as f32)).media_box()
    }
}

#[derive(Default)]
/// A document is the ordered set of rendered pages of a handwritten note,
/// exported either as one image per page with [Document::write_images] or as
/// a single PDF with [Document::write_pdf]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Arena<RenderedPage>,
    pub page_order: Vec<Id<RenderedPage>>,
}

impl Document {
    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a page to the end of the document, returning its id
    pub fn add_page(&mut self, image: RgbaImage) -> Id<RenderedPage> {
        let id = self.pages.alloc(RenderedPage { image });
        self.page_order.push(id);
        id
    }

    pub fn page_count(&self) -> usize {
        self.page_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.page_order.is_empty()
    }

    /// Get a page by its 0-based position in the document
    pub fn page(&self, page_index: usize) -> Option<&RenderedPage> {
        self.page_order
            .get(page_index)
            .and_then(|id| self.pages.get(*id))
    }

    /// The pages, in document order
    pub fn ordered_pages(&self) -> Result<Vec<&RenderedPage>, HandwritingError> {
        self.page_order
            .iter()
            .map(|id| self.pages.get(*id).ok_or(HandwritingError::PageMissing))
            .collect()
    }

    /// File names pages are exported under: a single page is `handwritten-note.png`,
    /// several are `handwritten-note-page-1.png`, `handwritten-note-page-2.png`, ...
    pub fn image_file_names(&self, format: ImageFormat) -> Vec<String> {
        let ext = format.extension();
        match self.page_count() {
            1 => vec![format!("{IMAGE_STEM}.{ext}")],
            n => (1..=n)
                .map(|page| format!("{IMAGE_STEM}-page-{page}.{ext}"))
                .collect(),
        }
    }

    /// Encode every page and write it into `dir`, returning the written paths.
    /// Nothing is written for a document without pages, and if any page fails
    /// to write the pages written before it are removed again.
    pub fn write_images<P: AsRef<Path>>(
        &self,
        dir: P,
        format: ImageFormat,
    ) -> Result<Vec<PathBuf>, HandwritingError> {
        if self.is_empty() {
            return Err(HandwritingError::NoContent);
        }

        // encode everything before touching the disk
        let encoded = self
            .ordered_pages()?
            .into_iter()
            .map(|page| format.encode(&page.image))
            .collect::<Result<Vec<_>, _>>()?;

        let mut written: Vec<PathBuf> = Vec::with_capacity(encoded.len());
        for (name, bytes) in self.image_file_names(format).into_iter().zip(encoded) {
            let path = dir.as_ref().join(name);
            if let Err(err) = std::fs::write(&path, bytes) {
                warn!(path = %path.display(), %err, "failed to write page, removing the pages already written");
                for page in written.iter() {
                    let _ = std::fs::remove_file(page);
                }
                return Err(err.into());
            }
            written.push(path);
        }
        info!(pages = written.len(), %format, "exported page images");
        Ok(written)
    }

    /// Write the document as a PDF with one page per rendered page. Each page is
    /// as large as its image, in PDF units, and the image fills it exactly.
    /// The whole PDF is assembled in memory before anything is written.
    pub fn write_pdf<W: Write>(&self, mut w: W) -> Result<(), HandwritingError> {
        let pages = self.ordered_pages()?;
        if pages.is_empty() {
            return Err(HandwritingError::NoContent);
        }

        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = &self.info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = (0..pages.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs.iter().copied());

        for (page_index, page) in pages.iter().enumerate() {
            let image_id = refs.gen(RefType::PageImage(page_index));
            let encoded = encode_for_pdf(&page.image);
            let mut image = writer.image_xobject(image_id, encoded.bytes.as_slice());
            image.filter(encoded.filter);
            image.width(encoded.width as i32);
            image.height(encoded.height as i32);
            image.color_space().device_rgb();
            image.bits_per_component(8);
            image.finish();

            let media_box = page.media_box();
            let content_id = refs.gen(RefType::ContentForPage(page_index));
            let mut pdf_page = writer.page(page_refs[page_index]);
            pdf_page.media_box(media_box.into());
            pdf_page.parent(page_tree_id);
            pdf_page.contents(content_id);
            pdf_page
                .resources()
                .x_objects()
                .pair(Name(b"P0"), image_id);
            pdf_page.finish();

            let content = place_image(&media_box)?;
            writer.stream(content_id, content.as_slice());
        }

        writer.catalog(catalog_id).pages(page_tree_id);

        info!(pages = pages.len(), "exported pdf");
        w.write_all(writer.finish().as_slice()).map_err(Into::into)
    }
}

/// Content stream drawing the page image over the whole media box
#[allow(clippy::write_with_newline)]
fn place_image(media_box: &Rect) -> Result<Vec<u8>, std::io::Error> {
    let mut content: Vec<u8> = Vec::default();
    write!(&mut content, "q\n")?;
    write!(
        &mut content,
        "{} 0 0 {} {} {} cm\n",
        *media_box.width(),
        *media_box.height(),
        *media_box.x1,
        *media_box.y1
    )?;
    write!(&mut content, "/P0 Do\n")?;
    write!(&mut content, "Q\n")?;
    Ok(content)
}
