//! JPEG images to a one-page-per-image PDF.

use super::content_stream::ContentStreamBuilder;
use super::document_builder::DocumentBuilder;
use super::image_handler::{ImagePlacement, RasterImage};
use super::object_serializer::ObjectSerializer;
use crate::config::ImageLayout;
use crate::error::{Error, Result};
use crate::object::{Object, ObjectRef};

/// Object numbers reserved for one image page.
#[derive(Debug, Clone, Copy)]
struct ImagePageRefs {
    content: ObjectRef,
    page: ObjectRef,
    xobject: ObjectRef,
}

/// Serializes an ordered list of JPEG images into a PDF with one image per
/// US Letter page, each image shrunk to fit the content box and centered.
#[derive(Debug, Clone, Default)]
pub struct ImageToPdfSerializer {
    layout: ImageLayout,
}

impl ImageToPdfSerializer {
    /// Create a serializer with the fixed page layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce a complete PDF file.
    ///
    /// Fails with [`Error::InvalidInput`] before writing anything when
    /// `images` is empty or an image has no bytes or a zero dimension.
    pub fn serialize(&self, images: &[RasterImage]) -> Result<Vec<u8>> {
        validate_images(images)?;

        let payload: usize = images.iter().map(|img| img.jpeg_bytes.len()).sum();
        let mut builder = DocumentBuilder::with_capacity(payload + 512 * images.len() + 256);

        let catalog = builder.allocate();
        let pages = builder.allocate();
        let refs: Vec<ImagePageRefs> = images
            .iter()
            .map(|_| ImagePageRefs {
                content: builder.allocate(),
                page: builder.allocate(),
                xobject: builder.allocate(),
            })
            .collect();

        log::debug!(
            "Serializing {} images into {} objects",
            images.len(),
            builder.object_count() - 1
        );

        builder.write_object(
            catalog,
            &ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Catalog")),
                ("Pages", ObjectSerializer::reference(pages)),
            ]),
        )?;

        let kids = refs
            .iter()
            .map(|r| ObjectSerializer::reference(r.page))
            .collect();
        builder.write_object(
            pages,
            &ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Pages")),
                ("Kids", ObjectSerializer::array(kids)),
                ("Count", ObjectSerializer::integer(images.len() as i64)),
            ]),
        )?;

        for (index, (image, r)) in images.iter().zip(&refs).enumerate() {
            let name = format!("Im{}", index);
            let placement = ImagePlacement::fit_centered(&self.layout, image.width, image.height);
            log::trace!(
                "Image {} ({}x{}) placed at {:?}",
                index,
                image.width,
                image.height,
                placement
            );

            let mut content = ContentStreamBuilder::new();
            content.draw_image(&name, &placement);
            builder.write_object(
                r.content,
                &Object::Stream {
                    dict: ObjectSerializer::dictionary(vec![]),
                    data: content.build()?.into(),
                },
            )?;

            builder.write_object(
                r.page,
                &ObjectSerializer::dict(vec![
                    ("Type", ObjectSerializer::name("Page")),
                    ("Parent", ObjectSerializer::reference(pages)),
                    (
                        "MediaBox",
                        ObjectSerializer::rect(
                            0.0,
                            0.0,
                            self.layout.page_width,
                            self.layout.page_height,
                        ),
                    ),
                    ("Contents", ObjectSerializer::reference(r.content)),
                    ("Resources", RasterImage::resources(&name, r.xobject)),
                ]),
            )?;

            builder.write_object(r.xobject, &image.build_xobject())?;
        }

        builder.finish(catalog)
    }
}

fn validate_images(images: &[RasterImage]) -> Result<()> {
    if images.is_empty() {
        return Err(Error::InvalidInput("no images to serialize".to_string()));
    }
    for (index, image) in images.iter().enumerate() {
        if image.jpeg_bytes.is_empty() {
            return Err(Error::InvalidInput(format!("image {} has no JPEG data", index)));
        }
        if image.width == 0 || image.height == 0 {
            return Err(Error::InvalidInput(format!(
                "image {} has zero dimension {}x{}",
                index, image.width, image.height
            )));
        }
    }
    Ok(())
}
