//! Single-book conversion: package in, story out, rendered to one file.

use crate::epub_loader::{ItemKind, PackageSource};
use crate::extractor::extract_text;
use crate::normalizer::TextNormalizer;
use crate::story::{DocumentInfo, Flowable, PageRenderer, StoryBuilder};
use anyhow::Result;
use std::path::Path;
use tracing::{debug, info};

/// Counts gathered while assembling one story.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionReport {
    pub documents: usize,
    pub paragraphs: usize,
    pub skipped: usize,
}

pub struct Converter<R: PageRenderer> {
    normalizer: TextNormalizer,
    renderer: R,
}

impl<R: PageRenderer> Converter<R> {
    pub fn new(normalizer: TextNormalizer, renderer: R) -> Self {
        Self {
            normalizer,
            renderer,
        }
    }

    /// Front matter from the package metadata, then every content document's
    /// paragraphs in package order.
    pub fn build_story<P: PackageSource>(
        &self,
        package: P,
    ) -> Result<(Vec<Flowable>, DocumentInfo, ConversionReport)> {
        let info = DocumentInfo {
            title: package.metadata("title"),
            author: package.metadata("creator"),
        };

        let mut builder = StoryBuilder::new(&self.renderer);
        builder.front_matter(&info);

        let mut documents = 0;
        for item in package.into_items()? {
            if item.kind != ItemKind::Document {
                debug!(id = %item.id, "Skipping non-document item");
                continue;
            }
            documents += 1;
            let stream = extract_text(&item.decode());
            let paragraphs = self.normalizer.paragraphs(&stream);
            debug!(id = %item.id, paragraphs = paragraphs.len(), "Extracted document text");
            for paragraph in &paragraphs {
                builder.body_paragraph(paragraph);
            }
        }

        let report = ConversionReport {
            documents,
            paragraphs: builder.paragraphs(),
            skipped: builder.skipped(),
        };
        Ok((builder.finish(), info, report))
    }

    pub fn convert<P: PackageSource>(&self, package: P, out: &Path) -> Result<ConversionReport> {
        let (story, info, report) = self.build_story(package)?;
        self.renderer.render(&story, &info, out)?;
        info!(
            path = %out.display(),
            documents = report.documents,
            paragraphs = report.paragraphs,
            skipped = report.skipped,
            "Converted book"
        );
        Ok(report)
    }
}
