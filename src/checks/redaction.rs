//! Failed redaction: text still present underneath dark rectangles.

use super::primitives::is_dark_fill;
use crate::error::CheckError;
use crate::model::{Document, DrawnShape, Location, Page, Rect, TextRun};
use crate::report::{Finding, FindingType, Severity};

/// Shapes at least this opaque can hide what lies beneath.
pub const OPAQUE_FILL_THRESHOLD: f32 = 0.95;

/// Share of a run's area that must lie under a shape for the run to count
/// as covered.
pub const COVERAGE_THRESHOLD: f32 = 0.5;

pub(super) fn run(doc: &Document) -> Result<Vec<Finding>, CheckError> {
    let mut findings = Vec::new();

    for page in doc.pages() {
        validate_geometry(page)?;

        for shape in page.shapes.iter().filter(|s| is_redaction_box(s)) {
            let covered: Vec<&str> = page
                .runs
                .iter()
                .filter(|run| is_covered(run, shape))
                .map(|run| run.text.trim())
                .collect();

            if covered.is_empty() {
                continue;
            }

            findings.push(
                Finding::new(
                    FindingType::FailedRedaction,
                    "text_under_rectangle",
                    Severity::Critical,
                    format!(
                        "{} text run(s) remain extractable under a dark box drawn over them",
                        covered.len()
                    ),
                )
                .with_content(&covered.join(" "))
                .at(Location::Page(page.number)),
            );
        }
    }

    Ok(findings)
}

fn validate_geometry(page: &Page) -> Result<(), CheckError> {
    let shape_boxes = page.shapes.iter().map(|s| ("shape", s.bbox));
    let run_boxes = page.runs.iter().filter_map(|r| r.bbox.map(|b| ("text run", b)));

    for (what, bbox) in shape_boxes.chain(run_boxes) {
        if !bbox.is_finite() {
            return Err(CheckError::InvalidGeometry {
                page: page.number,
                detail: format!("{} has non-finite bounding box {:?}", what, bbox),
            });
        }
    }
    Ok(())
}

fn is_redaction_box(shape: &DrawnShape) -> bool {
    shape.opacity >= OPAQUE_FILL_THRESHOLD
        && shape.fill.as_ref().is_some_and(is_dark_fill)
        && shape.bbox.area() > 0.0
}

fn is_covered(run: &TextRun, shape: &DrawnShape) -> bool {
    if run.is_blank() || run.z_order >= shape.z_order {
        return false;
    }
    match run.bbox {
        Some(bbox) => coverage(&bbox, &shape.bbox) >= COVERAGE_THRESHOLD,
        None => false,
    }
}

/// Fraction of `text` lying under `cover`.
///
/// Zero-area runs are covered only when they sit inside the cover.
fn coverage(text: &Rect, cover: &Rect) -> f32 {
    let area = text.area();
    if area <= 0.0 {
        return if cover.contains(text) { 1.0 } else { 0.0 };
    }
    text.intersection_area(cover) / area
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Body, Color};

    fn redacted_page(run_box: Rect, run_z: u32, shape_z: u32) -> Document {
        let mut page = Page::new(2);
        page.add_run(
            TextRun::new("SSN 123-45-6789")
                .with_bbox(run_box)
                .with_z_order(run_z),
        );
        page.add_shape(DrawnShape::filled(
            Rect::new(100.0, 100.0, 300.0, 120.0),
            Color::BLACK,
            shape_z,
        ));
        let mut doc = Document::pdf();
        doc.add_page(page);
        doc
    }

    #[test]
    fn test_text_under_black_box() {
        let doc = redacted_page(Rect::new(110.0, 102.0, 250.0, 118.0), 1, 2);
        let findings = run(&doc).unwrap();

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].subtype(), "text_under_rectangle");
        assert_eq!(findings[0].severity(), Severity::Critical);
        assert_eq!(findings[0].content(), Some("SSN 123-45-6789"));
        assert_eq!(findings[0].location(), Some(Location::Page(2)));
    }

    #[test]
    fn test_text_drawn_above_box_not_flagged() {
        let doc = redacted_page(Rect::new(110.0, 102.0, 250.0, 118.0), 3, 2);
        assert!(run(&doc).unwrap().is_empty());
    }

    #[test]
    fn test_partial_overlap_threshold() {
        // 60% of the run lies under the box
        let doc = redacted_page(Rect::new(240.0, 100.0, 340.0, 120.0), 1, 2);
        assert_eq!(run(&doc).unwrap().len(), 1);

        // 20% of the run lies under the box
        let doc = redacted_page(Rect::new(280.0, 100.0, 380.0, 120.0), 1, 2);
        assert!(run(&doc).unwrap().is_empty());
    }

    #[test]
    fn test_light_or_translucent_fill_ignored() {
        let mut doc = redacted_page(Rect::new(110.0, 102.0, 250.0, 118.0), 1, 2);
        if let Body::Pages(pages) = &mut doc.body {
            pages[0].shapes[0].fill = Some(Color::rgb(200, 200, 200));
        }
        assert!(run(&doc).unwrap().is_empty());

        let mut doc = redacted_page(Rect::new(110.0, 102.0, 250.0, 118.0), 1, 2);
        if let Body::Pages(pages) = &mut doc.body {
            pages[0].shapes[0].opacity = 0.5;
        }
        assert!(run(&doc).unwrap().is_empty());
    }

    #[test]
    fn test_non_finite_geometry_is_error() {
        let bbox = Rect {
            x0: f32::NAN,
            y0: 0.0,
            x1: 10.0,
            y1: 10.0,
        };
        let doc = redacted_page(bbox, 1, 2);
        assert!(matches!(
            run(&doc),
            Err(CheckError::InvalidGeometry { page: 2, .. })
        ));
    }
}
