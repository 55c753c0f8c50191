use handwrite_gen::layout::LayoutOptions;
use handwrite_gen::{Document, Editor, HandwritingError, ImageFormat};

fn editor_with(text: &str) -> Editor {
    let mut editor = Editor::new(Some(12));
    editor.set_options(LayoutOptions {
        title: "Shopping".into(),
        show_title: true,
        ..Default::default()
    });
    editor.set_text(text);
    editor
}

#[test]
fn single_page_exports_under_a_plain_name() {
    let dir = tempfile::tempdir().unwrap();
    let document = editor_with("milk\neggs").export_document().unwrap();
    let written = document.write_images(dir.path(), ImageFormat::Png).unwrap();

    assert_eq!(written, vec![dir.path().join("handwritten-note.png")]);
    let page = image::open(&written[0]).unwrap();
    assert_eq!((page.width(), page.height()), (600, 800));
}

#[test]
fn multi_page_exports_are_numbered_from_one() {
    let dir = tempfile::tempdir().unwrap();
    let text = vec!["item"; 20].join("\n");
    let document = editor_with(&text).export_document().unwrap();
    assert_eq!(document.page_count(), 2);

    let written = document.write_images(dir.path(), ImageFormat::Jpeg).unwrap();
    let names: Vec<_> = written
        .iter()
        .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(str::to_owned))
        .collect();
    assert_eq!(names, ["handwritten-note-page-1.jpg", "handwritten-note-page-2.jpg"]);
    assert!(written.iter().all(|p| p.is_file()));
}

#[test]
fn pdf_export_carries_every_page() {
    let text = vec!["item"; 40].join("\n");
    let document = editor_with(&text).export_document().unwrap();

    let mut pdf = Vec::new();
    document.write_pdf(&mut pdf).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
    let raw = String::from_utf8_lossy(&pdf);
    assert!(raw.contains("/Count 3"));
    assert!(raw.contains("/Title (Shopping)"));
    assert_eq!(raw.matches("/MediaBox [0 0 600 800]").count(), 3);
}

#[test]
fn nothing_to_export_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let err = Document::default()
        .write_images(dir.path(), ImageFormat::Png)
        .unwrap_err();
    assert!(matches!(err, HandwritingError::NoContent));
    assert_eq!(err.to_string(), "no content to export");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
