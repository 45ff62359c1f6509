use photo_gallery::ImageDetails;
use photo_gallery::gallery::{GalleryLoadError, MANIFEST_FILE, load_gallery};
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

fn write_image(dir: &Path, name: &str, age_secs: u64) {
    let path = dir.join(name);
    fs::write(&path, b"fake image data").expect("failed to write test file");

    let modified = SystemTime::now() - Duration::from_secs(age_secs);
    fs::File::options()
        .write(true)
        .open(&path)
        .and_then(|file| file.set_modified(modified))
        .expect("failed to set mtime");
}

#[test]
fn lists_newest_images_first() {
    let dir = tempfile::tempdir().unwrap();
    write_image(dir.path(), "old.jpg", 3_000);
    write_image(dir.path(), "new.png", 10);
    write_image(dir.path(), "middle.webp", 600);
    fs::write(dir.path().join("notes.txt"), "not an image").unwrap();
    fs::create_dir(dir.path().join("nested.jpg")).unwrap();

    let images = load_gallery(dir.path()).unwrap();
    let names: Vec<_> = images.iter().map(|image| image.name.as_str()).collect();

    assert_eq!(names, ["new.png", "middle.webp", "old.jpg"]);
    assert!(images.iter().all(|image| image.path.starts_with(dir.path())));
}

#[test]
fn attaches_manifest_details() {
    let dir = tempfile::tempdir().unwrap();
    write_image(dir.path(), "giraffe.jpg", 100);
    write_image(dir.path(), "plain.jpg", 200);
    fs::write(
        dir.path().join(MANIFEST_FILE),
        r##"[
            (
                file: "giraffe.jpg",
                description: Some("A giraffe eating leaves"),
                tags: ["animal", "savanna"],
                colorPalette: ["#c49a6c", "#2f4f2f"],
                detectedObjects: ["giraffe", "tree"],
            ),
            (file: "deleted.jpg", tags: ["gone"]),
        ]"##,
    )
    .unwrap();

    let images = load_gallery(dir.path()).unwrap();
    assert_eq!(images.len(), 2);

    let giraffe = &images[0];
    assert_eq!(giraffe.name, "giraffe.jpg");
    assert_eq!(
        giraffe.details.description.as_deref(),
        Some("A giraffe eating leaves")
    );
    assert_eq!(giraffe.details.tags, ["animal", "savanna"]);
    assert_eq!(giraffe.details.color_palette.len(), 2);
    assert_eq!(giraffe.details.detected_objects, ["giraffe", "tree"]);

    assert_eq!(images[1].details, ImageDetails::default());
}

#[test]
fn broken_manifest_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    write_image(dir.path(), "a.jpg", 1);
    fs::write(dir.path().join(MANIFEST_FILE), "[ (file: ").unwrap();

    let err = load_gallery(dir.path()).unwrap_err();
    assert!(matches!(err, GalleryLoadError::ParseManifest(_)));
}

#[test]
fn empty_directory_yields_empty_gallery() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_gallery(dir.path()).unwrap().is_empty());
}
