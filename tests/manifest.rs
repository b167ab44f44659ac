use std::io::Cursor;
use std::path::PathBuf;

use imprint::{DesignManifest, ImprintError, encode_png, write_png};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "imprint_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn write_png_fixture(path: &std::path::Path, w: u32, h: u32, rgba: [u8; 4]) {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(path, &buf).unwrap();
}

const MANIFEST_JSON: &str = r#"{
    "base": "shirt.png",
    "defaults": { "reference_dim": 64, "box_ratio": 0.5 },
    "placements": [
        {
            "source": "art/red.png",
            "region": { "Point": { "center": { "x": 32.0, "y": 32.0 } } }
        },
        {
            "source": "art/badge.svg",
            "region": { "Drag": { "from": { "x": 56.0, "y": 56.0 }, "to": { "x": 40.0, "y": 48.0 } } }
        }
    ]
}"#;

#[test]
fn manifest_render_end_to_end() {
    init_tracing();
    let tmp = temp_dir("manifest_render");
    std::fs::create_dir_all(tmp.join("art")).unwrap();

    write_png_fixture(&tmp.join("shirt.png"), 64, 64, [255, 255, 255, 255]);
    write_png_fixture(&tmp.join("art/red.png"), 8, 8, [255, 0, 0, 255]);
    std::fs::write(
        tmp.join("art/badge.svg"),
        br##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="2">
            <rect x="0" y="0" width="4" height="2" fill="#0000ff"/>
        </svg>"##,
    )
    .unwrap();

    let manifest: DesignManifest = serde_json::from_str(MANIFEST_JSON).unwrap();
    manifest.validate().unwrap();

    let out = manifest.render(&tmp).unwrap();
    assert_eq!(out.dimensions(), (64, 64));

    // Fixed box: 32-px square centered at (32,32), red stretched over it.
    assert_eq!(out.get_pixel(32, 32).0, [255, 0, 0, 255]);
    assert_eq!(out.get_pixel(12, 12).0, [255, 255, 255, 255]);

    // Drag region (40,48)..(56,56): svg drawn 16 wide, 8 tall, blue.
    assert_eq!(out.get_pixel(47, 51).0, [0, 0, 255, 255]);
    assert_eq!(out.get_pixel(58, 52).0, [255, 255, 255, 255]);

    // Same manifest renders byte-identically.
    let again = manifest.render(&tmp).unwrap();
    assert_eq!(out.as_raw(), again.as_raw());

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn manifest_render_missing_asset_is_not_found() {
    init_tracing();
    let tmp = temp_dir("manifest_missing");
    std::fs::create_dir_all(&tmp).unwrap();
    write_png_fixture(&tmp.join("shirt.png"), 32, 32, [255, 255, 255, 255]);

    let manifest: DesignManifest = serde_json::from_str(
        r#"{
            "base": "shirt.png",
            "placements": [
                {
                    "source": "nope.png",
                    "region": { "Explicit": { "rect": { "x0": 0.0, "y0": 0.0, "x1": 8.0, "y1": 8.0 } } }
                }
            ]
        }"#,
    )
    .unwrap();

    let err = manifest.render(&tmp).unwrap_err();
    assert!(matches!(err, ImprintError::NotFound(_)));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn manifest_render_rejects_escaping_sources() {
    init_tracing();
    let tmp = temp_dir("manifest_escape");
    std::fs::create_dir_all(&tmp).unwrap();
    write_png_fixture(&tmp.join("shirt.png"), 32, 32, [255, 255, 255, 255]);

    let manifest: DesignManifest = serde_json::from_str(
        r#"{
            "base": "shirt.png",
            "placements": [
                {
                    "source": "../outside.png",
                    "region": { "Explicit": { "rect": { "x0": 0.0, "y0": 0.0, "x1": 8.0, "y1": 8.0 } } }
                }
            ]
        }"#,
    )
    .unwrap();

    let err = manifest.render(&tmp).unwrap_err();
    assert!(matches!(err, ImprintError::Validation(_)));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn rendered_output_encodes_to_png() {
    init_tracing();
    let tmp = temp_dir("manifest_encode");
    std::fs::create_dir_all(&tmp).unwrap();
    write_png_fixture(&tmp.join("shirt.png"), 16, 16, [128, 128, 128, 255]);

    let manifest: DesignManifest = serde_json::from_str(
        r#"{ "base": "shirt.png", "placements": [] }"#,
    )
    .unwrap();
    let image = manifest.render(&tmp).unwrap();

    let bytes = encode_png(&image).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

    let out_path = tmp.join("out/final.png");
    write_png(&out_path, &image).unwrap();
    let back = image::open(&out_path).unwrap().to_rgba8();
    assert_eq!(back.as_raw(), image.as_raw());

    std::fs::remove_dir_all(&tmp).ok();
}
