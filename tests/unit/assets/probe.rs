use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("swipe-scene-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn png_reports_size_and_single_frame() {
    let dir = scratch_dir("png");
    image::RgbaImage::new(7, 3).save(dir.join("a.png")).unwrap();

    let mut media = FsMediaBackend::new(&dir);
    let info = media.probe_image(&ResourceUrl::new("a.png")).unwrap();
    assert_eq!(
        info,
        ImageInfo {
            width: 7,
            height: 3,
            frame_count: 1
        }
    );

    let abs = ResourceUrl::new(format!("file://{}", dir.join("a.png").display()));
    assert_eq!(media.probe_image(&abs).unwrap().width, 7);
}

#[test]
fn gif_counts_frames() {
    let dir = scratch_dir("gif");
    let mut buf = Vec::new();
    {
        let mut encoder = image::codecs::gif::GifEncoder::new(&mut buf);
        let frames = (0..3).map(|_| image::Frame::new(image::RgbaImage::new(4, 2)));
        encoder.encode_frames(frames).unwrap();
    }
    std::fs::write(dir.join("anim.gif"), &buf).unwrap();

    let info = probe_file(&dir.join("anim.gif")).unwrap();
    assert_eq!((info.width, info.height, info.frame_count), (4, 2, 3));
}

#[test]
fn missing_and_remote_images_fail() {
    let mut media = FsMediaBackend::new(scratch_dir("missing"));
    assert!(media.probe_image(&ResourceUrl::new("nope.png")).is_err());
    assert!(matches!(
        media.probe_image(&ResourceUrl::new("https://example.com/a.png")),
        Err(SceneError::MissingResource(_))
    ));
    assert!(
        media
            .open_video(&ResourceUrl::new("clip.mp4"), false)
            .is_err()
    );
}

#[test]
fn text_estimate_wraps_lines() {
    let mut media = FsMediaBackend::new(".");
    assert_eq!(media.measure_text("abcd", 10.0, 20.0), 12.0);
    assert_eq!(media.measure_text("abcdefgh", 10.0, 20.0), 24.0);
    assert_eq!(media.measure_text("a\nb", 10.0, 100.0), 24.0);
    assert_eq!(media.measure_text("abcdefgh", 10.0, 0.0), 12.0);
    assert_eq!(media.measure_text("x", 0.0, 10.0), 0.0);
}

#[test]
fn unusable_font_falls_back_to_estimate() {
    let mut media = FsMediaBackend::new(".").with_font(b"not a font".to_vec());
    assert_eq!(media.measure_text("abcd", 10.0, 20.0), 12.0);
}
