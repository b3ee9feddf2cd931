use super::*;

const PUMPKIN: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="40" viewBox="0 0 4000 4000">
  <g transform="translate(0,0)">
    <rect x="0" y="0" width="1" height="1" fill="none"/>
    <path d="M1000 1000 L3000 1000 L3000 3000 L1000 3000 Z" fill="#000000"/>
  </g>
</svg>"##;

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "hitster_processor_test_{tag}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn cache_path_layout_is_exact() {
    let p = AssetProcessor::new("generated/images");
    let bg = Rgb8::new(38, 42, 32);
    assert_eq!(
        p.cache_path(Path::new("themes/images/pumpkin_1.svg"), bg, false),
        PathBuf::from("generated/images/pumpkin_1_38_42_32.png")
    );
    assert_eq!(
        p.cache_path(Path::new("pumpkin_1.svg"), bg, true),
        PathBuf::from("generated/images/pumpkin_1_38_42_32_outline.png")
    );
    assert_eq!(
        p.cache_path(Path::new("pumpkin.v2.svg"), bg, false),
        PathBuf::from("generated/images/pumpkin.v2_38_42_32.png")
    );
    assert_eq!(
        p.cache_path(Path::new("odd name.svg"), Rgb8::WHITE, false),
        PathBuf::from("generated/images/odd name_255_255_255.png")
    );
    assert_ne!(
        p.cache_path(Path::new("bat 1.svg"), bg, true),
        p.cache_path(Path::new("bat-1.svg"), bg, true)
    );
}

#[test]
fn absent_or_missing_asset_is_unavailable() {
    let dir = temp_dir("missing");
    let p = AssetProcessor::new(dir.join("cache"));
    assert_eq!(p.process(None, Rgb8::WHITE, true), Processed::Unavailable);
    assert_eq!(
        p.process(Some(&dir.join("nope.svg")), Rgb8::WHITE, true),
        Processed::Unavailable
    );
    assert!(matches!(
        p.try_process(&dir.join("nope.svg"), Rgb8::WHITE, true),
        Err(HitsterError::AssetUnavailable(_))
    ));
    assert!(!dir.join("cache").exists());
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn renders_recolored_raster_with_outline() {
    let dir = temp_dir("render");
    let src = dir.join("pumpkin_1.svg");
    std::fs::write(&src, PUMPKIN).unwrap();
    let p = AssetProcessor::new(dir.join("cache"));

    let bg = Rgb8::new(10, 10, 10);
    let out = p.process(Some(&src), bg, true);
    let Processed::Raster(path) = out else {
        panic!("expected raster, got {out:?}");
    };
    assert_eq!(path, dir.join("cache").join("pumpkin_1_10_10_10_outline.png"));

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (40, 40));
    // Center of the square carries the lightened fill.
    assert_eq!(img.get_pixel(20, 20), &image::Rgba([28, 28, 28, 255]));
    // Corners stay transparent.
    assert_eq!(img.get_pixel(0, 0)[3], 0);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn second_call_reuses_cache_without_touching_source() {
    let dir = temp_dir("cache");
    let src = dir.join("bat_1.svg");
    std::fs::write(&src, PUMPKIN).unwrap();
    let p = AssetProcessor::new(dir.join("cache"));
    let bg = Rgb8::new(159, 188, 191);

    let first = p.process(Some(&src), bg, false);
    let first_path = first.path().unwrap().to_path_buf();
    let first_bytes = std::fs::read(&first_path).unwrap();

    // Corrupt the source: a re-render would now fail and fall back.
    std::fs::write(&src, "not svg at all").unwrap();

    let second = p.process(Some(&src), bg, false);
    assert_eq!(second, first);
    assert_eq!(std::fs::read(&first_path).unwrap(), first_bytes);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn unparsable_svg_falls_back_to_source() {
    let dir = temp_dir("fallback");
    let src = dir.join("broken.svg");
    std::fs::write(&src, "<svg").unwrap();
    let p = AssetProcessor::new(dir.join("cache"));

    assert_eq!(
        p.process(Some(&src), Rgb8::WHITE, true),
        Processed::Fallback(src.clone())
    );
    assert!(matches!(
        p.try_process(&src, Rgb8::WHITE, true),
        Err(HitsterError::Processing(_))
    ));
    assert!(!p.cache_path(&src, Rgb8::WHITE, true).exists());

    std::fs::remove_dir_all(&dir).ok();
}
