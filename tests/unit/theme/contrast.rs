use super::*;

fn gray(v: u8) -> Rgb8 {
    Rgb8::new(v, v, v)
}

#[test]
fn luminance_of_primaries_matches_weights() {
    assert!((relative_luminance(Rgb8::new(255, 0, 0)) - 0.2126).abs() < 1e-9);
    assert!((relative_luminance(Rgb8::new(0, 255, 0)) - 0.7152).abs() < 1e-9);
    assert!((relative_luminance(Rgb8::new(0, 0, 255)) - 0.0722).abs() < 1e-9);
    assert_eq!(relative_luminance(Rgb8::BLACK), 0.0);
    assert!((relative_luminance(Rgb8::WHITE) - 1.0).abs() < 1e-9);
}

#[test]
fn luminance_uses_linear_segment_for_small_channels() {
    let l = relative_luminance(gray(10));
    assert!((l - (10.0 / 255.0) / 12.92).abs() < 1e-12);
}

#[test]
fn luminance_is_bit_for_bit_deterministic() {
    for v in 0..=255u8 {
        let c = Rgb8::new(v, 255 - v, v / 2);
        assert_eq!(
            relative_luminance(c).to_bits(),
            relative_luminance(c).to_bits()
        );
    }
}

#[test]
fn foreground_flips_at_threshold() {
    // gray(117) sits just below the threshold, gray(118) just above.
    let below = relative_luminance(gray(117));
    let above = relative_luminance(gray(118));
    assert!(below < CONTRAST_THRESHOLD && CONTRAST_THRESHOLD - below < 0.002);
    assert!(above >= CONTRAST_THRESHOLD && above - CONTRAST_THRESHOLD < 0.003);

    assert_eq!(foreground_for(gray(117)), Rgb8::WHITE);
    assert_eq!(foreground_for(gray(118)), Rgb8::BLACK);
}

#[test]
fn foreground_agrees_with_luminance_everywhere() {
    for r in (0..=255u8).step_by(5) {
        for g in (0..=255u8).step_by(5) {
            for b in (0..=255u8).step_by(15) {
                let c = Rgb8::new(r, g, b);
                let expected = if relative_luminance(c) < 0.179 {
                    Rgb8::WHITE
                } else {
                    Rgb8::BLACK
                };
                assert_eq!(foreground_for(c), expected, "background {c}");
            }
        }
    }
}

#[test]
fn red_and_green_backgrounds_take_black_modules() {
    assert_eq!(foreground_for(Rgb8::new(255, 0, 0)), Rgb8::BLACK);
    assert_eq!(foreground_for(Rgb8::new(0, 255, 0)), Rgb8::BLACK);
}

#[test]
fn secondary_fill_lightens_dark_backgrounds() {
    let bg = gray(10);
    let l = relative_luminance(bg);
    assert!(l < CONTRAST_THRESHOLD);

    let factor = 1.0 + (0.5 - l) * 0.8;
    let boost = 15.0 - (l * 50.0).trunc();
    let expected = (10.0 * factor + boost) as u8;
    assert_eq!(expected, 28);
    assert_eq!(secondary_fill(bg), gray(28));

    assert_eq!(secondary_fill(Rgb8::BLACK), gray(15));
}

#[test]
fn secondary_fill_matches_formula_on_halloween_darks() {
    for bg in [Rgb8::new(38, 42, 32), Rgb8::new(67, 40, 26)] {
        let l = relative_luminance(bg);
        assert!(l < CONTRAST_THRESHOLD);
        let factor = 1.0 + (0.5 - l) * 0.8;
        let boost = (15.0 - (l * 50.0).trunc()).max(0.0);
        let ch = |c: u8| (f64::from(c) * factor + boost).min(255.0) as u8;
        assert_eq!(secondary_fill(bg), Rgb8::new(ch(bg.r), ch(bg.g), ch(bg.b)));
        assert!(secondary_fill(bg).r > bg.r);
    }
}

#[test]
fn secondary_fill_darkens_light_backgrounds() {
    assert_eq!(secondary_fill(Rgb8::WHITE), Rgb8::BLACK);
    assert_eq!(secondary_fill(Rgb8::new(0, 255, 0)), Rgb8::BLACK);

    let bg = Rgb8::new(159, 188, 191);
    let l = relative_luminance(bg);
    assert!(l >= CONTRAST_THRESHOLD);
    let factor = 1.0 - (l - 0.5) * 5.0;
    let ch = |c: u8| (f64::from(c) * factor).clamp(0.0, 255.0) as u8;
    assert_eq!(secondary_fill(bg), Rgb8::new(ch(bg.r), ch(bg.g), ch(bg.b)));
}

#[test]
fn secondary_fill_clamps_mid_tones_to_255() {
    // Between the threshold and 0.5 the "darken" factor exceeds 1.
    let bg = gray(128);
    let l = relative_luminance(bg);
    assert!(l >= CONTRAST_THRESHOLD && l < 0.5);
    assert_eq!(secondary_fill(bg), gray(255));
}
