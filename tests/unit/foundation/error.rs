use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        HitsterError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        HitsterError::asset_unavailable("x")
            .to_string()
            .contains("asset unavailable:")
    );
    assert!(
        HitsterError::processing("x")
            .to_string()
            .contains("processing failure:")
    );
    assert!(
        HitsterError::render("x")
            .to_string()
            .contains("render failure:")
    );
    assert!(
        HitsterError::setup("x")
            .to_string()
            .contains("setup failure:")
    );
}

#[test]
fn only_configuration_and_setup_are_fatal() {
    assert!(HitsterError::configuration("x").is_fatal());
    assert!(HitsterError::setup("x").is_fatal());
    assert!(!HitsterError::asset_unavailable("x").is_fatal());
    assert!(!HitsterError::processing("x").is_fatal());
    assert!(!HitsterError::render("x").is_fatal());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = HitsterError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
    assert!(!err.is_fatal());
}
