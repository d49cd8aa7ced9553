use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ClipweaveError::conflict("x")
            .to_string()
            .contains("parameter conflict:")
    );
    assert!(
        ClipweaveError::out_of_range("x")
            .to_string()
            .contains("out of range:")
    );
    assert!(ClipweaveError::overflow("x").to_string().contains("overflow:"));
    assert!(ClipweaveError::mismatch("x").to_string().contains("mismatch:"));
    assert!(
        ClipweaveError::degenerate("x")
            .to_string()
            .contains("degenerate result:")
    );
    assert!(
        ClipweaveError::protocol("x")
            .to_string()
            .contains("protocol error:")
    );
    assert!(
        ClipweaveError::source_failed("x")
            .to_string()
            .contains("source error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ClipweaveError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
