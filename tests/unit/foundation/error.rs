use super::*;

#[test]
fn user_facing_variants_are_flagged() {
    assert!(FramecraftError::UnsupportedFormat("text/plain".into()).is_user_facing());
    assert!(
        FramecraftError::FileTooLarge {
            size: 12,
            limit: 10,
        }
        .is_user_facing()
    );
    assert!(FramecraftError::decode("bad bytes").is_user_facing());
    assert!(
        FramecraftError::DimensionTooSmall {
            width: 10,
            height: 10,
            min: 64,
        }
        .is_user_facing()
    );
    assert!(!FramecraftError::validation("internal").is_user_facing());
}

#[test]
fn messages_name_the_limit() {
    let e = FramecraftError::FileTooLarge {
        size: 12_582_912,
        limit: 10_485_760,
    };
    let msg = e.to_string();
    assert!(msg.contains("12582912"));
    assert!(msg.contains("10485760"));
}

#[test]
fn anyhow_errors_wrap_transparently() {
    let inner = anyhow::anyhow!("backend exploded");
    let e = FramecraftError::from(inner);
    assert_eq!(e.to_string(), "backend exploded");
}
