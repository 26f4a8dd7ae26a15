use crate::{DataStructure, Flags, MissingKey, Options};

#[test]
fn defaults() {
    let options = Options::default();
    assert_eq!(options, Options::new());
    assert!(options.is_unique());
    assert!(!options.is_fixed());
    assert_eq!(options.missing, MissingKey::Error);
    assert_eq!(options.data_structure, DataStructure::Auto);
}

#[test]
fn builder() {
    let options = Options::new()
        .capacity(7)
        .non_unique()
        .fixed()
        .missing(MissingKey::CreateFromKey)
        .data_structure(DataStructure::List);
    assert_eq!(options.capacity, 7);
    assert_eq!(options.flags, Flags::NON_UNIQUE | Flags::FIXED);
    assert!(!options.is_unique());
    assert!(options.is_fixed());
    assert_eq!(options.missing, MissingKey::CreateFromKey);
    assert_eq!(options.data_structure, DataStructure::List);
    let options = options.flags(Flags::empty());
    assert!(options.is_unique());
    assert!(!options.is_fixed());
}
