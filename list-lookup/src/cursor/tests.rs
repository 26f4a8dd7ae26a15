use {
    crate::{Error, ListLookupDictionary},
    alloc::vec::Vec,
};

fn drain(
    cursor: &mut crate::Cursor,
    dict: &ListLookupDictionary<u32, u32>,
) -> Result<Vec<(usize, u32)>, Error> {
    let mut res = Vec::new();
    while let Some((i, v)) = cursor.next(dict)? {
        res.push((i, *v));
    }
    Ok(res)
}

#[test]
fn visits_visible_elements() {
    let mut dict: ListLookupDictionary<u32, u32> = [1, 2, 3].into();
    dict.hide_at(1).unwrap();
    let mut cursor = dict.cursor();
    assert_eq!(drain(&mut cursor, &dict).unwrap(), [(0, 1), (2, 3)]);
    assert_eq!(cursor.next(&dict), Ok(None));
    assert_eq!(cursor.position(), 3);
}

#[test]
fn append_keeps_cursor_valid() {
    let mut dict: ListLookupDictionary<u32, u32> = [1, 2].into();
    let mut cursor = dict.cursor();
    assert_eq!(cursor.next(&dict), Ok(Some((0, &1))));
    dict.add(3).unwrap();
    dict.set_capacity(100).unwrap();
    assert_eq!(drain(&mut cursor, &dict).unwrap(), [(1, 2), (2, 3)]);
}

#[test]
fn append_across_representation_switch() {
    let mut dict: ListLookupDictionary<u32, u32> = (0..32).collect();
    let mut cursor = dict.cursor();
    dict.add(32).unwrap();
    assert_eq!(drain(&mut cursor, &dict).unwrap().len(), 33);
}

#[test]
fn hide_keeps_cursor_valid() {
    let mut dict: ListLookupDictionary<u32, u32> = [1, 2, 3].into();
    let mut cursor = dict.cursor();
    dict.hide_at(2).unwrap();
    assert_eq!(drain(&mut cursor, &dict).unwrap(), [(0, 1), (1, 2)]);
}

#[test]
fn structural_changes_are_detected() {
    type Op = fn(&mut ListLookupDictionary<u32, u32>);
    let ops: [Op; 6] = [
        |d| {
            d.remove_at(0).unwrap();
        },
        |d| d.remove_range(0, 1).unwrap(),
        |d| d.insert(0, 10).unwrap(),
        |d| {
            d.set(1, 20).unwrap();
        },
        |d| d.clear(),
        |d| drop(d.rebuild_data_structure(alloc::vec![7]).unwrap()),
    ];
    for op in ops {
        let mut dict: ListLookupDictionary<u32, u32> = [1, 2, 3].into();
        let mut cursor = dict.cursor();
        cursor.next(&dict).unwrap();
        op(&mut dict);
        assert_eq!(
            cursor.next(&dict),
            Err(Error::ConcurrentModification {
                expected: 0,
                found: 1,
            }),
        );
    }
}

#[test]
fn reset() {
    let mut dict: ListLookupDictionary<u32, u32> = [1, 2, 3].into();
    let mut cursor = dict.cursor();
    dict.remove_at(0).unwrap();
    assert!(cursor.next(&dict).is_err());
    cursor.reset(&dict).unwrap();
    assert_eq!(drain(&mut cursor, &dict).unwrap(), [(0, 3), (1, 2)]);
}

#[test]
fn foreign_collection() {
    let a: ListLookupDictionary<u32, u32> = [1].into();
    let b: ListLookupDictionary<u32, u32> = [1].into();
    let mut cursor = a.cursor();
    assert_eq!(cursor.next(&b), Err(Error::Ownership));
    assert_eq!(cursor.reset(&b), Err(Error::Ownership));
}
