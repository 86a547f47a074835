use serde::{Deserialize, Serialize};
use xdr_variant::{
    DecodeOptions, Error, from_bytes, from_bytes_partial, from_bytes_with_options, from_reader,
    from_reader_with_options, to_bytes, to_writer,
};

#[test]
fn test_bool_encoding() {
    assert_eq!(to_bytes(&true).unwrap(), [0, 0, 0, 1]);
    assert_eq!(to_bytes(&false).unwrap(), [0, 0, 0, 0]);
    assert!(from_bytes::<bool>(&[0, 0, 0, 1]).unwrap());
}

#[test]
fn test_int_and_hyper_round_trip() {
    for v in [i32::MIN, -1, 0, 1, i32::MAX] {
        assert_eq!(v, from_bytes::<i32>(&to_bytes(&v).unwrap()).unwrap());
    }
    let v: i64 = -9_000_000_000;
    assert_eq!(v, from_bytes::<i64>(&to_bytes(&v).unwrap()).unwrap());
    assert_eq!(to_bytes(&0x0102030405060708u64).unwrap(), [1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn test_string_padding() {
    for (s, total) in [("", 4usize), ("A", 8), ("ABCD", 8), ("ABCDE", 12)] {
        let bytes = to_bytes(&s.to_string()).unwrap();
        assert_eq!(bytes.len(), total, "string {:?}", s);
        assert!(bytes[4 + s.len()..].iter().all(|&b| b == 0));
        assert_eq!(s, from_bytes::<String>(&bytes).unwrap());
    }
}

#[test]
fn test_optional_data() {
    assert_eq!(to_bytes(&Option::<u32>::None).unwrap(), [0, 0, 0, 0]);
    let bytes = to_bytes(&Some(42u32)).unwrap();
    assert_eq!(bytes, [0, 0, 0, 1, 0, 0, 0, 42]);
    assert_eq!(Some(42u32), from_bytes::<Option<u32>>(&bytes).unwrap());
    assert_eq!(
        from_bytes::<Option<u32>>(&[0, 0, 0, 2, 0, 0, 0, 42]).unwrap_err(),
        Error::InvalidOption(2)
    );
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct LedgerCloseInfo {
    ledger_seq: u32,
    close_time: u64,
    base_fee: u32,
}

#[test]
fn test_struct_fields_in_order() {
    let info = LedgerCloseInfo { ledger_seq: 7, close_time: 1_700_000_000, base_fee: 100 };
    let bytes = to_bytes(&info).unwrap();
    assert_eq!(bytes.len(), 16);
    assert_eq!(&bytes[..4], [0, 0, 0, 7]);
    assert_eq!(info, from_bytes(&bytes).unwrap());
}

#[test]
fn test_vec_count_prefix() {
    let v: Vec<u32> = vec![1, 2, 3, 4, 5];
    let bytes = to_bytes(&v).unwrap();
    assert_eq!(&bytes[..4], [0, 0, 0, 5]);
    assert_eq!(bytes.len(), 24);
    assert_eq!(v, from_bytes::<Vec<u32>>(&bytes).unwrap());
}

#[test]
fn test_tuple_no_count_prefix() {
    let v: (u32, u32, u32) = (1, 2, 3);
    let bytes = to_bytes(&v).unwrap();
    assert_eq!(bytes, [0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 3]);
    assert_eq!(v, from_bytes(&bytes).unwrap());
}

#[test]
fn test_void() {
    assert!(to_bytes(&()).unwrap().is_empty());
    from_bytes::<()>(&[]).unwrap();
}

#[test]
fn test_opaque_via_serde_bytes() {
    let data = serde_bytes::ByteBuf::from(vec![1u8, 2, 3]);
    let bytes = to_bytes(&data).unwrap();
    assert_eq!(bytes, [0, 0, 0, 3, 1, 2, 3, 0]);
    let decoded: serde_bytes::ByteBuf = from_bytes(&bytes).unwrap();
    assert_eq!(decoded.into_vec(), [1, 2, 3]);
}

#[test]
fn test_malformed_input_errors() {
    let eof = from_bytes::<u32>(&[0, 0, 0]).unwrap_err();
    assert_eq!(eof, Error::UnexpectedEof);
    assert!(eof.is_malformed_wire());

    assert_eq!(from_bytes::<bool>(&[0, 0, 0, 2]).unwrap_err(), Error::InvalidBool(2));
    assert_eq!(
        from_bytes::<String>(&[0, 0, 0, 2, 0xC3, 0x28, 0, 0]).unwrap_err(),
        Error::InvalidString
    );
}

#[test]
fn test_trailing_bytes_rejected() {
    let err = from_bytes::<u32>(&[0, 0, 0, 1, 0, 0, 0, 2]).unwrap_err();
    assert_eq!(err, Error::TrailingBytes(4));
    assert!(err.is_malformed_wire());
}

#[test]
fn test_length_prefix_larger_than_input() {
    // Claims u32::MAX elements; must fail on the first missing element
    // without trying to allocate for all of them.
    let err = from_bytes::<Vec<u32>>(&[0xFF, 0xFF, 0xFF, 0xFF]).unwrap_err();
    assert_eq!(err, Error::UnexpectedEof);
}

#[test]
fn test_partial_deserialization() {
    let mut buf = to_bytes(&42u32).unwrap();
    buf.extend(to_bytes(&99u32).unwrap());
    buf.extend([0xFF, 0xFF]);
    let (first, rest) = from_bytes_partial::<u32>(&buf).unwrap();
    assert_eq!(first, 42);
    let (second, remaining) = from_bytes_partial::<u32>(rest).unwrap();
    assert_eq!(second, 99);
    assert_eq!(remaining, [0xFF, 0xFF]);
}

#[test]
fn test_nesting_depth_limit() {
    // Option<Option<...>> nests one level per layer.
    type Nested = Option<Option<Option<Option<u32>>>>;
    let bytes = to_bytes(&Some(Some(Some(Some(1u32))))).unwrap();

    let tight = DecodeOptions::default().with_max_depth(3);
    assert_eq!(
        from_bytes_with_options::<Nested>(&bytes, tight).unwrap_err(),
        Error::RecursionLimitExceeded { max_depth: 3 }
    );
    let enough = DecodeOptions::default().with_max_depth(4);
    assert_eq!(
        from_bytes_with_options::<Nested>(&bytes, enough).unwrap(),
        Some(Some(Some(Some(1))))
    );
}

#[test]
fn test_to_writer_matches_to_bytes() {
    let info = LedgerCloseInfo { ledger_seq: 1, close_time: 2, base_fee: 3 };
    let mut written = Vec::new();
    to_writer(&mut written, &info).unwrap();
    assert_eq!(to_bytes(&info).unwrap(), written);

    let mut cursor = std::io::Cursor::new(Vec::new());
    to_writer(&mut cursor, &0xDEADBEEFu32).unwrap();
    assert_eq!(cursor.into_inner(), [0xDE, 0xAD, 0xBE, 0xEF]);
}

#[test]
fn test_from_reader_round_trip() {
    let info = LedgerCloseInfo { ledger_seq: 99, close_time: 3, base_fee: 0 };
    let bytes = to_bytes(&info).unwrap();
    let decoded: LedgerCloseInfo = from_reader(std::io::Cursor::new(bytes)).unwrap();
    assert_eq!(info, decoded);
}

#[test]
fn test_from_reader_errors() {
    let short = from_reader::<_, u32>(std::io::Cursor::new([0u8, 0, 0]));
    assert_eq!(short.unwrap_err(), Error::UnexpectedEof);

    let opts = DecodeOptions::default().with_max_input_len(4);
    let long = from_reader_with_options::<_, u32>(std::io::Cursor::new([0u8; 8]), opts);
    assert_eq!(long.unwrap_err(), Error::InputTooLarge { limit: 4 });
}

#[test]
fn test_from_reader_without_input_limit() {
    let opts = DecodeOptions::default().with_max_input_len(usize::MAX);
    let v = from_reader_with_options::<_, u32>(&[0u8, 0, 0, 7][..], opts).unwrap();
    assert_eq!(v, 7);

    let opts = DecodeOptions::default().with_max_input_len(usize::MAX);
    let info = LedgerCloseInfo { ledger_seq: 5, close_time: 6, base_fee: 7 };
    let bytes = to_bytes(&info).unwrap();
    assert_eq!(
        from_reader_with_options::<_, LedgerCloseInfo>(std::io::Cursor::new(bytes), opts).unwrap(),
        info
    );
}

// ── fixed-length opaque ────────────────────────────────────────────────────

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Hinted {
    weight: u32,
    #[serde(with = "xdr_variant::fixed_opaque")]
    hint: [u8; 4],
    #[serde(with = "xdr_variant::fixed_opaque")]
    tag: [u8; 5],
    flags: u32,
}

#[test]
fn test_fixed_opaque_wire_layout() {
    let v = Hinted { weight: 3, hint: [0xAA; 4], tag: [1, 2, 3, 4, 5], flags: 9 };
    let bytes = to_bytes(&v).unwrap();
    // 4 + 4 + (5 + 3 padding) + 4
    assert_eq!(bytes.len(), 20);
    assert_eq!(&bytes[4..8], [0xAA; 4]);
    assert_eq!(&bytes[8..16], [1, 2, 3, 4, 5, 0, 0, 0]);
    assert_eq!(v, from_bytes(&bytes).unwrap());
}

#[test]
fn test_fixed_opaque_vs_default_array() {
    #[derive(Serialize)]
    struct Plain {
        arr: [u8; 12],
    }
    assert_eq!(to_bytes(&Plain { arr: [0; 12] }).unwrap().len(), 48);
}

#[test]
fn test_fixed_opaque_sizes_are_aligned() {
    macro_rules! check_size {
        ($n:expr) => {{
            #[derive(Serialize, Deserialize, Debug, PartialEq)]
            struct W {
                #[serde(with = "xdr_variant::fixed_opaque")]
                data: [u8; $n],
            }
            let w = W { data: [0xABu8; $n] };
            let bytes = to_bytes(&w).unwrap();
            assert_eq!(bytes.len(), ($n + 3) / 4 * 4, "size {}", $n);
            assert!(bytes[$n..].iter().all(|&b| b == 0), "size {}", $n);
            assert_eq!(w, from_bytes::<W>(&bytes).unwrap(), "size {}", $n);
        }};
    }
    check_size!(0);
    check_size!(1);
    check_size!(3);
    check_size!(4);
    check_size!(12);
    check_size!(32);
}

#[test]
fn test_fixed_opaque_truncated_input() {
    #[derive(Debug, Deserialize)]
    struct Key {
        #[serde(with = "xdr_variant::fixed_opaque")]
        _raw: [u8; 32],
    }
    assert_eq!(from_bytes::<Key>(&[0u8; 31]).unwrap_err(), Error::UnexpectedEof);
}

// ── plain serde shapes ─────────────────────────────────────────────────────

#[derive(Debug, PartialEq, Serialize, Deserialize)]
enum Signal {
    Idle,
    Level(u32),
    Range { lo: u32, hi: u32 },
}

#[test]
fn test_derived_enum_uses_variant_index() {
    assert_eq!(to_bytes(&Signal::Idle).unwrap(), [0, 0, 0, 0]);
    let range = Signal::Range { lo: 1, hi: 2 };
    let bytes = to_bytes(&range).unwrap();
    assert_eq!(bytes, [0, 0, 0, 2, 0, 0, 0, 1, 0, 0, 0, 2]);
    assert_eq!(from_bytes::<Signal>(&bytes).unwrap(), range);
    assert_eq!(from_bytes::<Signal>(&[0, 0, 0, 1, 0, 0, 0, 5]).unwrap(), Signal::Level(5));
}

#[test]
fn test_map_as_counted_pairs() {
    let mut m = std::collections::BTreeMap::new();
    m.insert(1u32, 10i64);
    m.insert(2u32, -1i64);
    let bytes = to_bytes(&m).unwrap();
    assert_eq!(&bytes[..4], [0, 0, 0, 2]);
    assert_eq!(bytes.len(), 4 + 2 * (4 + 8));
    assert_eq!(from_bytes::<std::collections::BTreeMap<u32, i64>>(&bytes).unwrap(), m);
}
