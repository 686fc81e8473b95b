use qpack::{FormatError, QpackDecoder, QpackEncoder, QpackValue, TextDecoding};

fn obj(fields: &[(&str, QpackValue)]) -> QpackValue {
    QpackValue::Map(
        fields
            .iter()
            .map(|(k, v)| (QpackValue::Str((*k).to_owned()), v.clone()))
            .collect(),
    )
}

fn roundtrip_text(value: &QpackValue) -> QpackValue {
    let mut encoder = QpackEncoder::new();
    let mut decoder = QpackDecoder::new_text(TextDecoding::Utf8);
    let encoded = encoder.encode(value).expect("encode");
    let (decoded, consumed) = decoder
        .decode(&encoded)
        .unwrap_or_else(|e| panic!("decode failed for {value:?}: {e}"));
    assert_eq!(consumed, encoded.len(), "whole buffer consumed");
    decoded
}

#[test]
fn roundtrip_value_matrix() {
    let values = vec![
        QpackValue::Null,
        QpackValue::Bool(true),
        QpackValue::Bool(false),
        QpackValue::Int(0),
        QpackValue::Int(63),
        QpackValue::Int(64),
        QpackValue::Int(-1),
        QpackValue::Int(-60),
        QpackValue::Int(-61),
        QpackValue::Int(123_456_789),
        QpackValue::Int(-4_807_526_976),
        QpackValue::Int(i64::MAX),
        QpackValue::Int(i64::MIN),
        QpackValue::Double(0.0),
        QpackValue::Double(1.0),
        QpackValue::Double(-1.0),
        QpackValue::Double(3_456.123_456_789_022_4),
        QpackValue::Str("".into()),
        QpackValue::Str("abc".into()),
        QpackValue::Str("héllo wörld ☃".into()),
        QpackValue::Str("a".repeat(99)),
        QpackValue::Str("a".repeat(100)),
        QpackValue::Str("a".repeat(256)),
        QpackValue::Str("a".repeat(70_000)),
        QpackValue::Array(vec![
            QpackValue::Int(1),
            QpackValue::Array(vec![QpackValue::Int(2)]),
            obj(&[("k", QpackValue::Bool(true))]),
        ]),
        QpackValue::Array((0..100).map(QpackValue::Int).collect()),
        obj(&[("foo", QpackValue::Str("bar".into()))]),
        obj(&[
            ("a", QpackValue::Int(1)),
            ("b", QpackValue::Int(2)),
            ("c", QpackValue::Int(3)),
            ("d", QpackValue::Int(4)),
            ("e", QpackValue::Int(5)),
            ("f", QpackValue::Int(6)),
            ("g", obj(&[("nested", QpackValue::Null)])),
        ]),
    ];

    for value in values {
        let decoded = roundtrip_text(&value);
        assert_eq!(decoded, value);
    }
}

#[test]
fn roundtrip_doubles_bitwise() {
    let specials = [
        f64::NAN,
        f64::from_bits(0x7ff8_0000_0000_0001), // NaN with payload
        f64::INFINITY,
        f64::NEG_INFINITY,
        -0.0,
        f64::MIN_POSITIVE,
        f64::MAX,
    ];
    for f in specials {
        let value = QpackValue::Double(f);
        let decoded = roundtrip_text(&value);
        assert!(
            decoded.bitwise_eq(&value),
            "bit pattern not preserved for {f:?}"
        );
    }
}

#[test]
fn roundtrip_non_string_map_keys() {
    let value = QpackValue::Map(vec![
        (QpackValue::Int(1), QpackValue::Str("one".into())),
        (QpackValue::Bool(true), QpackValue::Null),
        (
            QpackValue::Array(vec![QpackValue::Int(1), QpackValue::Int(2)]),
            QpackValue::Int(3),
        ),
    ]);
    assert_eq!(roundtrip_text(&value), value);
}

#[test]
fn roundtrip_duplicate_map_keys() {
    let value = QpackValue::Map(vec![
        (QpackValue::Str("k".into()), QpackValue::Int(1)),
        (QpackValue::Str("k".into()), QpackValue::Int(2)),
    ]);
    // The codec neither deduplicates nor reorders colliding pairs.
    assert_eq!(roundtrip_text(&value), value);
}

#[test]
fn roundtrip_bytes_in_raw_mode() {
    let mut encoder = QpackEncoder::new();
    let mut decoder = QpackDecoder::new();
    let value = QpackValue::Bytes((0..=255u8).collect());
    let encoded = encoder.encode(&value).expect("encode");
    let (decoded, _) = decoder.decode(&encoded).expect("decode");
    assert_eq!(decoded, value);
}

#[test]
fn raw_mode_returns_text_payloads_as_bytes() {
    let mut encoder = QpackEncoder::new();
    let mut decoder = QpackDecoder::new();
    let encoded = encoder
        .encode(&QpackValue::Str("text".into()))
        .expect("encode");
    let (decoded, _) = decoder.decode(&encoded).expect("decode");
    assert_eq!(decoded, QpackValue::Bytes(b"text".to_vec()));
}

#[test]
fn every_strict_prefix_of_valid_encoding_fails() {
    let value = obj(&[
        ("nums", QpackValue::Array((0..10).map(QpackValue::Int).collect())),
        ("text", QpackValue::Str("truncation probe".into())),
        ("wide", QpackValue::Int(1 << 40)),
        ("f", QpackValue::Double(2.5)),
        (
            "nested",
            obj(&[("deep", QpackValue::Array(vec![QpackValue::Null]))]),
        ),
        ("tail", QpackValue::Bool(false)),
    ]);
    let mut encoder = QpackEncoder::new();
    let encoded = encoder.encode(&value).expect("encode");
    let mut decoder = QpackDecoder::new();
    for cut in 0..encoded.len() {
        assert_eq!(
            decoder.decode(&encoded[..cut]),
            Err(FormatError::UnexpectedEof),
            "prefix of {cut} bytes must fail"
        );
    }
    assert!(decoder.decode(&encoded).is_ok());
}

#[test]
fn concatenated_stream_decodes_by_consumed_count() {
    let values = [
        QpackValue::Int(42),
        QpackValue::Str("two".into()),
        QpackValue::Array(vec![QpackValue::Bool(true), QpackValue::Null]),
    ];
    let mut encoder = QpackEncoder::new();
    let mut stream = Vec::new();
    for value in &values {
        stream.extend(encoder.encode(value).expect("encode"));
    }

    let mut decoder = QpackDecoder::new_text(TextDecoding::Utf8);
    let mut offset = 0;
    let mut decoded = Vec::new();
    while offset < stream.len() {
        let (value, consumed) = decoder.decode(&stream[offset..]).expect("decode");
        decoded.push(value);
        offset += consumed;
    }
    assert_eq!(decoded, values);
}

#[test]
fn nesting_just_below_limit_roundtrips() {
    let mut value = QpackValue::Int(7);
    for _ in 0..100 {
        value = QpackValue::Array(vec![value]);
    }
    assert_eq!(roundtrip_text(&value), value);
}

#[test]
fn adversarial_nesting_is_rejected() {
    // A long run of open-array tags with no terminator must fail on the
    // depth bound, not by exhausting the call stack.
    let input = vec![0xfc; 100_000];
    let mut decoder = QpackDecoder::new();
    assert_eq!(decoder.decode(&input), Err(FormatError::NestingTooDeep));
}
