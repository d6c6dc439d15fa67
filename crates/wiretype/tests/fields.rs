//! Reads and writes runs of header + varint fields through the public API.

#![expect(unused_crate_dependencies, reason = "lib deps unused by this test")]

use proptest::prelude::*;
use wiretype::{
    Kind, MAX_VARINT32_LEN, ReadConfig, TypeDetail, WireError, WireReader, WireWriter,
    read_varint_u32, write_varint_i32, write_varint_u32,
};

#[derive(Clone, Debug, PartialEq)]
enum Field {
    U32(u32),
    I64(i64),
    F64(f64),
}

fn write_fields(fields: &[Field]) -> Vec<u8> {
    let mut w = WireWriter::new();
    for (i, f) in fields.iter().enumerate() {
        w.write_detail(
            TypeDetail::new()
                .with_kind(Kind::Varint)
                .with_ordinal(i as u32 + 1),
        );

        let res = match f {
            Field::U32(v) => w.write_varint(*v),
            Field::I64(v) => w.write_varint(*v),
            Field::F64(v) => w.write_varint(*v),
        };
        res.expect("test: write field");
    }
    w.into_inner()
}

fn read_fields(buf: &[u8], shapes: &[Field]) -> Result<Vec<Field>, WireError> {
    let mut r = WireReader::with_config(buf, ReadConfig::strict());
    let mut out = Vec::new();
    for (i, shape) in shapes.iter().enumerate() {
        let d = r.read_detail()?;
        assert_eq!(d.kind()?, Kind::Varint);
        assert_eq!(d.ordinal(), i as u32 + 1);

        let f = match shape {
            Field::U32(_) => Field::U32(r.read_varint()?),
            Field::I64(_) => Field::I64(r.read_varint()?),
            Field::F64(_) => Field::F64(r.read_varint()?),
        };
        out.push(f);
    }
    assert!(r.is_finished());
    Ok(out)
}

fn arb_field() -> impl Strategy<Value = Field> {
    prop_oneof![
        any::<u32>().prop_map(Field::U32),
        any::<i64>().prop_map(Field::I64),
        // Finite only, NaN never compares equal.
        (-1.0e300f64..1.0e300).prop_map(Field::F64),
    ]
}

#[test]
fn test_known_bytes() {
    let buf = write_fields(&[Field::U32(150), Field::I64(-1)]);

    let mut expected = vec![0x00, 0x01, 0x00, 0x00, 0x96, 0x01, 0x00, 0x02, 0x00, 0x00];
    expected.extend([0xff; 9]);
    expected.push(0x01);
    assert_eq!(buf, expected);
}

#[test]
fn test_unrecognized_kind_surfaces() {
    let mut buf = TypeDetail::from_raw(0x0000_0170).to_bytes().to_vec();
    buf.push(0x05);

    let mut r = WireReader::new(&buf);
    let d = r.read_detail().expect("test: header");
    assert_eq!(d.kind(), Err(WireError::UnrecognizedKind(7)));
    assert_eq!(d.ordinal(), 1);

    // The payload is still there for a caller that wants to skip it.
    assert_eq!(r.read_varint::<u32>(), Ok(5));
}

#[test]
fn test_negative_i32_uses_full_width() {
    let mut a = [0; MAX_VARINT32_LEN];
    let mut b = [0; MAX_VARINT32_LEN];
    let n = write_varint_i32(-1, &mut a).expect("test: write i32");
    let m = write_varint_u32(u32::MAX, &mut b).expect("test: write u32");
    assert_eq!((n, a), (m, b));
    assert_eq!(read_varint_u32(&a), Ok((u32::MAX, 5)));
}

#[test]
fn test_header_then_truncated_payload() {
    let mut w = WireWriter::new();
    w.write_detail(TypeDetail::new().with_ordinal(3));
    let mut buf = w.into_inner();
    buf.extend([0x80, 0x80]);

    let mut r = WireReader::new(&buf);
    r.read_detail().expect("test: header");
    let err = r.read_varint::<u64>().unwrap_err();
    assert!(err.is_invalid_argument());
    assert_eq!(r.remaining(), 2);
}

proptest! {
    #[test]
    fn fields_roundtrip(fields in prop::collection::vec(arb_field(), 0..16)) {
        let buf = write_fields(&fields);
        let back = read_fields(&buf, &fields).expect("read fields");
        prop_assert_eq!(back, fields);
    }
}
