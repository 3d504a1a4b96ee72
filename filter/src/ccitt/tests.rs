use super::*;
use hex_literal::hex;
use test_case::test_case;

fn params(columns: i32) -> CcittParams {
    CcittParams {
        columns,
        ..Default::default()
    }
}

fn one_row(columns: i32) -> CcittParams {
    CcittParams {
        columns,
        rows: 1,
        end_of_block: false,
        ..Default::default()
    }
}

/// Rows of `columns` pixels with runs of assorted lengths, padding bits zero.
fn image(columns: usize, rows: usize) -> Vec<u8> {
    let row_bytes = columns.div_ceil(8);
    let mut seed = 7u32;
    let mut r = Vec::with_capacity(row_bytes * rows);
    for _ in 0..rows {
        for _ in 0..row_bytes {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12345);
            r.push(match (seed >> 16) % 6 {
                0 | 1 => 0xff,
                2 | 3 => 0x00,
                4 => 0x0f,
                _ => (seed >> 8) as u8,
            });
        }
        if columns % 8 != 0 {
            let last = r.len() - 1;
            r[last] &= 0xff << (8 - columns % 8);
        }
    }
    r
}

#[test]
fn white_row_with_rtc() {
    let p = params(8);
    let encoded = p.encode(&[0xff], &Options::default()).unwrap();
    // white 8, then six EOLs
    assert_eq!(hex!("98 00 80 08 00 80 08 00 80 08").to_vec(), encoded);
    assert_eq!(vec![0xff], p.decode(&encoded, &Options::default()).unwrap());
}

#[test_case(one_row(8), &[0xff] => hex!("98").to_vec(); "white 8")]
#[test_case(one_row(8), &[0x0f] => hex!("35 76").to_vec(); "starts with black")]
#[test_case(one_row(10), &[0xff, 0xc0] => hex!("38").to_vec(); "row padding ignored")]
#[test_case(
    CcittParams { black_is_1: true, ..one_row(8) }, &[0xff]
    => hex!("35 14").to_vec(); "black is 1"
)]
#[test_case(
    CcittParams { end_of_line: true, rows: 2, ..one_row(8) }, &[0xf0, 0x00]
    => hex!("00 1b 60 02 6a 28").to_vec(); "end of line"
)]
#[test_case(
    CcittParams { encoded_byte_align: true, rows: 2, ..one_row(8) }, &[0xf0, 0x00]
    => hex!("b6 35 14").to_vec(); "byte align"
)]
fn encode(p: CcittParams, raw: &[u8]) -> Vec<u8> {
    let encoded = p.encode(raw, &Options::default()).unwrap();
    assert_eq!(raw.to_vec(), p.decode(&encoded, &Options::default()).unwrap());
    encoded
}

#[test_case(4005, &[0b0000_0001, 0b1111_0110, 0b1101_1000, 0b1011_0000]; "long white run")]
#[test_case(64, &[0b1101_1001, 0b1010_1000]; "white makeup then 0")]
fn decode_white_row(columns: i32, input: &[u8]) {
    let decoded = one_row(columns).decode(input, &Options::default()).unwrap();
    let mut expected = vec![0xffu8; columns as usize / 8];
    if columns % 8 != 0 {
        expected.push(0xff << (8 - columns % 8));
    }
    assert_eq!(expected, decoded);
}

#[test]
fn decode_black_zero_run() {
    // white 4, black 0, white 4
    assert_eq!(
        vec![0xff],
        one_row(8).decode(&hex!("b0 de c0"), &Options::default()).unwrap()
    );
}

#[test_log::test]
fn trailing_fill_without_rtc() {
    assert_eq!(
        vec![0xff],
        params(8).decode(&hex!("98"), &Options::default()).unwrap()
    );
}

#[test]
fn rows_limit_stops_early() {
    let p = CcittParams {
        rows: 2,
        ..params(8)
    };
    let encoded = params(8)
        .encode(&[0xff, 0x00, 0x0f], &Options::default())
        .unwrap();
    assert_eq!(vec![0xff, 0x00], p.decode(&encoded, &Options::default()).unwrap());
}

#[test_case(1, 9)]
#[test_case(7, 5)]
#[test_case(13, 4)]
#[test_case(1728, 3)]
#[test_case(3000, 2; "runs beyond 2560")]
fn round_trip_every_framing(columns: usize, rows: usize) {
    let mut raw = image(columns, rows);
    let row_bytes = columns.div_ceil(8);
    // a full white row and a full black row
    raw.extend(std::iter::repeat(0xff).take(row_bytes));
    let last = raw.len() - 1;
    if columns % 8 != 0 {
        raw[last] &= 0xff << (8 - columns % 8);
    }
    raw.extend(std::iter::repeat(0x00).take(row_bytes));
    let rows = rows + 2;

    for flags in 0..16 {
        let p = CcittParams {
            columns: columns as i32,
            rows: rows as i32,
            end_of_line: flags & 1 != 0,
            encoded_byte_align: flags & 2 != 0,
            end_of_block: flags & 4 != 0,
            black_is_1: flags & 8 != 0,
            ..Default::default()
        };
        let encoded = p.encode(&raw, &Options::default()).unwrap();
        assert_eq!(
            raw,
            p.decode(&encoded, &Options::default()).unwrap(),
            "flags {:?}",
            p
        );
    }
}

#[test]
fn empty_input() {
    let p = params(8);
    let encoded = p.encode(&[], &Options::default()).unwrap();
    assert_eq!(Vec::<u8>::new(), p.decode(&encoded, &Options::default()).unwrap());
    assert_eq!(
        Vec::<u8>::new(),
        one_row(8).decode(&[], &Options::default()).unwrap()
    );
}

#[test_case(-1)]
#[test_case(1)]
#[test_case(4)]
fn two_dimensional_unsupported(k: i32) {
    let p = CcittParams { k, ..params(8) };
    assert_eq!(
        DecodeError::Unsupported(Unsupported::TwoDimensionalFax(k)),
        p.decode(&[0xff], &Options::default()).unwrap_err()
    );
    assert!(matches!(
        p.encode(&[0xff], &Options::default()),
        Err(EncodeError::Unsupported(Unsupported::TwoDimensionalFax(v))) if v == k
    ));
}

#[test_case(params(0) => ConfigError::InvalidColumns(0))]
#[test_case(params(-8) => ConfigError::InvalidColumns(-8))]
#[test_case(CcittParams { rows: -1, ..params(8) } => ConfigError::InvalidRows(-1))]
#[test_case(CcittParams { end_of_block: false, ..params(8) } => ConfigError::InvalidRows(0))]
fn invalid_config(p: CcittParams) -> ConfigError {
    // rejected before any bit is read, so no partial output
    match p.decode(&hex!("98"), &Options::default()).unwrap_err() {
        DecodeError::Config(e) => e,
        e => panic!("expect config error, got {:?}", e),
    }
}

#[test]
fn encode_partial_row() {
    assert!(matches!(
        params(10).encode(&[0xff], &Options::default()),
        Err(EncodeError::InvalidInput(Malformed::PartialRow { len: 1, row: 2 }))
    ));
}

#[test_case(
    CcittParams { end_of_line: true, ..one_row(8) }, &hex!("98")
    => (Malformed::MissingEndOfLine { bit: 0 }, vec![]); "missing eol"
)]
#[test_case(one_row(4), &hex!("98") => (Malformed::LineTooLong { bit: 5 }, vec![]); "line too long")]
#[test_case(
    one_row(16), &hex!("98")
    => (Malformed::UnfinishedLine { bit: 5 }, vec![0xff]); "unfinished line"
)]
#[test_case(one_row(8), &hex!("00 00 80") => (Malformed::InvalidCode(0), vec![]); "invalid code")]
fn malformed(p: CcittParams, input: &[u8]) -> (Malformed, Vec<u8>) {
    let err = p.decode(input, &Options::default()).unwrap_err();
    let DecodeError::InvalidEncoding(e) = err else {
        panic!("expect invalid encoding");
    };
    assert_eq!(FilterKind::CcittFax, e.filter);
    assert_eq!(input.to_vec(), e.input);
    (e.reason, e.partial)
}

#[test]
fn code_tables_agree_with_lookup() {
    for color in [Color::White, Color::Black] {
        for run in 0..64 {
            let (code, len) = codes::terminal(color, run);
            let slot = codes::lookup(color, u32::from(code) << (MAX_CODE_LEN - u32::from(len)));
            assert_eq!((run, len, true), (slot.run, slot.len, slot.terminal));
        }
        for run in (64..=MAX_MAKEUP).step_by(64) {
            let (code, len) = codes::makeup(color, run);
            let slot = codes::lookup(color, u32::from(code) << (MAX_CODE_LEN - u32::from(len)));
            assert_eq!((run, len, false), (slot.run, slot.len, slot.terminal));
        }
        // EOL is no run codeword
        assert_eq!(0, codes::lookup(color, EOL << 1).len);
    }
}
