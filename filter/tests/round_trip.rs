use nipdf_filter::{
    decode_chain, encode_chain, filters, Codec, DecodeError, Dictionary, Filter, Malformed,
    Options, Value,
};
use test_case::test_case;

fn filter(name: &str, params: &[(&str, Value)]) -> Filter {
    let d: Dictionary = params.iter().cloned().collect();
    Filter::from_name(name, Some(&d)).unwrap()
}

fn samples() -> Vec<Vec<u8>> {
    let mut seed = 99u32;
    let noise: Vec<u8> = (0..4096)
        .map(|_| {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12345);
            (seed >> 16) as u8
        })
        .collect();
    vec![
        vec![],
        vec![0],
        vec![0; 4],
        vec![0xff; 300],
        b"hello, world".to_vec(),
        (0..=255).collect(),
        noise,
        b"abc".repeat(3000),
    ]
}

#[test_case(filter("ASCIIHexDecode", &[]))]
#[test_case(filter("ASCII85Decode", &[]))]
#[test_case(filter("RunLengthDecode", &[]))]
#[test_case(filter("LZWDecode", &[]); "lzw")]
#[test_case(filter("LZWDecode", &[("EarlyChange", 0.into())]); "lzw late change")]
#[test_case(filter("FlateDecode", &[]); "flate")]
#[test_case(filter("FlateDecode", &[("Predictor", 15.into()), ("Columns", 1.into())]); "flate png optimum")]
#[test_case(filter("LZWDecode", &[("Predictor", 2.into())]); "lzw tiff")]
#[test_case(filter("CCITTFaxDecode", &[("Columns", 8.into())]); "ccitt")]
#[test_case(filter("CCITTFaxDecode", &[("Columns", 16.into()), ("EndOfLine", true.into())]); "ccitt 16 columns")]
fn decode_of_encode_is_identity(f: Filter) {
    let options = Options::default();
    for raw in samples() {
        // CCITT input is whole rows
        if let Filter::CcittFax(p) = f {
            if raw.len() % (p.columns as usize).div_ceil(8) != 0 {
                continue;
            }
        }
        let encoded = f.encode(&raw, &options).unwrap();
        assert_eq!(raw, f.decode(&encoded, &options).unwrap(), "{:?}", f);
    }
}

#[test]
fn chain_of_every_lossless_filter() {
    let chain = filters(
        &["ASCIIHexDecode", "ASCII85Decode", "LZWDecode", "FlateDecode", "RunLengthDecode"],
        &[],
    )
    .unwrap();
    let options = Options::default();
    for raw in samples() {
        let encoded = encode_chain(&raw, &chain, &options).unwrap();
        assert_eq!(raw, decode_chain(&encoded, &chain, &options).unwrap().as_ref());
    }
}

#[test]
fn partial_output_is_a_prefix() {
    let raw = b"partial output survives a fault".to_vec();
    let options = Options::default();
    for name in ["ASCIIHexDecode", "ASCII85Decode", "RunLengthDecode", "LZWDecode"] {
        let f = filter(name, &[]);
        let full = f.encode(&raw, &options).unwrap();
        let even = full.len() * 2 / 3 / 2 * 2;
        for cut in [even, even + 1] {
            // cut the stream and append an invalid byte for the radix filters
            let mut encoded = full[..cut].to_vec();
            if matches!(name, "ASCIIHexDecode" | "ASCII85Decode") {
                encoded.push(b'{');
            }
            match f.decode(&encoded, &options) {
                Ok(v) => assert!(raw.starts_with(&v), "{} cut at {}", name, cut),
                Err(e) => {
                    assert!(matches!(e, DecodeError::InvalidEncoding(_)), "{}", name);
                    let partial = e.partial().unwrap();
                    assert!(raw.starts_with(partial), "{} cut at {}", name, cut);
                }
            }
        }
    }
}

#[test]
fn invalid_character_reports_filter() {
    let err = filter("ASCII85Decode", &[])
        .decode(b"9jqo^{", &Options::default())
        .unwrap_err();
    assert_eq!(Some(&Malformed::InvalidCharacter(b'{')), err.malformed());
    assert_eq!(Some(&b"Man "[..]), err.partial());
}
