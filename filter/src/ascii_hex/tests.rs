use super::*;
use test_case::test_case;

#[test_case(b"" => b"".to_vec(); "empty")]
#[test_case(b"\x00\x01\xab\xff" => b"0001ABFF".to_vec(); "upper case")]
#[test_case(b"PDF" => b"504446".to_vec(); "text")]
fn test_encode(raw: &[u8]) -> Vec<u8> {
    encode(raw)
}

#[test_case(b"" => b"".to_vec(); "empty")]
#[test_case(b">" => b"".to_vec(); "only eod")]
#[test_case(b"504446" => b"PDF".to_vec(); "no eod")]
#[test_case(b"504446>" => b"PDF".to_vec(); "eod")]
#[test_case(b"50 44\n46\r\t\x0c\x00>" => b"PDF".to_vec(); "white spaces")]
#[test_case(b"abCD" => vec![0xab, 0xcd]; "mixed case")]
#[test_case(b"504>46" => vec![0x50, 0x40]; "truncate at eod")]
#[test_case(b"7" => vec![0x70]; "odd digit")]
#[test_case(b"61 62 6>" => b"ab`".to_vec(); "odd digit before eod")]
fn test_decode(input: &[u8]) -> Vec<u8> {
    decode(input).unwrap()
}

#[test_case(b"50G446" => (Malformed::InvalidCharacter(b'G'), b"P".to_vec()); "after full byte")]
#[test_case(b"504G" => (Malformed::InvalidCharacter(b'G'), vec![0x50]); "after odd digit")]
#[test_case(b"5 0 4 4 6 ~" => (Malformed::InvalidCharacter(b'~'), b"PD".to_vec()); "odd digit with white space")]
#[test_case(b"~>" => (Malformed::InvalidCharacter(b'~'), vec![]); "first char")]
fn invalid_character_keeps_partial(input: &[u8]) -> (Malformed, Vec<u8>) {
    let DecodeError::InvalidEncoding(e) = decode(input).unwrap_err() else {
        panic!("expect invalid encoding");
    };
    assert_eq!(FilterKind::AsciiHex, e.filter);
    assert_eq!(input, &e.input[..]);
    (e.reason, e.partial)
}

#[test]
fn round_trip() {
    let raw: Vec<u8> = (0..=255).collect();
    assert_eq!(raw, decode(&encode(&raw)).unwrap());
}
