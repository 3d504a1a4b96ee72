use super::*;
use test_case::test_case;

#[test]
fn predictor_params_defaults() {
    let p = PredictorParams::try_from(&Dictionary::new()).unwrap();
    assert_eq!(PredictorParams::default(), p);
    assert_eq!(Predictor::None, p.predictor);
    assert_eq!((1, 8, 1), (p.colors, p.bits_per_component, p.columns));
}

#[test_case(1 => Ok(Predictor::None))]
#[test_case(2 => Ok(Predictor::Tiff))]
#[test_case(10 => Ok(Predictor::Png(PngPredictor::None)))]
#[test_case(14 => Ok(Predictor::Png(PngPredictor::Paeth)))]
#[test_case(15 => Ok(Predictor::Png(PngPredictor::Optimum)))]
#[test_case(3 => Err(ConfigError::UnknownPredictor(3)))]
#[test_case(16 => Err(ConfigError::UnknownPredictor(16)))]
fn predictor_from_int(v: i32) -> Result<Predictor, ConfigError> {
    Predictor::try_from(v)
}

#[test_case([("Colors", 0)] => Err(ConfigError::InvalidColors(0)); "zero colors")]
#[test_case([("Colors", 5)] => Err(ConfigError::InvalidColors(5)); "five colors")]
#[test_case([("Colors", -1)] => Err(ConfigError::InvalidColors(-1)); "negative colors")]
#[test_case([("BitsPerComponent", 3)] => Err(ConfigError::InvalidBitsPerComponent(3)); "bpc 3")]
#[test_case([("BitsPerComponent", 300)] => Err(ConfigError::InvalidBitsPerComponent(300)); "bpc overflow")]
#[test_case([("Columns", 0)] => Err(ConfigError::InvalidColumns(0)); "zero columns")]
#[test_case([("Columns", -3)] => Err(ConfigError::InvalidColumns(-3)); "negative columns")]
fn invalid_predictor_params(
    d: impl IntoIterator<Item = (&'static str, i32)>,
) -> Result<PredictorParams, ConfigError> {
    PredictorParams::try_from(&d.into_iter().collect::<Dictionary>())
}

#[test_case(1, 8, 1 => 1)]
#[test_case(3, 8, 5 => 15)]
#[test_case(1, 1, 9 => 2)]
#[test_case(4, 16, 2 => 16)]
#[test_case(3, 4, 3 => 5)]
fn bytes_per_row(colors: u8, bpc: u8, columns: u32) -> usize {
    PredictorParams::new(Predictor::Tiff, colors, bpc, columns)
        .unwrap()
        .bytes_per_row()
}

#[test_case(1, 1 => 1)]
#[test_case(1, 8 => 1)]
#[test_case(3, 8 => 3)]
#[test_case(2, 16 => 4)]
#[test_case(3, 2 => 1)]
fn bytes_per_pixel(colors: u8, bpc: u8) -> usize {
    PredictorParams::new(Predictor::None, colors, bpc, 1)
        .unwrap()
        .bytes_per_pixel()
}

#[test]
fn wrong_value_type() {
    let d: Dictionary = [("Predictor", Value::from(true))].into_iter().collect();
    assert_eq!(
        Err(ConfigError::UnexpectedType {
            key: "Predictor",
            expected: "integer"
        }),
        PredictorParams::try_from(&d)
    );
}

#[test]
fn null_value_is_default() {
    let d: Dictionary = [("Columns", Value::Null)].into_iter().collect();
    assert_eq!(1, PredictorParams::try_from(&d).unwrap().columns);
}

#[test_case(0 => Ok(false))]
#[test_case(1 => Ok(true))]
#[test_case(2 => Err(ConfigError::InvalidEarlyChange(2)))]
fn lzw_early_change(v: i32) -> Result<bool, ConfigError> {
    let d: Dictionary = [("EarlyChange", v)].into_iter().collect();
    LzwParams::try_from(&d).map(|p| p.early_change)
}

#[test]
fn lzw_defaults() {
    assert!(LzwParams::default().early_change);
    assert_eq!(
        LzwParams::default(),
        LzwParams::try_from(&Dictionary::new()).unwrap()
    );
}

#[test]
fn ccitt_defaults() {
    let p = CcittParams::try_from(&Dictionary::new()).unwrap();
    assert_eq!(CcittParams::default(), p);
    assert_eq!(0, p.k);
    assert_eq!(1728, p.columns);
    assert!(p.end_of_block);
    assert!(!p.end_of_line);
    assert!(!p.black_is_1);
}

#[test]
fn ccitt_from_dict() {
    let mut d = Dictionary::new();
    d.set("K", -1)
        .set("Columns", 16)
        .set("Rows", 2)
        .set("EndOfLine", true)
        .set("EncodedByteAlign", true)
        .set("EndOfBlock", false)
        .set("BlackIs1", true);
    assert_eq!(
        CcittParams {
            k: -1,
            columns: 16,
            rows: 2,
            end_of_line: true,
            encoded_byte_align: true,
            end_of_block: false,
            black_is_1: true,
        },
        CcittParams::try_from(&d).unwrap()
    );
}
