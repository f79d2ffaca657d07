use stab_common::{CodeConfig, DecodingModel, ErrorModel, ParseModelError};

const ALL: [ErrorModel; 4] = [
    ErrorModel::IndependentXz,
    ErrorModel::XOnly,
    ErrorModel::ZOnly,
    ErrorModel::Depolarizing,
];

#[test]
fn every_spelling_maps_to_its_own_variant() {
    let cases = [
        ("xz", ErrorModel::IndependentXz),
        ("Independent-XZ", ErrorModel::IndependentXz),
        ("x", ErrorModel::XOnly),
        ("x-only", ErrorModel::XOnly),
        (" Z ", ErrorModel::ZOnly),
        ("z-only", ErrorModel::ZOnly),
        ("depolarizing", ErrorModel::Depolarizing),
        ("Depolarising", ErrorModel::Depolarizing),
    ];
    for (text, expected) in cases {
        assert_eq!(text.parse::<ErrorModel>(), Ok(expected), "{text}");
        assert_eq!(
            text.parse::<DecodingModel>(),
            Ok(DecodingModel::from(expected)),
            "{text}"
        );
    }
}

#[test]
fn unknown_names_are_rejected() {
    for text in ["", "y", "xzz", "depolar"] {
        assert_eq!(text.parse::<ErrorModel>(), Err(ParseModelError));
        assert_eq!(text.parse::<DecodingModel>(), Err(ParseModelError));
    }
}

#[test]
fn display_round_trips_through_parse() {
    for model in ALL {
        assert_eq!(model.to_string().parse::<ErrorModel>(), Ok(model));
        let decoding = DecodingModel::from(model);
        assert_eq!(decoding.to_string(), model.to_string());
        assert_eq!(decoding.to_string().parse::<DecodingModel>(), Ok(decoding));
    }
}

#[test]
fn conversion_keeps_variants_distinct() {
    let converted: Vec<DecodingModel> = ALL.into_iter().map(DecodingModel::from).collect();
    for (i, a) in converted.iter().enumerate() {
        for b in &converted[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn css_codes_sample_independent_xz() {
    let code = CodeConfig {
        css: true,
        error_model: ErrorModel::Depolarizing,
        decoding_model: DecodingModel::Depolarizing,
    };
    assert_eq!(code.effective_error_model(), ErrorModel::IndependentXz);
    let combined = CodeConfig::combined(ErrorModel::ZOnly, DecodingModel::ZOnly);
    assert_eq!(combined.effective_error_model(), ErrorModel::ZOnly);
    assert!(combined.is_combined());
}
