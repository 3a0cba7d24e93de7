use diffmatch::{
    CorrelationConfig, DiffMatchError, DiffusionCorrelationImage, LuvRange, NoProgress,
    RangeGapDistance, RangeImage, RangePyramid,
};

fn flat(width: usize, height: usize, l: f32) -> RangeImage {
    RangeImage::from_fn(width, height, |_, _| Some(LuvRange::point(l, 0.0, 0.0))).unwrap()
}

#[test]
fn image_rejects_bad_buffers() {
    let err = RangeImage::new(Vec::new(), 0, 4).unwrap_err();
    assert!(matches!(err, DiffMatchError::InvalidDimensions { .. }));

    let err = RangeImage::new(vec![LuvRange::default(); 5], 2, 3).unwrap_err();
    assert_eq!(err, DiffMatchError::BufferSizeMismatch { needed: 6, got: 5 });

    let err = RangeImage::with_mask(vec![LuvRange::default(); 6], vec![1; 4], 2, 3).unwrap_err();
    assert_eq!(err, DiffMatchError::BufferSizeMismatch { needed: 6, got: 4 });
}

#[test]
fn image_validity_follows_mask() {
    let img = RangeImage::from_fn(3, 2, |x, y| {
        (x != 1 || y != 1).then(|| LuvRange::point(x as f32, y as f32, 0.0))
    })
    .unwrap();
    assert!(img.valid(0, 0));
    assert!(!img.valid(1, 1));
    assert!(!img.valid_ext(-1, 0));
    assert!(!img.valid_ext(0, 2));
    assert!(img.valid_ext(2, 1));
    assert_eq!(img.get(2, 1).centre(), [2.0, 1.0, 0.0]);
}

#[test]
fn pyramid_validates_halving() {
    let ok = RangePyramid::from_levels(vec![flat(9, 8, 0.0), flat(5, 4, 0.0), flat(2, 2, 0.0)], true)
        .unwrap();
    assert_eq!(ok.num_levels(), 3);
    assert!(ok.half_height());

    let err = RangePyramid::from_levels(vec![flat(16, 8, 0.0), flat(6, 4, 0.0)], true).unwrap_err();
    assert!(matches!(err, DiffMatchError::InvalidPyramid { level: 1, .. }));

    let err =
        RangePyramid::from_levels(vec![flat(16, 8, 0.0), flat(8, 4, 0.0)], false).unwrap_err();
    assert!(matches!(err, DiffMatchError::InvalidPyramid { level: 1, .. }));

    let err = RangePyramid::from_levels(Vec::new(), false).unwrap_err();
    assert!(matches!(err, DiffMatchError::InvalidPyramid { level: 0, .. }));
}

#[test]
fn correlator_rejects_mismatched_pyramids() {
    let left = RangePyramid::single(flat(8, 4, 0.0));
    let right = RangePyramid::single(flat(8, 5, 0.0));
    let dist = RangeGapDistance;
    let err = DiffusionCorrelationImage::new(&dist, 1.0, &left, &right)
        .err()
        .unwrap();
    assert!(matches!(err, DiffMatchError::PyramidMismatch { .. }));

    let halved = RangePyramid::from_levels(vec![flat(8, 4, 0.0), flat(4, 2, 0.0)], true).unwrap();
    let kept = RangePyramid::from_levels(vec![flat(8, 4, 0.0), flat(4, 4, 0.0)], false).unwrap();
    let err = DiffusionCorrelationImage::new(&dist, 1.0, &halved, &kept)
        .err()
        .unwrap();
    assert!(matches!(err, DiffMatchError::PyramidMismatch { .. }));

    let same = RangePyramid::single(flat(8, 4, 0.0));
    assert!(DiffusionCorrelationImage::new(&dist, -1.0, &same, &same).is_err());
    assert!(DiffusionCorrelationImage::new(&dist, f32::NAN, &same, &same).is_err());
}

#[test]
fn config_validation() {
    assert!(CorrelationConfig::default().validate().is_ok());

    let bad = [
        CorrelationConfig {
            maxima_limit: 0,
            ..CorrelationConfig::default()
        },
        CorrelationConfig {
            base_dist_cap: 0.0,
            ..CorrelationConfig::default()
        },
        CorrelationConfig {
            dist_cap_mult: 1.0,
            ..CorrelationConfig::default()
        },
        CorrelationConfig {
            dist_cap_threshold: f32::INFINITY,
            ..CorrelationConfig::default()
        },
    ];
    for cfg in bad {
        assert!(matches!(
            cfg.validate(),
            Err(DiffMatchError::InvalidConfig(_))
        ));
    }
}

#[test]
fn invalid_config_fails_run_without_output() {
    let pyr = RangePyramid::single(flat(6, 3, 10.0));
    let dist = RangeGapDistance;
    let mut corr = DiffusionCorrelationImage::new(&dist, 1.0, &pyr, &pyr)
        .unwrap()
        .with_config(CorrelationConfig {
            maxima_limit: 0,
            ..CorrelationConfig::default()
        });
    assert!(corr.run(&mut NoProgress).is_err());
    assert!(corr.candidates().is_none());
}

#[test]
fn caps_grow_geometrically() {
    let cfg = CorrelationConfig {
        base_dist_cap: 1.5,
        dist_cap_mult: 2.0,
        ..CorrelationConfig::default()
    };
    assert_eq!(cfg.dist_caps(4), vec![1.5, 3.0, 6.0, 12.0]);
}

#[cfg(feature = "serde")]
#[test]
fn config_from_partial_json() {
    let cfg: CorrelationConfig =
        serde_json::from_str(r#"{ "maxima_limit": 3, "range": 4 }"#).unwrap();
    assert_eq!(cfg.maxima_limit, 3);
    assert_eq!(cfg.range, 4);
    assert_eq!(cfg.steps, CorrelationConfig::default().steps);

    let text = serde_json::to_string(&cfg).unwrap();
    let back: CorrelationConfig = serde_json::from_str(&text).unwrap();
    assert_eq!(back, cfg);
}

#[cfg(not(feature = "rayon"))]
#[test]
fn parallel_needs_rayon() {
    let cfg = CorrelationConfig {
        parallel: true,
        ..CorrelationConfig::default()
    };
    assert!(matches!(
        cfg.validate(),
        Err(DiffMatchError::InvalidConfig(_))
    ));
}
